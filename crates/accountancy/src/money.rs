use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountancyError, Currency, ResultAccountancy};

/// Signed money amount represented as **integer minor units** plus its
/// [`Currency`].
///
/// Use this type for **all** monetary values in the ledger to avoid
/// floating-point drift. Adding two amounts is checked: both the currency and
/// the `i64` range are validated.
///
/// # Examples
///
/// ```rust
/// use accountancy::{Currency, Money};
///
/// let amount = Money::new(12_34, Currency::Eur);
/// assert_eq!(amount.amount_minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34 EUR");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency has):
///
/// ```rust
/// use accountancy::{Currency, Money};
///
/// assert_eq!(Money::parse("10,5", Currency::Eur).unwrap().amount_minor(), 1050);
/// assert!(Money::parse("12.345", Currency::Eur).is_err());
/// assert!(Money::parse("1.5", Currency::Jpy).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// The neutral element of addition in `currency`.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    #[must_use]
    pub const fn amount_minor(self) -> i64 {
        self.amount_minor
    }

    #[must_use]
    pub const fn currency(self) -> Currency {
        self.currency
    }

    /// Adds `rhs` to `self`.
    ///
    /// Fails with [`AccountancyError::CurrencyMismatch`] when the currencies
    /// differ and with [`AccountancyError::InvalidAmount`] on overflow.
    pub fn checked_add(self, rhs: Money) -> ResultAccountancy<Money> {
        if self.currency != rhs.currency {
            return Err(AccountancyError::CurrencyMismatch(format!(
                "cannot add {} to {}",
                rhs.currency.code(),
                self.currency.code()
            )));
        }
        self.amount_minor
            .checked_add(rhs.amount_minor)
            .map(|amount_minor| Money::new(amount_minor, self.currency))
            .ok_or_else(|| AccountancyError::InvalidAmount("amount too large".to_string()))
    }

    /// Parses a decimal string into minor units of `currency`.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse(input: &str, currency: Currency) -> ResultAccountancy<Money> {
        let empty = || AccountancyError::InvalidAmount("empty amount".to_string());
        let invalid = || AccountancyError::InvalidAmount("invalid amount".to_string());
        let overflow = || AccountancyError::InvalidAmount("amount too large".to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = u32::from(currency.minor_units());
        let scale = 10i64.pow(digits);
        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > digits as usize {
                    return Err(AccountancyError::InvalidAmount(format!(
                        "too many decimals for {}",
                        currency.code()
                    )));
                }
                let padding = digits - frac.len() as u32;
                frac.parse::<i64>().map_err(|_| invalid())? * 10i64.pow(padding)
            }
        };

        let total = major
            .checked_mul(scale)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money::new(signed, currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let digits = self.currency.minor_units();
        let code = self.currency.code();
        if digits == 0 {
            return write!(f, "{sign}{abs} {code}");
        }
        let scale = 10u64.pow(u32::from(digits));
        let major = abs / scale;
        let minor = abs % scale;
        write!(
            f,
            "{sign}{major}.{minor:0width$} {code}",
            width = usize::from(digits)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_with_currency_code() {
        assert_eq!(Money::zero(Currency::Eur).to_string(), "0.00 EUR");
        assert_eq!(Money::new(1, Currency::Eur).to_string(), "0.01 EUR");
        assert_eq!(Money::new(1050, Currency::Usd).to_string(), "10.50 USD");
        assert_eq!(Money::new(-1050, Currency::Eur).to_string(), "-10.50 EUR");
        assert_eq!(Money::new(1200, Currency::Jpy).to_string(), "1200 JPY");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let eur = |s: &str| Money::parse(s, Currency::Eur).unwrap().amount_minor();
        assert_eq!(eur("10"), 1000);
        assert_eq!(eur("10.5"), 1050);
        assert_eq!(eur("10,50"), 1050);
        assert_eq!(eur("-0.01"), -1);
        assert_eq!(eur("+1.00"), 100);
        assert_eq!(eur("  2.30 "), 230);
        assert_eq!(Money::parse("1500", Currency::Jpy).unwrap().amount_minor(), 1500);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(Money::parse("12.345", Currency::Eur).is_err());
        assert!(Money::parse("", Currency::Eur).is_err());
        assert!(Money::parse("-", Currency::Eur).is_err());
        assert!(Money::parse("1.2.3", Currency::Eur).is_err());
        assert!(Money::parse("abc", Currency::Eur).is_err());
        assert!(Money::parse("99999999999999999999", Currency::Eur).is_err());
    }

    #[test]
    fn checked_add_guards_currency_and_overflow() {
        let a = Money::new(1000, Currency::Eur);
        let b = Money::new(-250, Currency::Eur);
        assert_eq!(a.checked_add(b).unwrap(), Money::new(750, Currency::Eur));

        let err = a.checked_add(Money::new(1, Currency::Usd)).unwrap_err();
        assert_eq!(
            err,
            AccountancyError::CurrencyMismatch("cannot add USD to EUR".to_string())
        );

        let max = Money::new(i64::MAX, Currency::Eur);
        assert!(matches!(
            max.checked_add(Money::new(1, Currency::Eur)),
            Err(AccountancyError::InvalidAmount(_))
        ));
    }
}
