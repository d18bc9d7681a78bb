use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AccountancyError;

/// ISO-like currency code carried by every [`Money`](crate::Money) value.
///
/// A ledger works in a single currency, but amounts carry it explicitly so that
/// mixing two currencies is caught instead of silently summed.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units**. `minor_units()`
/// returns how many decimal digits separate major from minor units.
///
/// Example: EUR has 2 minor units, so `10.50 EUR` ⇄ `1050`; JPY has none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Jpy,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Jpy => 0,
            Currency::Eur | Currency::Usd | Currency::Gbp => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = AccountancyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            other => Err(AccountancyError::InvalidCurrency(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

impl FromStr for Currency {
    type Err = AccountancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("eur").unwrap(), Currency::Eur);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(
            Currency::try_from("XYZ").unwrap_err(),
            AccountancyError::InvalidCurrency("unsupported currency: XYZ".to_string())
        );
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Jpy.minor_units(), 0);
    }
}
