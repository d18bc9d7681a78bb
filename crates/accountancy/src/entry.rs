//! Ledger entries.
//!
//! A [`LedgerEntry`] is a single financial record. It is created in memory,
//! optionally dated, then posted to an [`EntryStore`](crate::EntryStore)
//! exactly once; after that it is read-only. Entries are never deleted.
//!
//! Entry variants are a closed set: [`EntryDetails`] carries the
//! variant-specific payload and [`EntryKind`] is its payload-free tag, used by
//! type-filtered queries.

use core::fmt;
use std::{hash::Hash, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AccountancyError, Currency, Money, ResultAccountancy};

/// Opaque, immutable entry identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntryId {
    type Err = AccountancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| AccountancyError::InvalidId(format!("invalid entry id: {s}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    General,
    ProductPayment,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::ProductPayment => "product_payment",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = AccountancyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "general" => Ok(Self::General),
            "product_payment" => Ok(Self::ProductPayment),
            other => Err(AccountancyError::InvalidEntry(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Cheque,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Cheque => "cheque",
            Self::Card => "card",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = AccountancyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "cheque" => Ok(Self::Cheque),
            "card" => Ok(Self::Card),
            other => Err(AccountancyError::InvalidEntry(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// Payment received for an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayment {
    pub order_id: String,
    pub customer: String,
    pub payment_method: PaymentMethod,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryDetails {
    General,
    ProductPayment(ProductPayment),
}

impl EntryDetails {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::General => EntryKind::General,
            Self::ProductPayment(_) => EntryKind::ProductPayment,
        }
    }
}

/// `Pending` until the store accepts the entry, `Posted` afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Pending,
    Posted,
}

#[derive(Clone, Debug, Serialize)]
pub struct LedgerEntry {
    id: EntryId,
    state: EntryState,
    timestamp: Option<DateTime<Utc>>,
    amount: Money,
    description: String,
    details: EntryDetails,
}

impl LedgerEntry {
    /// Creates a pending, undated general entry.
    pub fn new(amount: Money, description: impl Into<String>) -> Self {
        Self::with_details(amount, description, EntryDetails::General)
    }

    /// Creates a pending, undated entry for an order payment.
    pub fn product_payment(
        amount: Money,
        description: impl Into<String>,
        payment: ProductPayment,
    ) -> Self {
        Self::with_details(amount, description, EntryDetails::ProductPayment(payment))
    }

    pub fn with_details(
        amount: Money,
        description: impl Into<String>,
        details: EntryDetails,
    ) -> Self {
        Self {
            id: EntryId::new(),
            state: EntryState::Pending,
            timestamp: None,
            amount,
            description: description.into(),
            details,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn is_posted(&self) -> bool {
        self.state == EntryState::Posted
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &EntryDetails {
        &self.details
    }

    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    /// Dates a pending entry. The timestamp can be set only once.
    pub fn set_timestamp(&mut self, at: DateTime<Utc>) -> ResultAccountancy<()> {
        if self.is_posted() {
            return Err(AccountancyError::InvalidEntry(format!(
                "entry {} is already posted",
                self.id
            )));
        }
        if let Some(existing) = self.timestamp {
            return Err(AccountancyError::InvalidEntry(format!(
                "entry {} is already dated {existing}",
                self.id
            )));
        }
        self.timestamp = Some(at);
        Ok(())
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> ResultAccountancy<Self> {
        self.set_timestamp(at)?;
        Ok(self)
    }

    /// Moves a dated entry from `Pending` to `Posted`.
    ///
    /// Stores call this while accepting the entry. Posting an entry that is
    /// already posted leaves it unchanged; whether its id is new is for the
    /// store to decide.
    pub fn post(mut self) -> ResultAccountancy<Self> {
        if self.timestamp.is_none() {
            return Err(AccountancyError::InvalidEntry(format!(
                "entry {} has no timestamp",
                self.id
            )));
        }
        self.state = EntryState::Posted;
        Ok(self)
    }
}

impl PartialEq for LedgerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LedgerEntry {}

impl Hash for LedgerEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(at) => write!(f, "{} ", at.format("%Y-%m-%d %H:%M"))?,
            None => f.write_str("(undated) ")?,
        }
        write!(f, "{} [{}]", self.amount, self.kind())?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub posted_at: DateTimeUtc,
    pub amount_minor: i64,
    pub currency: String,
    pub description: String,
    pub order_id: Option<String>,
    pub customer: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&LedgerEntry> for ActiveModel {
    type Error = AccountancyError;

    fn try_from(entry: &LedgerEntry) -> Result<Self, Self::Error> {
        let posted_at = match (entry.state, entry.timestamp) {
            (EntryState::Posted, Some(at)) => at,
            _ => {
                return Err(AccountancyError::InvalidEntry(format!(
                    "entry {} must be posted before it is stored",
                    entry.id
                )));
            }
        };
        let payment = match &entry.details {
            EntryDetails::General => None,
            EntryDetails::ProductPayment(payment) => Some(payment),
        };
        Ok(Self {
            id: ActiveValue::Set(entry.id.to_string()),
            kind: ActiveValue::Set(entry.kind().as_str().to_string()),
            posted_at: ActiveValue::Set(posted_at),
            amount_minor: ActiveValue::Set(entry.amount.amount_minor()),
            currency: ActiveValue::Set(entry.amount.currency().code().to_string()),
            description: ActiveValue::Set(entry.description.clone()),
            order_id: ActiveValue::Set(payment.map(|p| p.order_id.clone())),
            customer: ActiveValue::Set(payment.map(|p| p.customer.clone())),
            payment_method: ActiveValue::Set(payment.map(|p| p.payment_method.as_str().to_string())),
        })
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = AccountancyError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id: EntryId = model.id.parse()?;
        let details = match EntryKind::try_from(model.kind.as_str())? {
            EntryKind::General => EntryDetails::General,
            EntryKind::ProductPayment => {
                let missing = |field: &str| {
                    AccountancyError::InvalidEntry(format!("entry {id} is missing {field}"))
                };
                let payment_method = model
                    .payment_method
                    .as_deref()
                    .ok_or_else(|| missing("payment_method"))?;
                EntryDetails::ProductPayment(ProductPayment {
                    order_id: model.order_id.ok_or_else(|| missing("order_id"))?,
                    customer: model.customer.ok_or_else(|| missing("customer"))?,
                    payment_method: PaymentMethod::try_from(payment_method)?,
                })
            }
        };
        Ok(Self {
            id,
            state: EntryState::Posted,
            timestamp: Some(model.posted_at),
            amount: Money::new(model.amount_minor, Currency::try_from(model.currency.as_str())?),
            description: model.description,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn eur(minor: i64) -> Money {
        Money::new(minor, Currency::Eur)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_entry_is_pending_and_undated() {
        let entry = LedgerEntry::new(eur(1000), "");
        assert_eq!(entry.state(), EntryState::Pending);
        assert!(!entry.has_timestamp());
        assert_eq!(entry.description(), "");
        assert_eq!(entry.kind(), EntryKind::General);
    }

    #[test]
    fn equality_is_by_id_only() {
        let entry = LedgerEntry::new(eur(1000), "rent");
        let dated = entry.clone().with_timestamp(noon()).unwrap();
        assert_eq!(entry, dated);
        assert_ne!(entry, LedgerEntry::new(eur(1000), "rent"));
    }

    #[test]
    fn timestamp_can_be_set_once() {
        let mut entry = LedgerEntry::new(eur(1000), "rent");
        entry.set_timestamp(noon()).unwrap();
        assert!(matches!(
            entry.set_timestamp(noon()),
            Err(AccountancyError::InvalidEntry(_))
        ));
        assert_eq!(entry.timestamp(), Some(noon()));
    }

    #[test]
    fn posting_requires_timestamp_and_keeps_posted_entries() {
        let entry = LedgerEntry::new(eur(1000), "rent");
        assert!(matches!(
            entry.clone().post(),
            Err(AccountancyError::InvalidEntry(_))
        ));

        let posted = entry.with_timestamp(noon()).unwrap().post().unwrap();
        assert!(posted.is_posted());
        let reposted = posted.clone().post().unwrap();
        assert!(reposted.is_posted());
        assert_eq!(reposted.timestamp(), Some(noon()));
        let mut posted = posted;
        assert!(posted.set_timestamp(noon()).is_err());
    }

    #[test]
    fn model_round_trip_keeps_payment_details() {
        let payment = ProductPayment {
            order_id: "order-42".to_string(),
            customer: "alice".to_string(),
            payment_method: PaymentMethod::Card,
        };
        let entry = LedgerEntry::product_payment(eur(4999), "order 42", payment.clone())
            .with_timestamp(noon())
            .unwrap()
            .post()
            .unwrap();

        let active = ActiveModel::try_from(&entry).unwrap();
        let model = Model {
            id: active.id.unwrap(),
            kind: active.kind.unwrap(),
            posted_at: active.posted_at.unwrap(),
            amount_minor: active.amount_minor.unwrap(),
            currency: active.currency.unwrap(),
            description: active.description.unwrap(),
            order_id: active.order_id.unwrap(),
            customer: active.customer.unwrap(),
            payment_method: active.payment_method.unwrap(),
        };
        assert_eq!(model.kind, "product_payment");

        let restored = LedgerEntry::try_from(model).unwrap();
        assert_eq!(restored.id(), entry.id());
        assert_eq!(restored.details(), &EntryDetails::ProductPayment(payment));
        assert_eq!(restored.amount(), eur(4999));
        assert_eq!(restored.timestamp(), Some(noon()));
        assert!(restored.is_posted());
    }

    #[test]
    fn pending_entry_cannot_become_a_row() {
        let entry = LedgerEntry::new(eur(1), "").with_timestamp(noon()).unwrap();
        assert!(ActiveModel::try_from(&entry).is_err());
    }

    #[test]
    fn display_includes_date_amount_and_kind() {
        let entry = LedgerEntry::new(eur(2000), "stock")
            .with_timestamp(noon())
            .unwrap();
        assert_eq!(entry.to_string(), "2024-01-03 12:00 20.00 EUR [general] stock");
    }
}
