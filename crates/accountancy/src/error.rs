//! The module contains the errors the accountancy can return.
//!
//! The errors callers are expected to handle are:
//!
//! - [`InvalidRange`] returned when a query range or a period is malformed.
//! - [`DuplicateEntry`] returned when an entry id was already written.
//! - [`CurrencyMismatch`] returned when amounts of different currencies meet.
//!
//!  [`InvalidRange`]: AccountancyError::InvalidRange
//!  [`DuplicateEntry`]: AccountancyError::DuplicateEntry
//!  [`CurrencyMismatch`]: AccountancyError::CurrencyMismatch
use sea_orm::DbErr;
use thiserror::Error;

use crate::EntryId;

/// Accountancy custom errors.
#[derive(Error, Debug)]
pub enum AccountancyError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("\"{0}\" already present!")]
    DuplicateEntry(EntryId),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Store failure: {0}")]
    Store(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for AccountancyError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::DuplicateEntry(a), Self::DuplicateEntry(b)) => a == b,
            (Self::CurrencyMismatch(a), Self::CurrencyMismatch(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
