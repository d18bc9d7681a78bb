//! Append-only ledger with period-bucketed reporting.
//!
//! Entries ([`LedgerEntry`]) are posted once to an [`EntryStore`] and never
//! change afterwards. The [`Accountancy`] facade answers range and kind
//! queries and, for reporting, splits a time span with [`partition`], sorts
//! entries into the resulting intervals with [`assign`] and totals each
//! bucket with [`sum`].

pub use accountancy::{Accountancy, AccountancyBuilder};
pub use aggregate::{Volumes, sum, sum_buckets};
pub use bucket::{Buckets, assign};
pub use currency::Currency;
pub use entry::{
    EntryDetails, EntryId, EntryKind, EntryState, LedgerEntry, PaymentMethod, ProductPayment,
};
pub use error::AccountancyError;
pub use interval::{Interval, IntervalBuilder};
pub use money::Money;
pub use partition::partition;
pub use store::{DatabaseEntryStore, EntryStore, InMemoryEntryStore};
pub use time::{Clock, FixedClock, SystemClock};

mod accountancy;
mod aggregate;
mod bucket;
mod currency;
mod entry;
mod error;
mod interval;
mod money;
mod partition;
mod store;
mod time;

pub type ResultAccountancy<T> = Result<T, AccountancyError>;
