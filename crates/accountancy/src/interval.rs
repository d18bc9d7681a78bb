//! Reporting windows.
//!
//! An [`Interval`] is a closed span of time `[start, end]`. It bounds range
//! queries and keys the buckets produced by [`partition`](crate::partition).
//! Equality, hashing and ordering are structural, ordering first by `start`.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::{AccountancyError, ResultAccountancy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Creates `[start, end]`, failing with [`AccountancyError::InvalidRange`]
    /// when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ResultAccountancy<Self> {
        ensure_ordered(start, end)?;
        Ok(Self { start, end })
    }

    /// Starts building an interval at `start`.
    pub fn from(start: DateTime<Utc>) -> IntervalBuilder {
        IntervalBuilder { start }
    }

    /// Only for callers that already validated `start <= end`.
    pub(crate) fn unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether `instant` lies in `[start, end]`, both ends included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether both intervals share more than a single boundary instant.
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

/// Builder returned by [`Interval::from`].
#[derive(Clone, Copy, Debug)]
pub struct IntervalBuilder {
    start: DateTime<Utc>,
}

impl IntervalBuilder {
    /// Ends the interval at `end`, which must not precede the start.
    pub fn to(self, end: DateTime<Utc>) -> ResultAccountancy<Interval> {
        Interval::new(self.start, end)
    }

    /// Ends the interval `length` after the start. Negative lengths are
    /// rejected.
    pub fn with_length(self, length: TimeDelta) -> ResultAccountancy<Interval> {
        let end = self.start.checked_add_signed(length).ok_or_else(|| {
            AccountancyError::InvalidRange(format!("{length} overflows from {}", self.start))
        })?;
        Interval::new(self.start, end)
    }
}

pub(crate) fn ensure_ordered(from: DateTime<Utc>, to: DateTime<Utc>) -> ResultAccountancy<()> {
    if from > to {
        return Err(AccountancyError::InvalidRange(format!(
            "from {from} is after to {to}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn rejects_reversed_bounds() {
        assert!(matches!(
            Interval::new(at(2, 0), at(1, 0)),
            Err(AccountancyError::InvalidRange(_))
        ));
        assert!(Interval::new(at(1, 0), at(1, 0)).is_ok());
    }

    #[test]
    fn builder_variants_agree() {
        let by_end = Interval::from(at(1, 0)).to(at(8, 0)).unwrap();
        let by_length = Interval::from(at(1, 0))
            .with_length(TimeDelta::days(7))
            .unwrap();
        assert_eq!(by_end, by_length);
        assert_eq!(by_end.duration(), TimeDelta::days(7));
        assert!(
            Interval::from(at(1, 0))
                .with_length(TimeDelta::hours(-1))
                .is_err()
        );
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let interval = Interval::new(at(1, 0), at(3, 0)).unwrap();
        assert!(interval.contains(at(1, 0)));
        assert!(interval.contains(at(2, 12)));
        assert!(interval.contains(at(3, 0)));
        assert!(!interval.contains(at(3, 1)));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let first = Interval::new(at(1, 0), at(3, 0)).unwrap();
        let second = Interval::new(at(3, 0), at(5, 0)).unwrap();
        let spanning = Interval::new(at(2, 0), at(4, 0)).unwrap();
        assert!(!first.overlaps(&second));
        assert!(first.overlaps(&spanning));
        assert!(spanning.overlaps(&second));
    }

    #[test]
    fn orders_by_start_then_end() {
        let short = Interval::new(at(1, 0), at(2, 0)).unwrap();
        let long = Interval::new(at(1, 0), at(5, 0)).unwrap();
        let later = Interval::new(at(2, 0), at(3, 0)).unwrap();
        let mut all = vec![later, long, short];
        all.sort();
        assert_eq!(all, vec![short, long, later]);
    }

    #[test]
    fn display_uses_iso_instants() {
        let interval = Interval::new(at(1, 0), at(8, 0)).unwrap();
        assert_eq!(
            interval.to_string(),
            "2024-01-01T00:00:00Z → 2024-01-08T00:00:00Z"
        );
    }
}
