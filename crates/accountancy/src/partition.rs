use chrono::{DateTime, TimeDelta, Utc};

use crate::{AccountancyError, Interval, ResultAccountancy, interval::ensure_ordered};

/// Splits `[from, to]` into consecutive intervals of `period` length.
///
/// The last interval is truncated to `to` when a full period would overshoot.
/// Adjacent intervals share their boundary instant, so the union of the result
/// is exactly `[from, to]`. When `from == to` a single zero-length interval is
/// returned.
///
/// Fails with [`AccountancyError::InvalidRange`] when `from > to` or `period`
/// is not strictly positive.
pub fn partition(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    period: TimeDelta,
) -> ResultAccountancy<Vec<Interval>> {
    ensure_ordered(from, to)?;
    if period <= TimeDelta::zero() {
        return Err(AccountancyError::InvalidRange(format!(
            "period must be positive, got {period}"
        )));
    }

    if from == to {
        return Ok(vec![Interval::unchecked(from, to)]);
    }

    let mut intervals = Vec::new();
    let mut cursor = from;
    while cursor < to {
        let end = cursor
            .checked_add_signed(period)
            .filter(|next| *next < to)
            .unwrap_or(to);
        intervals.push(Interval::unchecked(cursor, end));
        cursor = end;
    }
    Ok(intervals)
}
