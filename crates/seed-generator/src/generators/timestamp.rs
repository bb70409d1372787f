//! Timestamp value generators.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;

/// Inclusive range of instants that generated dates fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// From January 1st of the decade containing `now` up to `now`.
    pub fn this_decade(now: DateTime<Utc>) -> Self {
        let decade_year = now.year() - now.year().rem_euclid(10);
        let start = NaiveDate::from_ymd_opt(decade_year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(now);
        Self { start, end: now }
    }
}

/// Generate a random timestamp in the window, at second resolution.
///
/// A window whose end is not after its start yields the start.
pub fn generate_timestamp_range<R: Rng>(rng: &mut R, window: &TimeWindow) -> DateTime<Utc> {
    let start_ts = window.start.timestamp();
    let end_ts = window.end.timestamp();

    if start_ts >= end_ts {
        return window.start;
    }

    let random_ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(window.start)
}
