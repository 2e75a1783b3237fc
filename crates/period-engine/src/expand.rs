//! Snapping instants to period boundaries.
//!
//! Reports never start mid-week or mid-month: before a sequence is built the
//! requested range is widened so both ends sit on boundaries of the period
//! mode. Day-grained modes and the window modes (half-years, totals,
//! year-to-date) pass through unchanged. The time of day of the input is
//! kept.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::calendar::month_length;
use crate::mode::PeriodMode;

/// Widen a range so both ends lie on boundaries of `mode`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use period_engine::expand::expand;
/// use period_engine::mode::PeriodMode;
///
/// let start = Utc.with_ymd_and_hms(2015, 2, 15, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2015, 2, 17, 0, 0, 0).unwrap();
/// let (start, end) = expand(start, end, PeriodMode::Weeks);
/// assert_eq!(start, Utc.with_ymd_and_hms(2015, 2, 9, 0, 0, 0).unwrap());
/// assert_eq!(end, Utc.with_ymd_and_hms(2015, 2, 22, 0, 0, 0).unwrap());
/// ```
pub fn expand(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    mode: PeriodMode,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (set_minimum(start, mode), set_maximum(end, mode))
}

/// Snap an instant back to the start of its period.
///
/// Weeks snap to Monday, months to day 1, quarters to the first day of their
/// first month, years to January 1. Other modes return the instant
/// unchanged.
pub fn set_minimum(at: DateTime<Utc>, mode: PeriodMode) -> DateTime<Utc> {
    match mode {
        PeriodMode::Weeks => at - Duration::days(i64::from(at.weekday().num_days_from_monday())),
        PeriodMode::Months => anchor(at, at.year(), at.month(), 1),
        PeriodMode::Quarters => anchor(at, at.year(), at.month0() / 3 * 3 + 1, 1),
        PeriodMode::Years => anchor(at, at.year(), 1, 1),
        PeriodMode::Days | PeriodMode::Halfyears | PeriodMode::Total | PeriodMode::Ytd => at,
    }
}

/// Snap an instant forward to the last day of its period.
///
/// Weeks snap to Sunday, months to their last day, quarters to March 31,
/// June 30, September 30 or December 31, years to December 31. Other modes
/// return the instant unchanged.
pub fn set_maximum(at: DateTime<Utc>, mode: PeriodMode) -> DateTime<Utc> {
    match mode {
        PeriodMode::Weeks => {
            at + Duration::days(i64::from(6 - at.weekday().num_days_from_monday()))
        }
        PeriodMode::Months => anchor(at, at.year(), at.month(), month_length(at.year(), at.month())),
        PeriodMode::Quarters => {
            let month = at.month0() / 3 * 3 + 3;
            anchor(at, at.year(), month, month_length(at.year(), month))
        }
        PeriodMode::Years => anchor(at, at.year(), 12, 31),
        PeriodMode::Days | PeriodMode::Halfyears | PeriodMode::Total | PeriodMode::Ytd => at,
    }
}

/// Move an instant to a concrete day, keeping its time of day.
fn anchor(at: DateTime<Utc>, year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("period boundary is a representable date")
        .and_time(at.time())
        .and_utc()
}
