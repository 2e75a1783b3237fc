//! Date arithmetic and label rendering on top of chrono.
//!
//! Every function works on plain `DateTime<Utc>` instants; the crate has no
//! timezone handling, and weeks follow ISO 8601 (Monday start, week 1 holds
//! January 4), which chrono's `iso_week` computes directly.
//!
//! # Functions
//!
//! - [`from_epoch_ms`] / [`parse_date`]: instant construction
//! - [`iso_week_no`], [`iso_week_year`], [`quarter_no`], [`halfyear_no`]:
//!   calendar fields, with `_from_time` variants taking epoch milliseconds
//! - [`step`] / [`StepRange`] / [`diff`]: whole-unit stepping
//! - [`render_template`]: template renderer
//! - [`days_in_month`], [`is_leap_year`]: month geometry

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::{PeriodError, Result};
use crate::mode::StepUnit;

// ── Locale ──────────────────────────────────────────────────────────────────

/// Label language for month names produced by [`render_template`].
///
/// German is the house default of the reporting front ends; English is the
/// second supplied language. Everything else about rendering is
/// locale-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Locale {
    /// German month names (`Februar`, `Feb.`).
    #[default]
    De,
    /// English month names (`February`, `Feb`).
    En,
}

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

// abbreviations as the front ends display them: dotted unless the name is
// already four letters or fewer
const MONTHS_DE_SHORT: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sep.", "Okt.", "Nov.", "Dez.",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    fn month_name(self, month0: usize) -> &'static str {
        match self {
            Locale::De => MONTHS_DE[month0],
            Locale::En => MONTHS_EN[month0],
        }
    }

    fn month_abbrev(self, month0: usize) -> &'static str {
        match self {
            Locale::De => MONTHS_DE_SHORT[month0],
            Locale::En => MONTHS_EN_SHORT[month0],
        }
    }
}

// ── Instant construction ────────────────────────────────────────────────────

/// Convert a Unix epoch timestamp in milliseconds to a UTC instant.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] when the timestamp falls outside
/// chrono's representable range.
pub fn from_epoch_ms(time: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(time)
        .ok_or_else(|| PeriodError::InvalidDate(format!("epoch milliseconds out of range: {time}")))
}

/// Parse a date string into a UTC instant.
///
/// Accepts RFC 3339 datetimes as well as plain `YYYY-MM-DD` and `YYYY/MM/DD`
/// dates, which resolve to midnight UTC.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] when none of the accepted shapes
/// match.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    Err(PeriodError::InvalidDate(format!("'{input}'")))
}

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn current_date() -> String {
    render_template(Utc::now(), "YYYY-MM-DD", Locale::default())
}

// ── Calendar fields ─────────────────────────────────────────────────────────

/// ISO week number (1-53) of an instant.
pub fn iso_week_no(at: DateTime<Utc>) -> u32 {
    at.iso_week().week()
}

/// ISO week-based year of an instant.
///
/// Differs from the calendar year around year boundaries: 2014-12-29 lies in
/// week 1 of 2015.
pub fn iso_week_year(at: DateTime<Utc>) -> i32 {
    at.iso_week().year()
}

/// Quarter number (1-4) of an instant.
pub fn quarter_no(at: DateTime<Utc>) -> u32 {
    at.month0() / 3 + 1
}

/// Half-year number (1-2) of an instant.
pub fn halfyear_no(at: DateTime<Utc>) -> u32 {
    at.month0() / 6 + 1
}

/// ISO week number for an epoch-millisecond timestamp.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
pub fn iso_week_no_from_time(time: i64) -> Result<u32> {
    Ok(iso_week_no(from_epoch_ms(time)?))
}

/// ISO week-based year for an epoch-millisecond timestamp.
///
/// With `short` set, the two-digit form is returned (2015 ⇒ 15).
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
pub fn iso_week_year_from_time(time: i64, short: bool) -> Result<i32> {
    let year = iso_week_year(from_epoch_ms(time)?);
    Ok(if short { year.rem_euclid(100) } else { year })
}

/// Quarter number for an epoch-millisecond timestamp.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
pub fn quarter_no_from_time(time: i64) -> Result<u32> {
    Ok(quarter_no(from_epoch_ms(time)?))
}

/// Half-year number for an epoch-millisecond timestamp.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
pub fn halfyear_no_from_time(time: i64) -> Result<u32> {
    Ok(halfyear_no(from_epoch_ms(time)?))
}

/// Whether a calendar year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] when `month` is outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    if !(1..=12).contains(&month) {
        return Err(PeriodError::InvalidDate(format!(
            "month out of range: {month}"
        )));
    }
    Ok(month_length(year, month))
}

/// Month length for a chrono month, which is always 1-12.
pub(crate) fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

// ── Stepping ────────────────────────────────────────────────────────────────

/// Advance an instant by `count` whole steps of `unit`.
///
/// Month-based steps clamp the day of month when the target month is shorter
/// (January 31 plus one month is February 28), and the clamp carries through
/// accumulated steps.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] when the result leaves chrono's
/// representable range.
pub fn step(at: DateTime<Utc>, unit: StepUnit, count: i32) -> Result<DateTime<Utc>> {
    let stepped = match unit {
        StepUnit::Days => at.checked_add_signed(Duration::days(i64::from(count))),
        StepUnit::Weeks => at.checked_add_signed(Duration::weeks(i64::from(count))),
        StepUnit::Months => step_months(at, count),
        StepUnit::Quarters => step_months(at, count.saturating_mul(3)),
        StepUnit::Years => step_months(at, count.saturating_mul(12)),
    };
    stepped.ok_or_else(|| {
        PeriodError::InvalidDate(format!("date out of range after stepping {count} {unit}"))
    })
}

fn step_months(at: DateTime<Utc>, count: i32) -> Option<DateTime<Utc>> {
    if count >= 0 {
        at.checked_add_months(Months::new(count as u32))
    } else {
        at.checked_sub_months(Months::new(count.unsigned_abs()))
    }
}

/// Inclusive iterator from `start` to `end` in single `unit` steps.
///
/// Each value advances the previous one, so the month-clamping behavior of
/// [`step`] accumulates. Yields nothing when `start > end`. A step past
/// chrono's representable range ends the walk instead of erroring, so an
/// `end` at the far edge of that range truncates rather than fails.
#[derive(Debug, Clone)]
pub struct StepRange {
    cursor: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    unit: StepUnit,
}

impl StepRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, unit: StepUnit) -> StepRange {
        StepRange {
            cursor: Some(start),
            end,
            unit,
        }
    }
}

impl Iterator for StepRange {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        let current = self.cursor?;
        if current > self.end {
            self.cursor = None;
            return None;
        }
        self.cursor = step(current, self.unit, 1).ok();
        Some(current)
    }
}

/// Count the whole `unit` steps between two instants, truncated toward zero.
///
/// Month-family counts are not yet full when the end has not reached the
/// start's day-of-month mark.
pub fn diff(start: DateTime<Utc>, end: DateTime<Utc>, unit: StepUnit) -> i64 {
    match unit {
        StepUnit::Days => (end - start).num_days(),
        StepUnit::Weeks => (end - start).num_weeks(),
        StepUnit::Months => whole_months_between(start, end),
        StepUnit::Quarters => whole_months_between(start, end) / 3,
        StepUnit::Years => whole_months_between(start, end) / 12,
    }
}

fn whole_months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    if end < start {
        return -whole_months_between(end, start);
    }
    let mut months = i64::from(end.year() - start.year()) * 12
        + i64::from(end.month() as i32 - start.month() as i32);
    if months > 0 && (end.day(), end.time()) < (start.day(), start.time()) {
        months -= 1;
    }
    months
}

// ── Template rendering ──────────────────────────────────────────────────────

/// Render a display template against an instant.
///
/// The token dialect is the one the front ends store in their format tables:
///
/// - `YYYY` / `YY`: calendar year, four or two digits
/// - `GGGG` / `GG`: ISO week-based year, four or two digits
/// - `MMMM` / `MMM` / `MM`: month name, abbreviation, or two-digit number
/// - `DD`: two-digit day of month
/// - `W`: ISO week number, unpadded
/// - `Q`: quarter number
///
/// Text wrapped in square brackets is copied literally (an unclosed bracket
/// runs to the end of the template); any other character is copied verbatim.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use period_engine::calendar::{render_template, Locale};
///
/// let at = Utc.with_ymd_and_hms(2015, 3, 21, 0, 0, 0).unwrap();
/// assert_eq!(render_template(at, "[KW] W 'GG", Locale::De), "KW 12 '15");
/// assert_eq!(render_template(at, "MMM 'YY", Locale::De), "März '15");
/// ```
pub fn render_template(at: DateTime<Utc>, template: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            match after.find(']') {
                Some(close) => {
                    out.push_str(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(after);
                    rest = "";
                }
            }
        } else if let Some((consumed, rendered)) = render_token(at, rest, locale) {
            out.push_str(&rendered);
            rest = &rest[consumed..];
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }
    }
    out
}

/// Match the longest token at the start of `rest`.
fn render_token(at: DateTime<Utc>, rest: &str, locale: Locale) -> Option<(usize, String)> {
    if rest.starts_with("YYYY") {
        Some((4, format!("{:04}", at.year())))
    } else if rest.starts_with("YY") {
        Some((2, format!("{:02}", at.year().rem_euclid(100))))
    } else if rest.starts_with("GGGG") {
        Some((4, format!("{:04}", iso_week_year(at))))
    } else if rest.starts_with("GG") {
        Some((2, format!("{:02}", iso_week_year(at).rem_euclid(100))))
    } else if rest.starts_with("MMMM") {
        Some((4, locale.month_name(at.month0() as usize).to_string()))
    } else if rest.starts_with("MMM") {
        Some((3, locale.month_abbrev(at.month0() as usize).to_string()))
    } else if rest.starts_with("MM") {
        Some((2, format!("{:02}", at.month())))
    } else if rest.starts_with("DD") {
        Some((2, format!("{:02}", at.day())))
    } else if rest.starts_with('W') {
        Some((1, iso_week_no(at).to_string()))
    } else if rest.starts_with('Q') {
        Some((1, quarter_no(at).to_string()))
    } else {
        None
    }
}
