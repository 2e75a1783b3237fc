//! Step sequences: the rows a period range unfolds into.
//!
//! A sequence walks an expanded range in whole steps of the mode and emits
//! one [`DateEntry`] per step with its compact label, its epoch-millisecond
//! instant and a group flag the front ends use to draw separators. Only the
//! five stepping modes can generate sequences; half-years, totals and
//! year-to-date windows report [`PeriodError::UnsupportedMode`].

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::calendar::{Locale, StepRange};
use crate::error::{PeriodError, Result};
use crate::format;
use crate::mode::PeriodMode;

/// One step of a period sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateEntry {
    /// Compact label of the step.
    pub key: String,
    /// Step instant as Unix epoch milliseconds.
    pub value: i64,
    /// Whether the step opens a new display group.
    pub is_new_group: bool,
}

/// Whether a step instant opens a new display group.
///
/// Days and weeks group by month (a step on the 1st opens a group), months
/// and quarters group by year, and every year is its own group.
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for modes that do not form
/// sequences.
pub fn is_new_group(at: DateTime<Utc>, mode: PeriodMode) -> Result<bool> {
    match mode {
        PeriodMode::Days | PeriodMode::Weeks => Ok(at.day() == 1),
        PeriodMode::Months | PeriodMode::Quarters => Ok(at.ordinal() == 1),
        PeriodMode::Years => Ok(true),
        PeriodMode::Halfyears | PeriodMode::Total | PeriodMode::Ytd => {
            Err(PeriodError::UnsupportedMode(mode))
        }
    }
}

/// Generate the step sequence of a range, German month names.
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for modes that do not form
/// sequences.
pub fn generate(mode: PeriodMode, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateEntry>> {
    generate_with(mode, start, end, Locale::default())
}

/// Generate the step sequence of a range.
///
/// The range is walked inclusively from `start` in whole steps of the mode;
/// an empty vector comes back when `start > end`. Callers are expected to
/// hand in boundary-expanded instants, as [`Period`](crate::period::Period)
/// does.
///
/// # Arguments
///
/// * `mode` - The period granularity to step in
/// * `start` - First step instant, expected on a period boundary
/// * `end` - Inclusive upper bound of the walk
/// * `locale` - Month-name language for the entry keys
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for modes that do not form
/// sequences.
pub fn generate_with(
    mode: PeriodMode,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    locale: Locale,
) -> Result<Vec<DateEntry>> {
    let unit = mode
        .step_unit()
        .ok_or(PeriodError::UnsupportedMode(mode))?;
    let template = format::short_format(mode);

    let mut entries = Vec::new();
    for at in StepRange::new(start, end, unit) {
        entries.push(DateEntry {
            key: format::label_for(at, template, locale),
            value: at.timestamp_millis(),
            is_new_group: is_new_group(at, mode)?,
        });
    }
    Ok(entries)
}
