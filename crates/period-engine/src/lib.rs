//! # period-engine
//!
//! Calendar period computation for reporting front ends.
//!
//! The engine validates the unit tokens dashboards select granularities
//! with, snaps requested ranges to whole period boundaries, unfolds them
//! into labelled step sequences with checksum-guarded caching, and resolves
//! relative periods and period distances. All computation runs on plain UTC
//! instants with ISO 8601 weeks; labels default to German month names with
//! English as the second language.
//!
//! ## Modules
//!
//! - [`mode`]: the eight period granularities and their stepping units
//! - [`unit`]: unit token grammar, validation and cached format lookups
//! - [`format`]: display template tables and placeholder substitution
//! - [`calendar`]: chrono-based date arithmetic and template rendering
//! - [`expand`]: snapping range ends to period boundaries
//! - [`sequence`]: step sequences with display labels and group flags
//! - [`period`]: the [`Period`] handle with its lazily cached sequence
//! - [`relative`]: relative period navigation and period distances
//! - [`error`]: error types

pub mod calendar;
pub mod error;
pub mod expand;
pub mod format;
pub mod mode;
pub mod period;
pub mod relative;
pub mod sequence;
pub mod unit;

pub use calendar::{
    current_date, days_in_month, from_epoch_ms, halfyear_no, halfyear_no_from_time, is_leap_year,
    iso_week_no, iso_week_no_from_time, iso_week_year, iso_week_year_from_time, parse_date,
    quarter_no, quarter_no_from_time, render_template, Locale,
};
pub use error::{PeriodError, Result};
pub use expand::{expand, set_maximum, set_minimum};
pub use format::{
    group_format, long_display_format, long_format, replace_placeholders, short_format,
    string_for_utc_time, FormatFamily,
};
pub use mode::{modes_for_keys, PeriodMode, StepUnit};
pub use period::Period;
pub use relative::{period_difference, relative_period, relative_period_with};
pub use sequence::{generate, generate_with, is_new_group, DateEntry};
pub use unit::{is_valid_unit, Unit};
