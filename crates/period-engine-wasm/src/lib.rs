//! WASM bindings for the period computation engine.
//!
//! Thin wrappers over [`period_engine`] for the browser dashboards.
//! Timestamps cross the boundary as JavaScript numbers (epoch
//! milliseconds); structured results come back as JSON strings in the wire
//! shape the front ends already consume. Labels use the engine's default
//! German month names.

use wasm_bindgen::prelude::*;

use period_engine::{Period, PeriodMode, Unit};

fn ms(time: f64) -> i64 {
    time as i64
}

/// Whether a token is a well-formed unit token.
#[wasm_bindgen]
pub fn is_valid_unit(token: &str) -> bool {
    period_engine::is_valid_unit(token)
}

/// Describe a unit token as a JSON object.
#[wasm_bindgen]
pub fn unit_info(token: &str) -> Result<String, JsError> {
    let unit = Unit::parse(token)?;
    let info = serde_json::json!({
        "id": unit.id(),
        "mode": unit.mode().code(),
        "isTotal": unit.is_total(),
        "isYtd": unit.is_ytd(),
        "isYearly": unit.is_yearly(),
        "shortFormat": unit.short_format(),
        "longFormat": unit.long_format(),
    });
    Ok(info.to_string())
}

/// Mode codes for the given key names as a JSON object; unknown keys are
/// skipped.
#[wasm_bindgen]
pub fn modes_for_keys(keys: Vec<String>) -> Result<String, JsError> {
    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    Ok(serde_json::to_string(&period_engine::modes_for_keys(&keys))?)
}

/// Compact label for a timestamp, via the token's base mode.
#[wasm_bindgen]
pub fn short_string_for_time(token: &str, time: f64) -> Result<String, JsError> {
    Ok(Unit::parse(token)?.short_string_for_time(ms(time))?)
}

/// Full label for a timestamp, via the token's base mode.
#[wasm_bindgen]
pub fn long_string_for_time(token: &str, time: f64) -> Result<String, JsError> {
    Ok(Unit::parse(token)?.long_string_for_time(ms(time))?)
}

/// ISO week number of a timestamp.
#[wasm_bindgen]
pub fn iso_week_no_from_time(time: f64) -> Result<u32, JsError> {
    Ok(period_engine::iso_week_no_from_time(ms(time))?)
}

/// ISO week-based year of a timestamp, two digits when `short` is set.
#[wasm_bindgen]
pub fn iso_week_year_from_time(time: f64, short: bool) -> Result<i32, JsError> {
    Ok(period_engine::iso_week_year_from_time(ms(time), short)?)
}

/// Quarter number (1-4) of a timestamp.
#[wasm_bindgen]
pub fn quarter_no_from_time(time: f64) -> Result<u32, JsError> {
    Ok(period_engine::quarter_no_from_time(ms(time))?)
}

/// Half-year number (1-2) of a timestamp.
#[wasm_bindgen]
pub fn halfyear_no_from_time(time: f64) -> Result<u32, JsError> {
    Ok(period_engine::halfyear_no_from_time(ms(time))?)
}

/// Number of days in a month (1-12).
#[wasm_bindgen]
pub fn days_in_month(year: i32, month: u32) -> Result<u32, JsError> {
    Ok(period_engine::days_in_month(year, month)?)
}

/// Today's date as `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn current_date() -> String {
    period_engine::current_date()
}

/// The date `offset` periods away from `from`, or from today.
#[wasm_bindgen]
pub fn relative_period(mode: &str, offset: i32, from: Option<String>) -> Result<String, JsError> {
    let mode: PeriodMode = mode.parse()?;
    Ok(period_engine::relative_period(mode, offset, from.as_deref())?)
}

/// Whole periods between two timestamps.
#[wasm_bindgen]
pub fn period_difference(start: f64, end: f64, mode: &str) -> Result<i32, JsError> {
    let mode: PeriodMode = mode.parse()?;
    let start = period_engine::from_epoch_ms(ms(start))?;
    let end = period_engine::from_epoch_ms(ms(end))?;
    let diff = period_engine::period_difference(start, end, mode)?;
    i32::try_from(diff).map_err(|_| JsError::new("period difference out of range"))
}

/// The step sequence of an expanded range as a JSON array.
#[wasm_bindgen]
pub fn period_values(mode: &str, start: f64, end: f64) -> Result<String, JsError> {
    let mode: PeriodMode = mode.parse()?;
    let start = period_engine::from_epoch_ms(ms(start))?;
    let end = period_engine::from_epoch_ms(ms(end))?;
    let mut period = Period::new(mode, start, end);
    Ok(serde_json::to_string(period.values()?)?)
}

/// Full `<start> - <end>` label of an expanded range.
#[wasm_bindgen]
pub fn long_period_label(mode: &str, start: f64, end: f64) -> Result<String, JsError> {
    let mode: PeriodMode = mode.parse()?;
    let start = period_engine::from_epoch_ms(ms(start))?;
    let end = period_engine::from_epoch_ms(ms(end))?;
    Ok(Period::new(mode, start, end).long_period_label())
}
