//! Relative period navigation and period distances.
//!
//! [`relative_period`] answers "two quarters before this date" questions for
//! period pickers; [`period_difference`] counts the whole periods between
//! two instants after snapping both to period starts. Half-years navigate as
//! two quarter steps; totals and year-to-date windows have no position to
//! step from and report [`PeriodError::UnsupportedMode`].

use chrono::{DateTime, Utc};

use crate::calendar::{self, Locale};
use crate::error::{PeriodError, Result};
use crate::expand;
use crate::format;
use crate::mode::{PeriodMode, StepUnit};

/// Default output shape of [`relative_period`].
const RELATIVE_OUT_FORMAT: &str = "YYYY-MM-DD";

/// Resolve the date `offset` periods away from an anchor date.
///
/// Uses today as the anchor when `from` is `None` and renders the result as
/// `YYYY-MM-DD`. See [`relative_period_with`] for the full-control variant.
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for totals and year-to-date,
/// and [`PeriodError::InvalidDate`] when the anchor does not parse.
pub fn relative_period(mode: PeriodMode, offset: i32, from: Option<&str>) -> Result<String> {
    relative_period_with(mode, offset, from, None, Locale::default())
}

/// Resolve the date `offset` periods away from an anchor date.
///
/// A zero offset short-circuits: the anchor string comes back unchanged, in
/// whatever shape it was given. Otherwise the anchor is parsed, stepped by
/// `offset` whole periods (half-years step as two quarters) and rendered
/// with `out_format`.
///
/// # Arguments
///
/// * `mode` - The period granularity to step in
/// * `offset` - Whole periods to move, negative toward the past
/// * `from` - Anchor date string (any shape [`parse_date`](calendar::parse_date)
///   accepts); today when `None`
/// * `out_format` - Render template for the result; `YYYY-MM-DD` when `None`
/// * `locale` - Month-name language for the rendered result
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for totals and year-to-date,
/// [`PeriodError::InvalidDate`] when the anchor does not parse or the step
/// leaves the representable range.
///
/// # Examples
///
/// ```
/// use period_engine::calendar::Locale;
/// use period_engine::mode::PeriodMode;
/// use period_engine::relative::relative_period_with;
///
/// let label = relative_period_with(
///     PeriodMode::Halfyears,
///     1,
///     Some("2015-04-19"),
///     None,
///     Locale::default(),
/// )?;
/// assert_eq!(label, "2015-10-19");
/// # Ok::<(), period_engine::PeriodError>(())
/// ```
pub fn relative_period_with(
    mode: PeriodMode,
    offset: i32,
    from: Option<&str>,
    out_format: Option<&str>,
    locale: Locale,
) -> Result<String> {
    let anchor = from.map_or_else(calendar::current_date, str::to_string);
    if offset == 0 {
        return Ok(anchor);
    }

    let at = calendar::parse_date(&anchor)?;
    let (unit, count) = match mode {
        PeriodMode::Halfyears => (StepUnit::Quarters, offset.saturating_mul(2)),
        _ => (
            mode.step_unit().ok_or(PeriodError::UnsupportedMode(mode))?,
            offset,
        ),
    };
    let stepped = calendar::step(at, unit, count)?;
    Ok(format::label_for(
        stepped,
        out_format.unwrap_or(RELATIVE_OUT_FORMAT),
        locale,
    ))
}

/// Count the whole periods between two instants.
///
/// Both instants are snapped back to the start of their period first, so
/// neighbouring periods are always one apart regardless of where inside
/// them the instants lie.
///
/// # Returns
///
/// The number of whole periods of `mode` from `start` to `end`, truncated
/// toward zero; negative when `end` precedes `start`.
///
/// # Errors
///
/// Returns [`PeriodError::UnsupportedMode`] for half-years, totals and
/// year-to-date.
pub fn period_difference(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    mode: PeriodMode,
) -> Result<i64> {
    let unit = mode.step_unit().ok_or(PeriodError::UnsupportedMode(mode))?;
    let start = expand::set_minimum(start, mode);
    let end = expand::set_minimum(end, mode);
    Ok(calendar::diff(start, end, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_offset_returns_anchor_unchanged() {
        assert_eq!(
            relative_period(PeriodMode::Days, 0, Some("2015-04-05")).unwrap(),
            "2015-04-05"
        );
        // the anchor shape is preserved, not normalized
        assert_eq!(
            relative_period(PeriodMode::Weeks, 0, Some("2015/02/15")).unwrap(),
            "2015/02/15"
        );
        // the short-circuit happens before the mode is inspected
        assert_eq!(
            relative_period(PeriodMode::Total, 0, Some("2015-04-05")).unwrap(),
            "2015-04-05"
        );
    }

    #[test]
    fn test_day_and_week_offsets() {
        assert_eq!(
            relative_period(PeriodMode::Days, 1, Some("2015-04-05")).unwrap(),
            "2015-04-06"
        );
        assert_eq!(
            relative_period(PeriodMode::Days, -5, Some("2015-04-05")).unwrap(),
            "2015-03-31"
        );
        assert_eq!(
            relative_period(PeriodMode::Weeks, 2, Some("2015-02-09")).unwrap(),
            "2015-02-23"
        );
    }

    #[test]
    fn test_month_offsets_clamp_short_months() {
        assert_eq!(
            relative_period(PeriodMode::Months, 1, Some("2015-01-31")).unwrap(),
            "2015-02-28"
        );
        assert_eq!(
            relative_period(PeriodMode::Years, 1, Some("2016-02-29")).unwrap(),
            "2017-02-28"
        );
    }

    #[test]
    fn test_quarter_and_halfyear_offsets() {
        assert_eq!(
            relative_period(PeriodMode::Quarters, -1, Some("2015-04-19")).unwrap(),
            "2015-01-19"
        );
        assert_eq!(
            relative_period(PeriodMode::Halfyears, 1, Some("2015-04-19")).unwrap(),
            "2015-10-19"
        );
        assert_eq!(
            relative_period(PeriodMode::Halfyears, -1, Some("2015-04-19")).unwrap(),
            "2014-10-19"
        );
    }

    #[test]
    fn test_output_format_is_honored() {
        assert_eq!(
            relative_period_with(
                PeriodMode::Days,
                1,
                Some("2015-04-04"),
                Some("DD.MM.YYYY"),
                Locale::De
            )
            .unwrap(),
            "05.04.2015"
        );
        assert_eq!(
            relative_period_with(
                PeriodMode::Months,
                1,
                Some("2015-02-15"),
                Some("MMMM YYYY"),
                Locale::De
            )
            .unwrap(),
            "März 2015"
        );
        assert_eq!(
            relative_period_with(
                PeriodMode::Months,
                1,
                Some("2015-02-15"),
                Some("MMMM YYYY"),
                Locale::En
            )
            .unwrap(),
            "March 2015"
        );
    }

    #[test]
    fn test_window_modes_cannot_step() {
        assert!(matches!(
            relative_period(PeriodMode::Total, 1, Some("2015-04-05")),
            Err(PeriodError::UnsupportedMode(PeriodMode::Total))
        ));
        assert!(matches!(
            relative_period(PeriodMode::Ytd, -1, Some("2015-04-05")),
            Err(PeriodError::UnsupportedMode(PeriodMode::Ytd))
        ));
    }

    #[test]
    fn test_bad_anchor_is_rejected() {
        assert!(matches!(
            relative_period(PeriodMode::Days, 1, Some("garbage")),
            Err(PeriodError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_missing_anchor_falls_back_to_today() {
        let today = relative_period(PeriodMode::Days, 0, None).unwrap();
        assert!(calendar::parse_date(&today).is_ok());
        let tomorrow = relative_period(PeriodMode::Days, 1, None).unwrap();
        assert!(calendar::parse_date(&tomorrow).is_ok());
    }

    #[test]
    fn test_difference_counts_whole_periods() {
        let start = utc(2015, 1, 5);
        let end = utc(2016, 1, 25);
        assert_eq!(period_difference(start, end, PeriodMode::Days).unwrap(), 385);
        assert_eq!(period_difference(start, end, PeriodMode::Weeks).unwrap(), 55);
        assert_eq!(period_difference(start, end, PeriodMode::Months).unwrap(), 12);
        assert_eq!(period_difference(start, end, PeriodMode::Quarters).unwrap(), 4);
        assert_eq!(period_difference(start, end, PeriodMode::Years).unwrap(), 1);
        assert_eq!(period_difference(end, start, PeriodMode::Days).unwrap(), -385);
    }

    #[test]
    fn test_difference_snaps_to_period_starts() {
        // Sunday and the following Monday sit in neighbouring weeks
        assert_eq!(
            period_difference(utc(2015, 2, 15), utc(2015, 2, 16), PeriodMode::Weeks).unwrap(),
            1
        );
        // Jan 31 and Feb 1 sit in neighbouring months
        assert_eq!(
            period_difference(utc(2015, 1, 31), utc(2015, 2, 1), PeriodMode::Months).unwrap(),
            1
        );
    }

    #[test]
    fn test_difference_rejects_window_modes() {
        for mode in [PeriodMode::Halfyears, PeriodMode::Total, PeriodMode::Ytd] {
            assert!(matches!(
                period_difference(utc(2015, 1, 1), utc(2015, 12, 31), mode),
                Err(PeriodError::UnsupportedMode(m)) if m == mode
            ));
        }
    }
}
