//! Display format tables and label rendering.
//!
//! Every period mode carries up to four format templates, one per
//! [`FormatFamily`]. The templates use the token dialect of
//! [`calendar::render_template`] plus two placeholders that survive
//! rendering inside bracket literals and are substituted afterwards:
//! `%Q%` (quarter number) and `%H%` (half-year number), first occurrence
//! each.
//!
//! The group and long-display tables have no entry for half-years; looking
//! one up reports [`PeriodError::FormatNotFound`] instead of guessing a
//! template.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::calendar::{self, Locale};
use crate::error::{PeriodError, Result};
use crate::mode::PeriodMode;

// ── Format families ─────────────────────────────────────────────────────────

/// The four template tables a period mode can resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    /// Compact labels for axis ticks and table cells.
    Short,
    /// Full labels for tooltips and headers.
    Long,
    /// Labels for group separators in date sequences.
    Group,
    /// Verbose labels for detail views.
    LongDisplay,
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatFamily::Short => "short",
            FormatFamily::Long => "long",
            FormatFamily::Group => "group",
            FormatFamily::LongDisplay => "long display",
        };
        f.write_str(name)
    }
}

// ── Template tables ─────────────────────────────────────────────────────────

/// Compact template for a period mode.
pub fn short_format(mode: PeriodMode) -> &'static str {
    match mode {
        PeriodMode::Days => "YYYY-MM-DD",
        PeriodMode::Weeks => "[KW] W 'GG",
        PeriodMode::Months => "MMM 'YY",
        PeriodMode::Quarters => "[Q.%Q%] 'YY",
        PeriodMode::Halfyears => "[H%H%] 'YY",
        PeriodMode::Years => "YYYY",
        PeriodMode::Total => "",
        PeriodMode::Ytd => "[YTD] YY",
    }
}

/// Full template for a period mode.
pub fn long_format(mode: PeriodMode) -> &'static str {
    match mode {
        PeriodMode::Days => "YYYY-MM-DD",
        PeriodMode::Weeks => "[KW] W GGGG",
        PeriodMode::Months => "MMMM YYYY",
        PeriodMode::Quarters => "[Q%Q%] YYYY",
        PeriodMode::Halfyears => "[H%H%] YYYY",
        PeriodMode::Years => "YYYY",
        PeriodMode::Total => "",
        PeriodMode::Ytd => "[YTD] YYYY",
    }
}

/// Group-separator template for a period mode.
///
/// # Errors
///
/// Returns [`PeriodError::FormatNotFound`] for half-years, which have no
/// group template.
pub fn group_format(mode: PeriodMode) -> Result<&'static str> {
    match mode {
        PeriodMode::Days => Ok("DD. MMMM"),
        PeriodMode::Weeks => Ok("[KW] W GGGG"),
        PeriodMode::Months => Ok("MMMM YYYY"),
        PeriodMode::Quarters => Ok("[Quartal] Q YYYY"),
        PeriodMode::Halfyears => Err(PeriodError::FormatNotFound {
            mode,
            family: FormatFamily::Group,
        }),
        PeriodMode::Years => Ok("YYYY"),
        PeriodMode::Total => Ok(""),
        PeriodMode::Ytd => Ok("[YTD] YYYY"),
    }
}

/// Verbose template for a period mode.
///
/// # Errors
///
/// Returns [`PeriodError::FormatNotFound`] for half-years, which have no
/// long-display template.
pub fn long_display_format(mode: PeriodMode) -> Result<&'static str> {
    match mode {
        PeriodMode::Days => Ok("DD.MM.YYYY"),
        PeriodMode::Weeks => Ok("[KW] W GGGG"),
        PeriodMode::Months => Ok("MMMM YYYY"),
        PeriodMode::Quarters => Ok("[Q.]Q YYYY"),
        PeriodMode::Halfyears => Err(PeriodError::FormatNotFound {
            mode,
            family: FormatFamily::LongDisplay,
        }),
        PeriodMode::Years => Ok("YYYY"),
        PeriodMode::Total => Ok(""),
        PeriodMode::Ytd => Ok("[YTD] YYYY"),
    }
}

// ── Label rendering ─────────────────────────────────────────────────────────

/// Substitute the first `%Q%` and `%H%` occurrence in a rendered label.
pub fn replace_placeholders(label: &str, at: DateTime<Utc>) -> String {
    label
        .replacen("%Q%", &calendar::quarter_no(at).to_string(), 1)
        .replacen("%H%", &calendar::halfyear_no(at).to_string(), 1)
}

/// Render a template against an instant and substitute placeholders.
pub fn label_for(at: DateTime<Utc>, template: &str, locale: Locale) -> String {
    replace_placeholders(&calendar::render_template(at, template, locale), at)
}

/// Render a template against an epoch-millisecond timestamp.
///
/// A timestamp of exactly zero is the front ends' "no value" sentinel and
/// renders as the empty string.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
pub fn string_for_utc_time(time: i64, template: &str, locale: Locale) -> Result<String> {
    if time == 0 {
        return Ok(String::new());
    }
    Ok(label_for(calendar::from_epoch_ms(time)?, template, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        // 2015-04-19, second quarter, first half-year
        Utc.with_ymd_and_hms(2015, 4, 19, 15, 30, 12).unwrap()
    }

    #[test]
    fn test_short_table() {
        assert_eq!(short_format(PeriodMode::Days), "YYYY-MM-DD");
        assert_eq!(short_format(PeriodMode::Weeks), "[KW] W 'GG");
        assert_eq!(short_format(PeriodMode::Months), "MMM 'YY");
        assert_eq!(short_format(PeriodMode::Quarters), "[Q.%Q%] 'YY");
        assert_eq!(short_format(PeriodMode::Halfyears), "[H%H%] 'YY");
        assert_eq!(short_format(PeriodMode::Years), "YYYY");
        assert_eq!(short_format(PeriodMode::Total), "");
        assert_eq!(short_format(PeriodMode::Ytd), "[YTD] YY");
    }

    #[test]
    fn test_long_table() {
        assert_eq!(long_format(PeriodMode::Weeks), "[KW] W GGGG");
        assert_eq!(long_format(PeriodMode::Months), "MMMM YYYY");
        assert_eq!(long_format(PeriodMode::Quarters), "[Q%Q%] YYYY");
        assert_eq!(long_format(PeriodMode::Halfyears), "[H%H%] YYYY");
        assert_eq!(long_format(PeriodMode::Total), "");
    }

    #[test]
    fn test_group_table_has_no_halfyears() {
        assert_eq!(group_format(PeriodMode::Days).unwrap(), "DD. MMMM");
        assert_eq!(group_format(PeriodMode::Quarters).unwrap(), "[Quartal] Q YYYY");
        assert!(matches!(
            group_format(PeriodMode::Halfyears),
            Err(PeriodError::FormatNotFound {
                mode: PeriodMode::Halfyears,
                family: FormatFamily::Group,
            })
        ));
    }

    #[test]
    fn test_long_display_table_has_no_halfyears() {
        assert_eq!(long_display_format(PeriodMode::Days).unwrap(), "DD.MM.YYYY");
        assert_eq!(long_display_format(PeriodMode::Quarters).unwrap(), "[Q.]Q YYYY");
        assert!(matches!(
            long_display_format(PeriodMode::Halfyears),
            Err(PeriodError::FormatNotFound {
                mode: PeriodMode::Halfyears,
                family: FormatFamily::LongDisplay,
            })
        ));
    }

    #[test]
    fn test_format_not_found_message() {
        let err = group_format(PeriodMode::Halfyears).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No group format defined for period mode 'h'"
        );
    }

    #[test]
    fn test_placeholders_substitute_first_occurrence_only() {
        assert_eq!(replace_placeholders("Q.%Q%", anchor()), "Q.2");
        assert_eq!(replace_placeholders("H%H%", anchor()), "H1");
        assert_eq!(replace_placeholders("%Q% and %Q%", anchor()), "2 and %Q%");
        assert_eq!(replace_placeholders("%H%%H%", anchor()), "1%H%");
        assert_eq!(replace_placeholders("plain", anchor()), "plain");
    }

    #[test]
    fn test_labels_render_and_substitute() {
        assert_eq!(label_for(anchor(), short_format(PeriodMode::Quarters), Locale::De), "Q.2 '15");
        assert_eq!(label_for(anchor(), short_format(PeriodMode::Halfyears), Locale::De), "H1 '15");
        assert_eq!(label_for(anchor(), long_format(PeriodMode::Quarters), Locale::De), "Q2 2015");
        assert_eq!(label_for(anchor(), long_format(PeriodMode::Halfyears), Locale::De), "H1 2015");
        assert_eq!(label_for(anchor(), short_format(PeriodMode::Ytd), Locale::De), "YTD 15");
    }

    #[test]
    fn test_labels_for_march_timestamp() {
        // 2015-03-21
        let time = 1_426_951_620_000;
        assert_eq!(
            string_for_utc_time(time, short_format(PeriodMode::Weeks), Locale::De).unwrap(),
            "KW 12 '15"
        );
        assert_eq!(
            string_for_utc_time(time, short_format(PeriodMode::Months), Locale::De).unwrap(),
            "März '15"
        );
        assert_eq!(
            string_for_utc_time(time, short_format(PeriodMode::Quarters), Locale::De).unwrap(),
            "Q.1 '15"
        );
        assert_eq!(
            string_for_utc_time(time, short_format(PeriodMode::Months), Locale::En).unwrap(),
            "Mar '15"
        );
    }

    #[test]
    fn test_zero_time_renders_empty() {
        assert_eq!(
            string_for_utc_time(0, short_format(PeriodMode::Days), Locale::De).unwrap(),
            ""
        );
    }

    #[test]
    fn test_out_of_range_time_is_rejected() {
        assert!(string_for_utc_time(i64::MAX, "YYYY", Locale::De).is_err());
    }
}
