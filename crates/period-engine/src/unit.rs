//! Unit tokens: the grammar the front ends select granularities with.
//!
//! A unit token is either a bare mode code (`d`, `w`, `m`, `q`, `h`, `y`,
//! `t` with an optional base-mode suffix, `ytd`) or a counted token such as
//! `d30`, `w53` or `q4`. Counted tokens exist only for the five bounded
//! modes, their count must be at least 1 and at most the mode's maximum
//! (366 days, 53 weeks, 12 months, 4 quarters, 2 half-years).
//!
//! [`is_valid_unit`] answers the membership question; [`Unit`] is the parsed
//! handle the rest of the crate formats through.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

use crate::calendar::Locale;
use crate::error::{PeriodError, Result};
use crate::format;
use crate::mode::PeriodMode;

static BARE_UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:d|w|m|q|h|y|t[dwmqhy]?|ytd)$").expect("valid bare unit pattern"));

// The digit shape deliberately over-matches (d399 passes the pattern); the
// count range check below does the exact bounding.
static COUNTED_UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:d[1-3]?[0-9]?[0-9]|w[1-5]?[0-9]|m1?[0-9]|q[1-4]|h[1-2])$")
        .expect("valid counted unit pattern")
});

/// Whether a token is a well-formed unit token.
///
/// # Examples
///
/// ```
/// use period_engine::unit::is_valid_unit;
///
/// assert!(is_valid_unit("w"));
/// assert!(is_valid_unit("d366"));
/// assert!(is_valid_unit("ytd"));
/// assert!(!is_valid_unit("d0"));
/// assert!(!is_valid_unit("w54"));
/// ```
pub fn is_valid_unit(token: &str) -> bool {
    if COUNTED_UNIT_RE.is_match(token) {
        let Some(mode) = PeriodMode::from_leading_code(token) else {
            return false;
        };
        return token[1..]
            .parse::<u32>()
            .is_ok_and(|count| count >= 1 && mode.max_count().is_some_and(|max| count <= max));
    }
    BARE_UNIT_RE.is_match(token)
}

/// A validated unit token bound to its base mode.
///
/// Format lookups are resolved once per unit and cached, matching how the
/// front ends hold a unit for the lifetime of a report widget.
#[derive(Debug, Clone)]
pub struct Unit {
    id: String,
    mode: PeriodMode,
    short_format: OnceCell<&'static str>,
    long_format: OnceCell<&'static str>,
    long_display_format: OnceCell<&'static str>,
}

impl Unit {
    /// Parse and validate a unit token.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidUnit`] when the token fails the
    /// grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_engine::mode::PeriodMode;
    /// use period_engine::unit::Unit;
    ///
    /// let unit = Unit::parse("q4")?;
    /// assert_eq!(unit.mode(), PeriodMode::Quarters);
    /// # Ok::<(), period_engine::PeriodError>(())
    /// ```
    pub fn parse(token: &str) -> Result<Unit> {
        if !is_valid_unit(token) {
            return Err(PeriodError::InvalidUnit(token.to_string()));
        }
        let mode = PeriodMode::from_leading_code(token)
            .ok_or_else(|| PeriodError::InvalidUnit(token.to_string()))?;
        Ok(Unit {
            id: token.to_string(),
            mode,
            short_format: OnceCell::new(),
            long_format: OnceCell::new(),
            long_display_format: OnceCell::new(),
        })
    }

    /// The token this unit was parsed from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The base mode of the token.
    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    /// Whether this is a total token (`t`, `td`, `tw`, ...).
    pub fn is_total(&self) -> bool {
        self.id.starts_with('t')
    }

    /// Whether this is the year-to-date token.
    pub fn is_ytd(&self) -> bool {
        self.id == "ytd"
    }

    /// Whether the unit spans a year-scoped window.
    ///
    /// Year-to-date is always yearly and totals never are; any other token
    /// is yearly exactly when it carries a count.
    pub fn is_yearly(&self) -> bool {
        if self.is_ytd() {
            return true;
        }
        if self.is_total() {
            return false;
        }
        self.id.len() != 1
    }

    /// Compact display template of the base mode.
    pub fn short_format(&self) -> &'static str {
        *self
            .short_format
            .get_or_init(|| format::short_format(self.mode))
    }

    /// Full display template of the base mode.
    pub fn long_format(&self) -> &'static str {
        *self
            .long_format
            .get_or_init(|| format::long_format(self.mode))
    }

    /// Verbose display template of the base mode.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FormatNotFound`] for half-year units, which
    /// have no long-display template.
    pub fn long_display_format(&self) -> Result<&'static str> {
        self.long_display_format
            .get_or_try_init(|| format::long_display_format(self.mode))
            .map(|fmt| *fmt)
    }

    /// Compact label for an epoch-millisecond timestamp, German month names.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
    pub fn short_string_for_time(&self, time: i64) -> Result<String> {
        self.short_string_for_time_with(time, Locale::default())
    }

    /// Compact label for an epoch-millisecond timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
    pub fn short_string_for_time_with(&self, time: i64, locale: Locale) -> Result<String> {
        format::string_for_utc_time(time, self.short_format(), locale)
    }

    /// Full label for an epoch-millisecond timestamp, German month names.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
    pub fn long_string_for_time(&self, time: i64) -> Result<String> {
        self.long_string_for_time_with(time, Locale::default())
    }

    /// Full label for an epoch-millisecond timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDate`] for out-of-range timestamps.
    pub fn long_string_for_time_with(&self, time: i64, locale: Locale) -> Result<String> {
        format::string_for_utc_time(time, self.long_format(), locale)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Unit) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Unit {
    type Err = PeriodError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tokens_are_valid() {
        for token in ["d", "w", "m", "q", "h", "y", "t", "ytd"] {
            assert!(is_valid_unit(token), "{token} should be valid");
        }
    }

    #[test]
    fn test_total_suffix_tokens_are_valid() {
        for token in ["td", "tw", "tm", "tq", "th", "ty"] {
            assert!(is_valid_unit(token), "{token} should be valid");
        }
        assert!(!is_valid_unit("tz"));
        assert!(!is_valid_unit("t1"));
        assert!(!is_valid_unit("tdd"));
    }

    #[test]
    fn test_counted_tokens_respect_mode_maximums() {
        for token in ["d1", "d5", "d31", "d365", "d366"] {
            assert!(is_valid_unit(token), "{token} should be valid");
        }
        for token in ["w1", "w52", "w53", "m1", "m12", "q1", "q4", "h1", "h2"] {
            assert!(is_valid_unit(token), "{token} should be valid");
        }
        for token in ["d0", "d367", "d999", "w0", "w54", "m0", "m13", "q0", "q5", "h0", "h3"] {
            assert!(!is_valid_unit(token), "{token} should be invalid");
        }
    }

    #[test]
    fn test_uncountable_modes_reject_counts() {
        assert!(!is_valid_unit("y1"));
        assert!(!is_valid_unit("y2015"));
        assert!(!is_valid_unit("ytd1"));
    }

    #[test]
    fn test_malformed_tokens_are_invalid() {
        for token in ["", "x", "dd", "dw", "D", "W53", "d 1", " d", "d1 ", "d-1"] {
            assert!(!is_valid_unit(token), "{token:?} should be invalid");
        }
    }

    #[test]
    fn test_parse_binds_base_mode() {
        assert_eq!(Unit::parse("d366").unwrap().mode(), PeriodMode::Days);
        assert_eq!(Unit::parse("w53").unwrap().mode(), PeriodMode::Weeks);
        assert_eq!(Unit::parse("h2").unwrap().mode(), PeriodMode::Halfyears);
        assert_eq!(Unit::parse("y").unwrap().mode(), PeriodMode::Years);
        assert_eq!(Unit::parse("ty").unwrap().mode(), PeriodMode::Total);
        assert_eq!(Unit::parse("ytd").unwrap().mode(), PeriodMode::Ytd);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        let err = Unit::parse("w54").unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit: 'w54'");
        assert!("d0".parse::<Unit>().is_err());
        assert!("kw12".parse::<Unit>().is_err());
    }

    #[test]
    fn test_total_and_ytd_flags() {
        assert!(Unit::parse("t").unwrap().is_total());
        assert!(Unit::parse("td").unwrap().is_total());
        assert!(!Unit::parse("ytd").unwrap().is_total());
        assert!(Unit::parse("ytd").unwrap().is_ytd());
        assert!(!Unit::parse("y").unwrap().is_ytd());
    }

    #[test]
    fn test_yearly_depends_on_token_shape() {
        assert!(Unit::parse("ytd").unwrap().is_yearly());
        assert!(!Unit::parse("t").unwrap().is_yearly());
        assert!(!Unit::parse("td").unwrap().is_yearly());
        assert!(!Unit::parse("y").unwrap().is_yearly());
        assert!(!Unit::parse("d").unwrap().is_yearly());
        assert!(Unit::parse("d1").unwrap().is_yearly());
        assert!(Unit::parse("q4").unwrap().is_yearly());
        assert!(Unit::parse("h2").unwrap().is_yearly());
    }

    #[test]
    fn test_formats_resolve_through_base_mode() {
        let weeks = Unit::parse("w53").unwrap();
        assert_eq!(weeks.short_format(), "[KW] W 'GG");
        assert_eq!(weeks.long_format(), "[KW] W GGGG");
        assert_eq!(weeks.long_display_format().unwrap(), "[KW] W GGGG");

        let halfyears = Unit::parse("h2").unwrap();
        assert_eq!(halfyears.short_format(), "[H%H%] 'YY");
        assert!(halfyears.long_display_format().is_err());
        // lookup failure is reported again on the next call
        assert!(halfyears.long_display_format().is_err());
    }

    #[test]
    fn test_strings_for_time() {
        // 2015-03-21
        let time = 1_426_951_620_000;
        let weeks = Unit::parse("w").unwrap();
        assert_eq!(weeks.short_string_for_time(time).unwrap(), "KW 12 '15");
        assert_eq!(weeks.long_string_for_time(time).unwrap(), "KW 12 2015");

        let months = Unit::parse("m").unwrap();
        assert_eq!(months.short_string_for_time(time).unwrap(), "März '15");
        assert_eq!(
            months.short_string_for_time_with(time, Locale::En).unwrap(),
            "Mar '15"
        );

        let total = Unit::parse("t").unwrap();
        assert_eq!(total.short_string_for_time(time).unwrap(), "");
        assert_eq!(weeks.short_string_for_time(0).unwrap(), "");
    }

    #[test]
    fn test_equality_is_by_token() {
        assert_eq!(Unit::parse("d1").unwrap(), Unit::parse("d1").unwrap());
        assert_ne!(Unit::parse("d1").unwrap(), Unit::parse("d2").unwrap());
        assert_eq!(Unit::parse("ytd").unwrap().to_string(), "ytd");
    }
}
