//! The `Period` handle: an expanded range with a cached step sequence.
//!
//! A [`Period`] is built from a mode and a raw start/end pair. Construction
//! snaps both ends to mode boundaries; afterwards the period hands out its
//! step sequence lazily and keeps it until the bounds are reassigned. Change
//! detection runs over a cheap checksum of mode code and epoch seconds, so
//! callers may mutate the bounds freely and simply ask for the values again.

use chrono::{DateTime, Utc};
use log::debug;

use crate::calendar::Locale;
use crate::error::Result;
use crate::expand;
use crate::format;
use crate::mode::PeriodMode;
use crate::sequence::{self, DateEntry};

/// A boundary-expanded reporting range.
#[derive(Debug, Clone)]
pub struct Period {
    mode: PeriodMode,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    values: Option<Vec<DateEntry>>,
    cached_checksum: String,
    cached_locale: Locale,
}

impl Period {
    /// Build a period, snapping `start` and `end` to boundaries of `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use period_engine::mode::PeriodMode;
    /// use period_engine::period::Period;
    ///
    /// let start = Utc.with_ymd_and_hms(2015, 2, 15, 0, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2015, 2, 17, 0, 0, 0).unwrap();
    /// let period = Period::new(PeriodMode::Weeks, start, end);
    /// assert_eq!(period.start(), Utc.with_ymd_and_hms(2015, 2, 9, 0, 0, 0).unwrap());
    /// assert_eq!(period.end(), Utc.with_ymd_and_hms(2015, 2, 22, 0, 0, 0).unwrap());
    /// ```
    pub fn new(mode: PeriodMode, start: DateTime<Utc>, end: DateTime<Utc>) -> Period {
        let (start, end) = expand::expand(start, end, mode);
        let cached_checksum = checksum_for(mode, start, end);
        Period {
            mode,
            start,
            end,
            values: None,
            cached_checksum,
            cached_locale: Locale::default(),
        }
    }

    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Reassign the start instant without snapping it.
    ///
    /// The cached sequence is rebuilt on the next value access.
    pub fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = start;
    }

    /// Reassign the end instant without snapping it.
    ///
    /// The cached sequence is rebuilt on the next value access.
    pub fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = end;
    }

    /// The step sequence of the period, German month names.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::UnsupportedMode`](crate::PeriodError::UnsupportedMode)
    /// for modes that do not form sequences.
    pub fn values(&mut self) -> Result<&[DateEntry]> {
        self.values_with(Locale::default())
    }

    /// The step sequence of the period.
    ///
    /// The sequence is generated on first access and cached; it is rebuilt
    /// when the bounds changed since the last build or when a different
    /// locale is requested.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::UnsupportedMode`](crate::PeriodError::UnsupportedMode)
    /// for modes that do not form sequences.
    pub fn values_with(&mut self, locale: Locale) -> Result<&[DateEntry]> {
        if self.values.is_none() || self.is_dirty() || self.cached_locale != locale {
            let checksum = self.checksum();
            debug!("rebuilding value cache for period {checksum}");
            self.values = Some(sequence::generate_with(
                self.mode, self.start, self.end, locale,
            )?);
            self.cached_checksum = checksum;
            self.cached_locale = locale;
        }
        Ok(self.values.as_deref().unwrap_or_default())
    }

    /// Checksum of the current mode and bounds.
    ///
    /// The shape is `<code>/<start seconds>/<end seconds>`.
    pub fn checksum(&self) -> String {
        checksum_for(self.mode, self.start, self.end)
    }

    /// Whether the bounds changed since the cached sequence was built.
    pub fn is_dirty(&self) -> bool {
        self.cached_checksum != self.checksum()
    }

    /// Whether two periods cover the same mode and bounds.
    ///
    /// Bounds compare at full instant precision, not at the seconds
    /// resolution of the checksum.
    pub fn is_equal(&self, other: &Period) -> bool {
        self.mode == other.mode && self.start == other.start && self.end == other.end
    }

    /// Full label of the whole period, German month names.
    pub fn long_period_label(&self) -> String {
        self.long_period_label_with(Locale::default())
    }

    /// Full label of the whole period, `<start> - <end>`.
    pub fn long_period_label_with(&self, locale: Locale) -> String {
        format!(
            "{} - {}",
            self.long_string_for_start_with(locale),
            self.long_string_for_end_with(locale)
        )
    }

    /// Full label of the start instant, German month names.
    pub fn long_string_for_start(&self) -> String {
        self.long_string_for_start_with(Locale::default())
    }

    /// Full label of the start instant.
    pub fn long_string_for_start_with(&self, locale: Locale) -> String {
        format::label_for(self.start, format::long_format(self.mode), locale)
    }

    /// Full label of the end instant, German month names.
    pub fn long_string_for_end(&self) -> String {
        self.long_string_for_end_with(Locale::default())
    }

    /// Full label of the end instant.
    pub fn long_string_for_end_with(&self, locale: Locale) -> String {
        format::label_for(self.end, format::long_format(self.mode), locale)
    }

    /// Compact display template of the mode.
    pub fn short_string_format(&self) -> &'static str {
        format::short_format(self.mode)
    }

    /// Full display template of the mode.
    pub fn long_string_format(&self) -> &'static str {
        format::long_format(self.mode)
    }

    /// Group-separator template of the mode.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FormatNotFound`](crate::PeriodError::FormatNotFound)
    /// for half-years.
    pub fn group_string_format(&self) -> Result<&'static str> {
        format::group_format(self.mode)
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Period) -> bool {
        self.is_equal(other)
    }
}

impl Eq for Period {}

fn checksum_for(mode: PeriodMode, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{}/{}/{}", mode.code(), start.timestamp(), end.timestamp())
}
