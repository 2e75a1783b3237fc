//! The eight period modes and their stepping units.
//!
//! Modes travel between the front ends and the data warehouse as one of the
//! code strings `d`, `w`, `m`, `q`, `h`, `y`, `t` and `ytd`. Inside the crate
//! they are a closed enum so that every table-driven function matches
//! exhaustively instead of dispatching on string prefixes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeriodError;

/// A reporting period granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodMode {
    /// Single days (`d`).
    #[serde(rename = "d")]
    Days,
    /// ISO weeks, Monday through Sunday (`w`).
    #[serde(rename = "w")]
    Weeks,
    /// Calendar months (`m`).
    #[serde(rename = "m")]
    Months,
    /// Calendar quarters (`q`).
    #[serde(rename = "q")]
    Quarters,
    /// Calendar half-years (`h`).
    #[serde(rename = "h")]
    Halfyears,
    /// Calendar years (`y`).
    #[serde(rename = "y")]
    Years,
    /// A running total over the whole reporting range (`t`).
    #[serde(rename = "t")]
    Total,
    /// Year-to-date window (`ytd`).
    #[serde(rename = "ytd")]
    Ytd,
}

/// The calendar unit a sequence steps by.
///
/// Only five of the eight modes step natively; half-years, totals and
/// year-to-date windows have no [`StepUnit`] of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
}

impl PeriodMode {
    /// All modes, in wire-table order.
    pub const ALL: [PeriodMode; 8] = [
        PeriodMode::Days,
        PeriodMode::Weeks,
        PeriodMode::Months,
        PeriodMode::Quarters,
        PeriodMode::Halfyears,
        PeriodMode::Years,
        PeriodMode::Total,
        PeriodMode::Ytd,
    ];

    /// The wire code of the mode.
    pub fn code(self) -> &'static str {
        match self {
            PeriodMode::Days => "d",
            PeriodMode::Weeks => "w",
            PeriodMode::Months => "m",
            PeriodMode::Quarters => "q",
            PeriodMode::Halfyears => "h",
            PeriodMode::Years => "y",
            PeriodMode::Total => "t",
            PeriodMode::Ytd => "ytd",
        }
    }

    /// The upper-case key name of the mode, as used in mode tables.
    pub fn key(self) -> &'static str {
        match self {
            PeriodMode::Days => "DAYS",
            PeriodMode::Weeks => "WEEKS",
            PeriodMode::Months => "MONTHS",
            PeriodMode::Quarters => "QUARTERS",
            PeriodMode::Halfyears => "HALFYEARS",
            PeriodMode::Years => "YEARS",
            PeriodMode::Total => "TOTAL",
            PeriodMode::Ytd => "YTD",
        }
    }

    /// Look a mode up by its exact wire code.
    pub fn from_code(code: &str) -> Option<PeriodMode> {
        match code {
            "d" => Some(PeriodMode::Days),
            "w" => Some(PeriodMode::Weeks),
            "m" => Some(PeriodMode::Months),
            "q" => Some(PeriodMode::Quarters),
            "h" => Some(PeriodMode::Halfyears),
            "y" => Some(PeriodMode::Years),
            "t" => Some(PeriodMode::Total),
            "ytd" => Some(PeriodMode::Ytd),
            _ => None,
        }
    }

    /// Resolve the mode a unit token is based on.
    ///
    /// `ytd` matches exactly; any other token resolves through its leading
    /// character, so counted tokens (`d30`, `w53`) and total variants (`td`)
    /// land on their base mode.
    pub fn from_leading_code(token: &str) -> Option<PeriodMode> {
        if token == "ytd" {
            return Some(PeriodMode::Ytd);
        }
        match token.as_bytes().first() {
            Some(b'd') => Some(PeriodMode::Days),
            Some(b'w') => Some(PeriodMode::Weeks),
            Some(b'm') => Some(PeriodMode::Months),
            Some(b'q') => Some(PeriodMode::Quarters),
            Some(b'h') => Some(PeriodMode::Halfyears),
            Some(b'y') => Some(PeriodMode::Years),
            Some(b't') => Some(PeriodMode::Total),
            _ => None,
        }
    }

    /// The largest count a counted unit token of this mode may carry.
    ///
    /// Years, totals and year-to-date tokens never carry a count.
    pub fn max_count(self) -> Option<u32> {
        match self {
            PeriodMode::Days => Some(366),
            PeriodMode::Weeks => Some(53),
            PeriodMode::Months => Some(12),
            PeriodMode::Quarters => Some(4),
            PeriodMode::Halfyears => Some(2),
            PeriodMode::Years | PeriodMode::Total | PeriodMode::Ytd => None,
        }
    }

    /// The native stepping unit of the mode, if it has one.
    pub fn step_unit(self) -> Option<StepUnit> {
        match self {
            PeriodMode::Days => Some(StepUnit::Days),
            PeriodMode::Weeks => Some(StepUnit::Weeks),
            PeriodMode::Months => Some(StepUnit::Months),
            PeriodMode::Quarters => Some(StepUnit::Quarters),
            PeriodMode::Years => Some(StepUnit::Years),
            PeriodMode::Halfyears | PeriodMode::Total | PeriodMode::Ytd => None,
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PeriodMode {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeriodMode::from_code(s).ok_or_else(|| PeriodError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for StepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepUnit::Days => "days",
            StepUnit::Weeks => "weeks",
            StepUnit::Months => "months",
            StepUnit::Quarters => "quarters",
            StepUnit::Years => "years",
        };
        f.write_str(name)
    }
}

/// Filter a list of mode key names down to a key ⇒ code map.
///
/// Unknown keys are skipped silently, mirroring how the front ends request
/// the subset of modes a report supports.
pub fn modes_for_keys(keys: &[&str]) -> BTreeMap<&'static str, &'static str> {
    let mut modes = BTreeMap::new();
    for key in keys {
        if let Some(mode) = PeriodMode::ALL.iter().find(|mode| mode.key() == *key) {
            modes.insert(mode.key(), mode.code());
        }
    }
    modes
}
