//! Error types for period-engine operations.

use thiserror::Error;

use crate::format::FormatFamily;
use crate::mode::PeriodMode;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("Invalid unit: '{0}'")]
    InvalidUnit(String),

    #[error("Invalid period mode: '{0}'")]
    InvalidMode(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No {family} format defined for period mode '{mode}'")]
    FormatNotFound {
        /// The mode the lookup was for.
        mode: PeriodMode,
        /// The template family that has no entry for it.
        family: FormatFamily,
    },

    #[error("Period mode '{0}' has no stepping unit")]
    UnsupportedMode(PeriodMode),
}

pub type Result<T> = std::result::Result<T, PeriodError>;
