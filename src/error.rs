//! Error taxonomy for the delay estimation engine
//!
//! Invalid input is rejected before a simulation starts. The delay formula
//! itself never validates: NaN and infinity flow out of it unchanged and are
//! refused by the aggregator as [`EngineError::NonFiniteOutcome`].

use thiserror::Error;

/// Errors raised by the estimation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Delay outcome is not finite: {0}")]
    NonFiniteOutcome(f64),

    #[error("Frequency distribution is empty")]
    EmptyDistribution,
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
