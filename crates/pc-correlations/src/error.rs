//! Correlation errors.

use pc_core::PcError;
use thiserror::Error;

/// Result type for correlation evaluation.
pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// Errors raised by the correlation library.
///
/// Both variants mean the same thing to callers: the method cannot be trusted for the
/// given input, so no property value is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Input outside the validated domain of a method.
    #[error(
        "{method}: {quantity} = {value} is outside the validated range [{min}, {max}]"
    )]
    Domain {
        method: String,
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Method produced a non-physical or non-finite result.
    #[error("{method}: non-physical {quantity} = {value}")]
    NonPhysical {
        method: String,
        quantity: &'static str,
        value: f64,
    },
}

impl CorrelationError {
    /// Name and version of the method that rejected the input.
    pub fn method(&self) -> &str {
        match self {
            CorrelationError::Domain { method, .. } => method,
            CorrelationError::NonPhysical { method, .. } => method,
        }
    }
}

impl From<CorrelationError> for PcError {
    fn from(err: CorrelationError) -> Self {
        match err {
            CorrelationError::Domain { quantity, .. } => PcError::InvalidArg { what: quantity },
            CorrelationError::NonPhysical { quantity, .. } => PcError::Invariant { what: quantity },
        }
    }
}
