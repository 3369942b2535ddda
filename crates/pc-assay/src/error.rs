//! Characterization errors.

use crate::compound::BulkAverages;
use crate::distribution::ShapeParams;
use crate::spec::BulkTargets;
use pc_core::PcError;
use pc_correlations::CorrelationError;
use thiserror::Error;

/// Result type for characterization.
pub type CharacterizationResult<T> = Result<T, CharacterizationError>;

/// Errors raised while generating a compound set. None of them touches a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CharacterizationError {
    /// Bad compound count, anchors or shape parameters.
    #[error("Invalid distribution: {what}")]
    InvalidDistribution { what: String },

    /// A cut fell outside the validated range of a correlation.
    #[error("Correlation domain error: {0}")]
    CorrelationDomain(#[from] CorrelationError),

    /// Bulk targets still unmet when the iteration bound was reached.
    #[error(
        "Bulk targets not met after {iterations} iterations (target {targets}, achieved {achieved})"
    )]
    TargetConvergence {
        targets: BulkTargets,
        achieved: BulkAverages,
        closest: ShapeParams,
        iterations: usize,
    },

    /// Compound viscosity lines could not be scaled onto the bulk readings.
    #[error("Viscosity fit failed: {what}")]
    ViscosityFit { what: String },
}

impl CharacterizationError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        CharacterizationError::InvalidDistribution { what: what.into() }
    }

    pub(crate) fn viscosity(what: impl Into<String>) -> Self {
        CharacterizationError::ViscosityFit { what: what.into() }
    }
}

impl From<PcError> for CharacterizationError {
    fn from(err: PcError) -> Self {
        CharacterizationError::InvalidDistribution {
            what: err.to_string(),
        }
    }
}
