use crate::model::PhaseKind;
use thiserror::Error;

pub type FlowsheetResult<T> = Result<T, FlowsheetError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowsheetError {
    /// Another structural edit holds the simulation.
    #[error("Integration conflict: {what}")]
    IntegrationConflict { what: String },

    #[error("Invalid compound set: {what}")]
    InvalidCompoundSet { what: String },

    #[error("Stream '{stream}' has no {phase} phase")]
    MissingPhase { stream: String, phase: PhaseKind },

    #[error("Simulation lock poisoned by a panicked writer")]
    Poisoned,
}
