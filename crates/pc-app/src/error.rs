//! Error types for the pc-app service layer.

use pc_assay::CharacterizationError;
use pc_export::ExportError;
use pc_flowsheet::FlowsheetError;
use std::path::PathBuf;

/// Application error wrapping the backend crates' errors behind one message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Characterization failed: {0}")]
    Characterization(#[from] CharacterizationError),

    #[error("Flowsheet integration failed: {0}")]
    Flowsheet(#[from] FlowsheetError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for pc-app operations.
pub type AppResult<T> = Result<T, AppError>;
