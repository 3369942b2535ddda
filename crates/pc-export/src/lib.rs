//! pc-export: JSON compound database.
//!
//! One file holds a versioned schema header and a list of constant-property records keyed
//! by compound name. Exports create the file on first use and append afterwards.

pub mod schema;
pub mod store;

use std::path::PathBuf;

pub use schema::{CompoundDatabase, SCHEMA_NAME, SCHEMA_VERSION};
pub use store::{CompoundStore, ExportOptions, ExportSummary};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error: {what}")]
    Schema { what: String },

    /// JSON cannot carry NaN or infinity, so such a record would not load back.
    #[error("Record '{name}' has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },
}
