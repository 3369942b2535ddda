//! Shared application service layer for petrochar.
//!
//! Front ends (the CLI, or any host embedding the engine) go through this crate for file
//! loading, the characterize → merge → export flow and background execution.

pub mod config;
pub mod error;
pub mod progress;
pub mod service;
pub mod worker;

// Re-export key types for convenience
pub use config::{CharacterizationConfig, load_config};
pub use error::{AppError, AppResult};
pub use progress::{ProgressEvent, ProgressStage};
pub use service::{
    CharacterizationOutcome, CharacterizationRequest, load_assay, load_database,
    load_simulation, run_characterization, run_characterization_with_progress,
    save_simulation,
};
pub use worker::{CharacterizationWorker, WorkerMessage};
