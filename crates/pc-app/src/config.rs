//! Run configuration.

use crate::error::{AppError, AppResult};
use pc_assay::{CharacterizationOptions, SolverOptions};
use pc_export::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every characterization a front end runs.
///
/// ```yaml
/// solver:
///   max_iterations: 200
///   rel_tol: 1.0e-5
/// parallel: true
/// export:
///   replace_existing: false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterizationConfig {
    pub solver: SolverOptions,
    pub parallel: bool,
    pub export: ExportOptions,
}

impl CharacterizationConfig {
    pub fn options(&self) -> CharacterizationOptions {
        CharacterizationOptions {
            solver: self.solver,
            parallel: self.parallel,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.solver.max_iterations == 0 {
            return Err(AppError::InvalidInput(
                "solver.max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.solver.rel_tol.is_finite() && self.solver.rel_tol > 0.0) {
            return Err(AppError::InvalidInput(format!(
                "solver.rel_tol must be positive, got {}",
                self.solver.rel_tol
            )));
        }
        Ok(())
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<CharacterizationConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: CharacterizationConfig =
        serde_yaml::from_str(&content).map_err(|e| AppError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
