//! Characterize → merge → export orchestration and file loading.

use std::path::Path;
use std::time::Instant;

use pc_assay::{
    AssaySpec, BulkAverages, CharacterizationError, CompoundSet, ShapeParams,
    characterize_with_progress, characterize_with_shape, compound_set_fingerprint,
};
use pc_export::{CompoundDatabase, CompoundStore, ExportSummary};
use pc_flowsheet::{MergeReport, SharedSimulation, Simulation};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::CharacterizationConfig;
use crate::error::{AppError, AppResult};
use crate::progress::{ProgressEvent, ProgressStage};

/// Request to characterize one assay into a simulation.
pub struct CharacterizationRequest<'a> {
    pub spec: &'a AssaySpec,
    /// Append the generated records to this compound database after the merge.
    pub export_path: Option<&'a Path>,
    /// On a convergence failure, continue with the closest shape found.
    pub accept_closest: bool,
}

/// Everything a front end reports after a characterization.
#[derive(Debug, Clone)]
pub struct CharacterizationOutcome {
    pub compounds: CompoundSet,
    pub shape: ShapeParams,
    pub averages: BulkAverages,
    pub iterations: usize,
    /// The bulk targets were not met and the closest shape was used.
    pub accepted_closest: bool,
    pub created_count: usize,
    pub merge: MergeReport,
    pub fingerprint: String,
    pub export: Option<ExportSummary>,
    /// Export failures are reported here; the merge stands regardless.
    pub export_error: Option<String>,
}

fn emit(
    progress_cb: &mut Option<&mut dyn FnMut(ProgressEvent)>,
    stage: ProgressStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(ProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
        });
    }
}

/// Characterize, merge and optionally export.
pub fn run_characterization(
    request: &CharacterizationRequest,
    simulation: &SharedSimulation,
    config: &CharacterizationConfig,
) -> AppResult<CharacterizationOutcome> {
    run_characterization_with_progress(request, simulation, config, None)
}

/// Same as [`run_characterization`], streaming progress events.
///
/// The simulation is only touched once a compound set exists: any characterization error
/// returns before the merge.
pub fn run_characterization_with_progress(
    request: &CharacterizationRequest,
    simulation: &SharedSimulation,
    config: &CharacterizationConfig,
    mut progress_cb: Option<&mut dyn FnMut(ProgressEvent)>,
) -> AppResult<CharacterizationOutcome> {
    let started = Instant::now();
    config.validate()?;
    let spec = request.spec;
    let options = config.options();

    let characterized = characterize_with_progress(spec, &options, |stage| {
        emit(&mut progress_cb, stage.into(), started, Some(stage.to_string()));
    });
    let (result, accepted_closest) = match characterized {
        Ok(result) => (result, false),
        Err(CharacterizationError::TargetConvergence {
            closest,
            achieved,
            iterations,
            ..
        }) if request.accept_closest => {
            warn!(assay = %spec.name, %closest, %achieved, "accepting closest shape");
            emit(
                &mut progress_cb,
                ProgressStage::AcceptingClosest,
                started,
                Some(format!("targets not met, using {closest}")),
            );
            let mut result = characterize_with_shape(spec, closest, &options)?;
            result.iterations = iterations;
            (result, true)
        }
        Err(err) => return Err(err.into()),
    };

    emit(
        &mut progress_cb,
        ProgressStage::Merging,
        started,
        Some(format!("merging {} compounds", result.compounds.len())),
    );
    let merge = simulation.merge(&spec.name, &result.compounds)?;
    let fingerprint = compound_set_fingerprint(&result.compounds);

    let (export, export_error) = match request.export_path {
        Some(path) => {
            emit(
                &mut progress_cb,
                ProgressStage::Exporting,
                started,
                Some(format!("exporting to {}", path.display())),
            );
            let store = CompoundStore::new(path);
            match store.export(result.compounds.constant_properties(), config.export) {
                Ok(summary) => (Some(summary), None),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "export failed; merge kept");
                    (None, Some(err.to_string()))
                }
            }
        }
        None => (None, None),
    };

    emit(&mut progress_cb, ProgressStage::Completed, started, None);
    info!(
        assay = %spec.name,
        created = merge.created_count(),
        %fingerprint,
        "characterization merged"
    );

    Ok(CharacterizationOutcome {
        created_count: merge.created_count(),
        compounds: result.compounds,
        shape: result.shape,
        averages: result.averages,
        iterations: result.iterations,
        accepted_closest,
        merge,
        fingerprint,
        export,
        export_error,
    })
}

fn read_structured<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| AppError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Load an assay from YAML, or JSON when the extension is `.json`.
pub fn load_assay(path: &Path) -> AppResult<AssaySpec> {
    let spec: AssaySpec = read_structured(path)?;
    spec.validate()?;
    Ok(spec)
}

/// Load a simulation from YAML or JSON.
pub fn load_simulation(path: &Path) -> AppResult<Simulation> {
    read_structured(path)
}

/// Save a simulation as YAML, or JSON when the extension is `.json`.
pub fn save_simulation(path: &Path, simulation: &Simulation) -> AppResult<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let content = if is_json {
        serde_json::to_string_pretty(simulation).map_err(|e| e.to_string())
    } else {
        serde_yaml::to_string(simulation).map_err(|e| e.to_string())
    }
    .map_err(|message| AppError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Load and validate a compound database.
pub fn load_database(path: &Path) -> AppResult<CompoundDatabase> {
    Ok(CompoundStore::new(path).load()?)
}
