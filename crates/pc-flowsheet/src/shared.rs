//! Shared simulation handle with a structural-edit critical section.

use crate::error::{FlowsheetError, FlowsheetResult};
use crate::integrate::{FlowsheetIntegrator, MergeReport};
use crate::model::Simulation;
use pc_assay::CompoundSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// A simulation shared between a front end and background work.
///
/// Structural edits (merges included) are exclusive: while one is in progress, a merge
/// fails with [`FlowsheetError::IntegrationConflict`] instead of waiting.
#[derive(Debug, Clone, Default)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
    editing: Arc<AtomicBool>,
}

/// Held for the duration of a structural edit; releases the edit flag on drop.
#[derive(Debug)]
pub struct StructuralEditGuard {
    inner: Arc<Mutex<Simulation>>,
    editing: Arc<AtomicBool>,
}

impl StructuralEditGuard {
    /// Run `f` with mutable access to the simulation.
    pub fn edit<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> FlowsheetResult<R> {
        let mut sim = self.inner.lock().map_err(|_| FlowsheetError::Poisoned)?;
        Ok(f(&mut sim))
    }
}

impl Drop for StructuralEditGuard {
    fn drop(&mut self) {
        self.editing.store(false, Ordering::Release);
    }
}

impl SharedSimulation {
    pub fn new(sim: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sim)),
            editing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claim the structural-edit section.
    pub fn begin_structural_edit(&self) -> FlowsheetResult<StructuralEditGuard> {
        if self
            .editing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FlowsheetError::IntegrationConflict {
                what: "another structural edit is in progress".to_string(),
            });
        }
        Ok(StructuralEditGuard {
            inner: Arc::clone(&self.inner),
            editing: Arc::clone(&self.editing),
        })
    }

    pub fn is_editing(&self) -> bool {
        self.editing.load(Ordering::Acquire)
    }

    /// Merge `set` inside the critical section.
    pub fn merge(&self, assay_name: &str, set: &CompoundSet) -> FlowsheetResult<MergeReport> {
        let guard = self.begin_structural_edit().inspect_err(|_| {
            warn!(assay = assay_name, "merge rejected: simulation is being edited");
        })?;
        guard.edit(|sim| FlowsheetIntegrator::merge(sim, assay_name, set))?
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FlowsheetResult<Simulation> {
        let sim = self.inner.lock().map_err(|_| FlowsheetError::Poisoned)?;
        Ok(sim.clone())
    }

    /// Read access without copying.
    pub fn read<R>(&self, f: impl FnOnce(&Simulation) -> R) -> FlowsheetResult<R> {
        let sim = self.inner.lock().map_err(|_| FlowsheetError::Poisoned)?;
        Ok(f(&sim))
    }
}
