//! Merge a characterized compound set into a simulation.

use crate::error::{FlowsheetError, FlowsheetResult};
use crate::model::{MaterialStream, PhaseKind, SimObject, Simulation};
use pc_assay::CompoundSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What a merge changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    pub stream_id: String,
    pub stream_tag: String,
    /// Compounds newly added to the registry.
    pub created: Vec<String>,
    /// Compounds whose names were already registered; the existing records are kept.
    pub already_present: Vec<String>,
}

impl MergeReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

pub struct FlowsheetIntegrator;

impl FlowsheetIntegrator {
    /// Merge `set` into `sim` and add a stream tagged `assay_name` carrying its composition.
    ///
    /// Runs against a staged copy; `sim` is replaced only when every step succeeds.
    pub fn merge(
        sim: &mut Simulation,
        assay_name: &str,
        set: &CompoundSet,
    ) -> FlowsheetResult<MergeReport> {
        let mut staged = sim.clone();
        let report = Self::apply(&mut staged, assay_name, set)?;
        *sim = staged;
        info!(
            stream = %report.stream_tag,
            created = report.created.len(),
            already_present = report.already_present.len(),
            "merged compound set"
        );
        Ok(report)
    }

    fn apply(
        sim: &mut Simulation,
        assay_name: &str,
        set: &CompoundSet,
    ) -> FlowsheetResult<MergeReport> {
        if assay_name.trim().is_empty() {
            return Err(FlowsheetError::InvalidCompoundSet {
                what: "assay name is empty".to_string(),
            });
        }
        if set.is_empty() {
            return Err(FlowsheetError::InvalidCompoundSet {
                what: "no compounds to merge".to_string(),
            });
        }

        // registry and selection
        let mut created = Vec::new();
        let mut already_present = Vec::new();
        for compound in set {
            if sim.register_compound(&compound.constants) {
                created.push(compound.name.clone());
            } else {
                already_present.push(compound.name.clone());
            }
            sim.select_compound(&compound.name);
        }

        // a name that was already registered keeps its registered record
        let records = set
            .iter()
            .map(|compound| {
                sim.available_compounds
                    .get(&compound.name)
                    .cloned()
                    .ok_or_else(|| FlowsheetError::InvalidCompoundSet {
                        what: format!("{} missing from the registry", compound.name),
                    })
            })
            .collect::<FlowsheetResult<Vec<_>>>()?;

        // existing streams: every phase gets every new compound
        for stream in sim.material_streams_mut() {
            if stream.primary().is_none() {
                return Err(FlowsheetError::MissingPhase {
                    stream: stream.tag.clone(),
                    phase: PhaseKind::PRIMARY,
                });
            }
            for phase in &mut stream.phases {
                for record in &records {
                    phase.ensure_compound(record);
                }
            }
        }
        debug!(streams = sim.material_streams().count(), "extended existing streams");

        // new stream with all selected compounds
        let mut stream = MaterialStream::new(assay_name);
        let selected: Vec<_> = sim.selected_records().cloned().collect();
        for phase in &mut stream.phases {
            for record in &selected {
                phase.ensure_compound(record);
            }
        }

        // mass fractions follow the records the stream carries
        let wtotal: f64 = set
            .iter()
            .zip(&records)
            .map(|(c, r)| c.mole_fraction * r.molar_weight)
            .sum();
        if !(wtotal.is_finite() && wtotal > 0.0) {
            return Err(FlowsheetError::InvalidCompoundSet {
                what: format!("non-physical mass basis {wtotal}"),
            });
        }

        let stream_tag = stream.tag.clone();
        let primary = stream
            .phase_mut(PhaseKind::PRIMARY)
            .ok_or_else(|| FlowsheetError::MissingPhase {
                stream: stream_tag.clone(),
                phase: PhaseKind::PRIMARY,
            })?;
        for entry in &mut primary.compounds {
            entry.mole_fraction = 0.0;
            entry.mass_fraction = 0.0;
        }
        for compound in set {
            let entry = primary.compound_mut(&compound.name).ok_or_else(|| {
                FlowsheetError::InvalidCompoundSet {
                    what: format!("{} missing from the new stream", compound.name),
                }
            })?;
            entry.mole_fraction = compound.mole_fraction;
            entry.mass_fraction = compound.mole_fraction * entry.constants.molar_weight / wtotal;
        }

        let stream_id = stream.id.clone();
        sim.add_object(SimObject::Material(stream));

        Ok(MergeReport {
            stream_id,
            stream_tag,
            created,
            already_present,
        })
    }
}
