//! Pseudo-compound assembly: constants, names and mole fractions per cut.

use crate::compound::{CompoundSet, PseudoCompound, renormalize};
use crate::error::{CharacterizationError, CharacterizationResult};
use pc_correlations::{
    ConstantPropertySet, PropertyTriple, SampleType, ViscosityReference, estimate,
};
use rayon::prelude::*;
use tracing::{debug, warn};

/// A measured bulk viscosity: temperature [K] and kinematic viscosity [m²/s].
pub type BulkViscosity = (f64, f64);

/// Turns ordered property triples into a validated `CompoundSet`.
#[derive(Debug, Clone)]
pub struct CompoundAssembler {
    name: String,
    sample: SampleType,
    parallel: bool,
}

impl CompoundAssembler {
    pub fn new(name: impl Into<String>, sample: SampleType) -> Self {
        Self {
            name: name.into(),
            sample,
            parallel: false,
        }
    }

    /// Evaluate correlations on the rayon pool. Output order and values are unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Name of cut `index` (zero-based): `{assay}-{index+1}`.
    pub fn compound_name(&self, index: usize) -> String {
        format!("{}-{}", self.name, index + 1)
    }

    /// Estimate every cut and attach the renormalized `weights` as mole fractions.
    pub fn assemble(
        &self,
        cuts: &[PropertyTriple],
        weights: &[f64],
    ) -> CharacterizationResult<CompoundSet> {
        self.assemble_with_viscosity(cuts, weights, None, None)
    }

    /// Like [`assemble`](Self::assemble), then scale each compound's viscosity line so the
    /// log-mixed bulk viscosity reproduces the measured readings.
    pub fn assemble_with_viscosity(
        &self,
        cuts: &[PropertyTriple],
        weights: &[f64],
        v1: Option<BulkViscosity>,
        v2: Option<BulkViscosity>,
    ) -> CharacterizationResult<CompoundSet> {
        if cuts.is_empty() || cuts.len() != weights.len() {
            return Err(CharacterizationError::invalid(format!(
                "{} cuts with {} weights",
                cuts.len(),
                weights.len()
            )));
        }

        let constants = self.estimate_all(cuts)?;

        let mut fractions = weights.to_vec();
        renormalize(&mut fractions)?;

        let mut compounds: Vec<PseudoCompound> = constants
            .into_iter()
            .zip(fractions)
            .map(|(props, z)| PseudoCompound::new(props, z))
            .collect();

        if v1.is_some() || v2.is_some() {
            fit_bulk_viscosity(&mut compounds, v1, v2)?;
        }

        debug!(
            assay = %self.name,
            count = compounds.len(),
            parallel = self.parallel,
            "assembled pseudo-compounds"
        );
        CompoundSet::new(compounds)
    }

    fn estimate_all(
        &self,
        cuts: &[PropertyTriple],
    ) -> CharacterizationResult<Vec<ConstantPropertySet>> {
        let one = |(i, triple): (usize, &PropertyTriple)| {
            estimate(&self.compound_name(i), *triple, self.sample)
        };
        // Collect every result first so the reported error is always the lowest failing cut.
        let results: Vec<_> = if self.parallel {
            cuts.par_iter().enumerate().map(one).collect()
        } else {
            cuts.iter().enumerate().map(one).collect()
        };
        results
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(CharacterizationError::from)
    }
}

/// Mole-weighted log mean of the compound viscosities at `t_k`, over compounds that carry one.
///
/// `None` when no compound has a line or one of the lines cannot be evaluated at `t_k`.
fn log_mixed_viscosity(compounds: &[PseudoCompound], t_k: f64) -> Option<f64> {
    let mut z_sum = 0.0;
    let mut log_sum = 0.0;
    for c in compounds {
        if let Some(visc) = &c.constants.viscosity {
            z_sum += c.mole_fraction;
            log_sum += c.mole_fraction * visc.at(t_k)?.ln();
        }
    }
    let mixed = (log_sum / z_sum).exp();
    (z_sum > 0.0 && mixed.is_finite() && mixed > 0.0).then_some(mixed)
}

fn fit_bulk_viscosity(
    compounds: &mut [PseudoCompound],
    v1: Option<BulkViscosity>,
    v2: Option<BulkViscosity>,
) -> CharacterizationResult<()> {
    let reference = compounds
        .iter()
        .find_map(|c| c.constants.viscosity)
        .map(|v| (v.t1_k, v.t2_k));
    let Some((t1_default, t2_default)) = reference else {
        warn!("bulk viscosity supplied but no pseudo-compound has a viscosity estimate");
        return Ok(());
    };
    let t1 = v1.map_or(t1_default, |(t, _)| t);
    let t2 = v2.map_or(t2_default, |(t, _)| t);

    // Move every line onto the reading temperatures; lines that cannot reach them are dropped.
    for c in compounds.iter_mut() {
        let Some(visc) = c.constants.viscosity else {
            continue;
        };
        let rebuilt = match (visc.at(t1), visc.at(t2)) {
            (Some(nu1), Some(nu2)) => Some(ViscosityReference {
                t1_k: t1,
                nu1_m2_s: nu1,
                t2_k: t2,
                nu2_m2_s: nu2,
            }),
            _ => {
                debug!(
                    compound = %c.name,
                    t1,
                    t2,
                    "viscosity line not defined at reading temperatures"
                );
                None
            }
        };
        c.constants.viscosity = rebuilt;
    }

    let view: &[PseudoCompound] = compounds;
    let factor = |reading: Option<BulkViscosity>| -> CharacterizationResult<f64> {
        match reading {
            Some((t, nu)) => {
                let mixed = log_mixed_viscosity(view, t).ok_or_else(|| {
                    CharacterizationError::viscosity(format!(
                        "compound viscosities do not mix to a finite value at {t:.2} K"
                    ))
                })?;
                Ok(nu / mixed)
            }
            None => Ok(1.0),
        }
    };
    let f1 = factor(v1)?;
    let f2 = factor(v2)?;
    debug!(t1, f1, t2, f2, "scaling compound viscosities to bulk readings");

    for c in compounds.iter_mut() {
        if let Some(visc) = c.constants.viscosity {
            let scaled = visc.scaled(f1, f2);
            if !scaled.is_valid() {
                return Err(CharacterizationError::viscosity(format!(
                    "scaled viscosity line of {} is outside the Walther range",
                    c.name
                )));
            }
            c.constants.viscosity = Some(scaled);
        }
    }
    Ok(())
}
