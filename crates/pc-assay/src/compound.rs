//! Pseudo-compounds and the ordered set produced by a characterization.

use crate::error::{CharacterizationError, CharacterizationResult};
use pc_correlations::{ConstantPropertySet, PropertyTriple};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Tolerance on the mole-fraction sum of a finished set.
pub const FRACTION_SUM_TOL: f64 = 1e-9;

/// One generated cut with its constant properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PseudoCompound {
    pub name: String,
    pub molar_weight: f64,
    pub specific_gravity: f64,
    pub normal_boiling_point_k: f64,
    pub mole_fraction: f64,
    pub mass_fraction: Option<f64>,
    pub constants: ConstantPropertySet,
}

impl PseudoCompound {
    /// Build from an estimated record; the triple is taken from the record.
    pub fn new(constants: ConstantPropertySet, mole_fraction: f64) -> Self {
        Self {
            name: constants.name.clone(),
            molar_weight: constants.molar_weight,
            specific_gravity: constants.specific_gravity,
            normal_boiling_point_k: constants.normal_boiling_point_k,
            mole_fraction,
            mass_fraction: None,
            constants,
        }
    }

    pub fn triple(&self) -> PropertyTriple {
        PropertyTriple::new(
            self.molar_weight,
            self.specific_gravity,
            self.normal_boiling_point_k,
        )
    }
}

/// Mole-fraction-weighted bulk properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulkAverages {
    pub mw: f64,
    pub sg: f64,
    pub nbp_k: f64,
}

impl fmt::Display for BulkAverages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MW {:.2}, SG {:.4}, NBP {:.1} K",
            self.mw, self.sg, self.nbp_k
        )
    }
}

/// Ordered pseudo-compounds with unique names and mole fractions summing to one.
///
/// Deserialization goes through [`CompoundSet::new`], so a loaded set is validated too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCompoundSet")]
pub struct CompoundSet {
    compounds: Vec<PseudoCompound>,
}

#[derive(Deserialize)]
struct UncheckedCompoundSet {
    compounds: Vec<PseudoCompound>,
}

impl TryFrom<UncheckedCompoundSet> for CompoundSet {
    type Error = CharacterizationError;

    fn try_from(raw: UncheckedCompoundSet) -> CharacterizationResult<Self> {
        CompoundSet::new(raw.compounds)
    }
}

impl CompoundSet {
    /// Validate names and fractions.
    pub fn new(compounds: Vec<PseudoCompound>) -> CharacterizationResult<Self> {
        if compounds.is_empty() {
            return Err(CharacterizationError::invalid("empty compound set"));
        }

        let mut seen = HashSet::new();
        for c in &compounds {
            if !seen.insert(c.name.as_str()) {
                return Err(CharacterizationError::invalid(format!(
                    "duplicate compound name {}",
                    c.name
                )));
            }
            if !(c.mole_fraction.is_finite() && (0.0..=1.0).contains(&c.mole_fraction)) {
                return Err(CharacterizationError::invalid(format!(
                    "mole fraction of {} out of range: {}",
                    c.name, c.mole_fraction
                )));
            }
        }

        let sum: f64 = compounds.iter().map(|c| c.mole_fraction).sum();
        if (sum - 1.0).abs() > FRACTION_SUM_TOL {
            return Err(CharacterizationError::invalid(format!(
                "mole fractions sum to {sum}"
            )));
        }

        Ok(Self { compounds })
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PseudoCompound> {
        self.compounds.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PseudoCompound> {
        self.compounds.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.compounds.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn mole_fractions(&self) -> Vec<f64> {
        self.compounds.iter().map(|c| c.mole_fraction).collect()
    }

    pub fn averages(&self) -> BulkAverages {
        let mut avg = BulkAverages {
            mw: 0.0,
            sg: 0.0,
            nbp_k: 0.0,
        };
        for c in &self.compounds {
            avg.mw += c.mole_fraction * c.molar_weight;
            avg.sg += c.mole_fraction * c.specific_gravity;
            avg.nbp_k += c.mole_fraction * c.normal_boiling_point_k;
        }
        avg
    }

    /// Σ z_i·MW_i, the mass basis of one kmol of mixture.
    pub fn mass_basis(&self) -> f64 {
        self.compounds
            .iter()
            .map(|c| c.mole_fraction * c.molar_weight)
            .sum()
    }

    /// Fill `mass_fraction` as z_i·MW_i / Σ z·MW.
    pub fn with_mass_fractions(mut self) -> Self {
        let total = self.mass_basis();
        for c in &mut self.compounds {
            c.mass_fraction = Some(c.mole_fraction * c.molar_weight / total);
        }
        self
    }

    pub fn constant_properties(&self) -> impl Iterator<Item = &ConstantPropertySet> {
        self.compounds.iter().map(|c| &c.constants)
    }
}

impl<'a> IntoIterator for &'a CompoundSet {
    type Item = &'a PseudoCompound;
    type IntoIter = std::slice::Iter<'a, PseudoCompound>;

    fn into_iter(self) -> Self::IntoIter {
        self.compounds.iter()
    }
}

/// Rescale `fractions` in place so they sum to one.
pub(crate) fn renormalize(fractions: &mut [f64]) -> CharacterizationResult<()> {
    let normalized = pc_core::numeric::normalize_weights(fractions)?;
    fractions.copy_from_slice(&normalized);
    Ok(())
}
