//! Assay input record.

use crate::compound::BulkAverages;
use crate::error::{CharacterizationError, CharacterizationResult};
use pc_core::numeric::relative_error;
use pc_correlations::{PropertyTriple, SampleType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bulk assay data supplied by the caller.
///
/// Every field has a default, so a YAML file only needs the values that differ:
///
/// ```yaml
/// name: OIL
/// sample_type: Average
/// target_mw: 140.0
/// ncomps: 12
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssaySpec {
    /// Identifies the generated stream and prefixes compound names.
    pub name: String,
    pub sample_type: SampleType,
    /// Bulk molar weight [kg/kmol]
    pub target_mw: Option<f64>,
    /// Bulk specific gravity 60/60 °F
    pub target_sg: Option<f64>,
    /// Bulk normal boiling point [K]
    pub target_nbp_k: Option<f64>,
    /// Number of pseudo-compounds to generate
    pub ncomps: usize,
    /// Molar weight of the lightest generated compound
    pub light_mw0: f64,
    /// Specific gravity of the lightest generated compound
    pub light_sg0: f64,
    /// Normal boiling point of the lightest generated compound [K]
    pub light_nbp0_k: f64,
    /// Bulk kinematic viscosity at `t1_k` [m²/s]; zero means not measured
    pub v1_m2_s: Option<f64>,
    /// Bulk kinematic viscosity at `t2_k` [m²/s]; zero means not measured
    pub v2_m2_s: Option<f64>,
    pub t1_k: f64,
    pub t2_k: f64,
}

impl Default for AssaySpec {
    fn default() -> Self {
        Self {
            name: "OIL".to_string(),
            sample_type: SampleType::Light,
            target_mw: None,
            target_sg: None,
            target_nbp_k: None,
            ncomps: 10,
            light_mw0: 80.0,
            light_sg0: 0.70,
            light_nbp0_k: 333.0,
            v1_m2_s: None,
            v2_m2_s: None,
            t1_k: 38.0 + 273.15,
            t2_k: 98.9 + 273.15,
        }
    }
}

impl AssaySpec {
    pub fn anchor(&self) -> PropertyTriple {
        PropertyTriple::new(self.light_mw0, self.light_sg0, self.light_nbp0_k)
    }

    /// Bulk targets, rejecting non-positive or non-finite values.
    pub fn targets(&self) -> CharacterizationResult<BulkTargets> {
        let check = |value: Option<f64>, what: &str| match value {
            Some(v) if !(v.is_finite() && v > 0.0) => Err(CharacterizationError::invalid(format!(
                "bulk {what} target must be positive, got {v}"
            ))),
            other => Ok(other),
        };
        Ok(BulkTargets {
            mw: check(self.target_mw, "molar weight")?,
            sg: check(self.target_sg, "specific gravity")?,
            nbp_k: check(self.target_nbp_k, "boiling point")?,
        })
    }

    /// Measured bulk viscosities as `(t_k, ν)` pairs; zero or absent readings are dropped.
    pub fn bulk_viscosities(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let reading = |t: f64, v: Option<f64>| {
            v.filter(|v| v.is_finite() && *v > 0.0).map(|v| (t, v))
        };
        (reading(self.t1_k, self.v1_m2_s), reading(self.t2_k, self.v2_m2_s))
    }

    pub fn validate(&self) -> CharacterizationResult<()> {
        if self.name.trim().is_empty() {
            return Err(CharacterizationError::invalid("assay name is empty"));
        }
        if self.ncomps < 1 {
            return Err(CharacterizationError::invalid(
                "at least one pseudo-compound is required",
            ));
        }
        for (what, value) in [
            ("light-end molar weight", self.light_mw0),
            ("light-end specific gravity", self.light_sg0),
            ("light-end boiling point", self.light_nbp0_k),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CharacterizationError::invalid(format!(
                    "{what} must be positive, got {value}"
                )));
            }
        }
        if !(self.t1_k > 0.0 && self.t2_k > self.t1_k) {
            return Err(CharacterizationError::invalid(
                "viscosity reference temperatures must satisfy 0 < t1 < t2",
            ));
        }
        self.targets()?;
        Ok(())
    }
}

/// Optional bulk property targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BulkTargets {
    pub mw: Option<f64>,
    pub sg: Option<f64>,
    pub nbp_k: Option<f64>,
}

impl BulkTargets {
    pub fn is_empty(&self) -> bool {
        self.mw.is_none() && self.sg.is_none() && self.nbp_k.is_none()
    }

    /// Every supplied target is within `rel_tol` of the achieved average.
    pub fn satisfied_by(&self, averages: &BulkAverages, rel_tol: f64) -> bool {
        let ok = |target: Option<f64>, actual: f64| {
            target.is_none_or(|t| relative_error(actual, t) <= rel_tol)
        };
        ok(self.mw, averages.mw) && ok(self.sg, averages.sg) && ok(self.nbp_k, averages.nbp_k)
    }
}

impl fmt::Display for BulkTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(mw) = self.mw {
            parts.push(format!("MW {mw:.2}"));
        }
        if let Some(sg) = self.sg {
            parts.push(format!("SG {sg:.4}"));
        }
        if let Some(nbp) = self.nbp_k {
            parts.push(format!("NBP {nbp:.1} K"));
        }
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
