//! Property distribution across pseudo-compound cuts.
//!
//! Cut `i` of `N` sits at the normalized position `x = i/(N−1)`:
//!
//! ```text
//! MW(x)  = MW0 · (1 + (R − 1)·x)                     equal-width cuts in MW
//! SG(x)  = SG0 · (MW(x)/MW0)^b
//! NBP(x) = NBP0 · (T_RD(MW(x), SG(x)) / T_RD(MW0, SG0))^γ
//! ```
//!
//! `T_RD` is the inverted Riazi–Daubert (1980) molar-weight relation. With R > 1 and
//! b, γ ≥ 0 all three properties are non-decreasing and MW is strictly increasing.
//! Mole fractions come from an exponential density integrated over the equal-width
//! cuts, `z ∝ exp(−λ·x)`, with a sample-type decay rate λ.

use crate::compound::BulkAverages;
use crate::error::{CharacterizationError, CharacterizationResult};
use crate::spec::AssaySpec;
use pc_core::numeric::{normalize_weights, weighted_mean};
use pc_correlations::bulk::riazi_daubert_tb;
use pc_correlations::{MethodSet, PropertyTriple, SampleType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape parameters of the distribution; the bulk-target solver adjusts these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// R: heaviest cut MW over lightest cut MW
    pub heavy_end_ratio: f64,
    /// b: exponent of the SG-vs-MW power law
    pub sg_exponent: f64,
    /// γ: exponent applied to the boiling-point ratio
    pub nbp_exponent: f64,
}

impl ShapeParams {
    /// Sample-type defaults. Heavier assays spread further and densify faster with MW.
    pub fn for_sample(sample: SampleType) -> Self {
        let (heavy_end_ratio, sg_exponent) = match sample {
            SampleType::Light => (2.5, 0.06),
            SampleType::Average => (3.5, 0.10),
            SampleType::Heavy => (5.0, 0.14),
        };
        Self {
            heavy_end_ratio,
            sg_exponent,
            nbp_exponent: 1.0,
        }
    }

    pub fn with_heavy_end_ratio(self, heavy_end_ratio: f64) -> Self {
        Self {
            heavy_end_ratio,
            ..self
        }
    }

    pub fn with_sg_exponent(self, sg_exponent: f64) -> Self {
        Self {
            sg_exponent,
            ..self
        }
    }

    pub fn with_nbp_exponent(self, nbp_exponent: f64) -> Self {
        Self {
            nbp_exponent,
            ..self
        }
    }

    fn validate(&self, ncomps: usize) -> CharacterizationResult<()> {
        let finite = self.heavy_end_ratio.is_finite()
            && self.sg_exponent.is_finite()
            && self.nbp_exponent.is_finite();
        if !finite {
            return Err(CharacterizationError::invalid(
                "non-finite shape parameter",
            ));
        }
        if ncomps > 1 && self.heavy_end_ratio <= 1.0 {
            return Err(CharacterizationError::invalid(format!(
                "heavy-end ratio must exceed 1, got {}",
                self.heavy_end_ratio
            )));
        }
        if self.sg_exponent < 0.0 || self.nbp_exponent < 0.0 {
            return Err(CharacterizationError::invalid(
                "shape exponents must be non-negative",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ShapeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R {:.4}, b {:.4}, γ {:.4}",
            self.heavy_end_ratio, self.sg_exponent, self.nbp_exponent
        )
    }
}

/// Mole-fraction decay rate λ over the normalized cut position.
fn decay_rate(sample: SampleType) -> f64 {
    match sample {
        SampleType::Light => 1.0,
        SampleType::Average => 0.5,
        SampleType::Heavy => 0.0,
    }
}

/// Produces ordered property triples for one assay.
#[derive(Debug, Clone)]
pub struct DistributionGenerator {
    ncomps: usize,
    sample: SampleType,
    anchor: PropertyTriple,
    tb_anchor_rd: f64,
}

impl DistributionGenerator {
    pub fn new(
        ncomps: usize,
        sample: SampleType,
        anchor: PropertyTriple,
    ) -> CharacterizationResult<Self> {
        if ncomps < 1 {
            return Err(CharacterizationError::invalid(
                "at least one pseudo-compound is required",
            ));
        }
        let PropertyTriple { mw, sg, nbp_k } = anchor;
        if !(mw.is_finite() && mw > 0.0) {
            return Err(CharacterizationError::invalid(format!(
                "non-physical anchor molar weight {mw}"
            )));
        }
        if !(sg.is_finite() && sg > 0.0) {
            return Err(CharacterizationError::invalid(format!(
                "non-physical anchor specific gravity {sg}"
            )));
        }
        if !(nbp_k.is_finite() && nbp_k > 0.0) {
            return Err(CharacterizationError::invalid(format!(
                "non-physical anchor boiling point {nbp_k} K"
            )));
        }
        Ok(Self {
            ncomps,
            sample,
            anchor,
            tb_anchor_rd: riazi_daubert_tb(mw, sg),
        })
    }

    pub fn from_spec(spec: &AssaySpec) -> CharacterizationResult<Self> {
        Self::new(spec.ncomps, spec.sample_type, spec.anchor())
    }

    pub fn ncomps(&self) -> usize {
        self.ncomps
    }

    pub fn sample(&self) -> SampleType {
        self.sample
    }

    pub fn anchor(&self) -> PropertyTriple {
        self.anchor
    }

    pub fn default_shape(&self) -> ShapeParams {
        ShapeParams::for_sample(self.sample)
    }

    /// Normalized cut positions in `[0, 1]`.
    pub fn positions(&self) -> Vec<f64> {
        if self.ncomps == 1 {
            return vec![0.0];
        }
        let last = (self.ncomps - 1) as f64;
        (0..self.ncomps).map(|i| i as f64 / last).collect()
    }

    /// Normalized mole-fraction weights of the cuts.
    pub fn weights(&self) -> CharacterizationResult<Vec<f64>> {
        let lambda = decay_rate(self.sample);
        let raw: Vec<f64> = self
            .positions()
            .into_iter()
            .map(|x| (-lambda * x).exp())
            .collect();
        Ok(normalize_weights(&raw)?)
    }

    /// Evaluate the distribution without validation. Used inside solver iterations.
    pub fn evaluate(&self, shape: &ShapeParams) -> Vec<PropertyTriple> {
        let PropertyTriple {
            mw: mw0,
            sg: sg0,
            nbp_k: nbp0,
        } = self.anchor;

        self.positions()
            .into_iter()
            .enumerate()
            .map(|(i, x)| {
                if i == 0 {
                    return self.anchor;
                }
                let mw = mw0 * (1.0 + (shape.heavy_end_ratio - 1.0) * x);
                let sg = sg0 * (mw / mw0).powf(shape.sg_exponent);
                let tb_ratio = riazi_daubert_tb(mw, sg) / self.tb_anchor_rd;
                let nbp = nbp0 * tb_ratio.powf(shape.nbp_exponent);
                PropertyTriple::new(mw, sg, nbp)
            })
            .collect()
    }

    /// Mole-weighted averages of the distribution for `shape`.
    pub fn averages(&self, shape: &ShapeParams) -> CharacterizationResult<BulkAverages> {
        let weights = self.weights()?;
        Ok(averages_of(&weights, &self.evaluate(shape)))
    }

    /// Generate validated cuts: ordered, anchored and inside the correlation domain.
    pub fn generate(&self, shape: &ShapeParams) -> CharacterizationResult<Vec<PropertyTriple>> {
        shape.validate(self.ncomps)?;
        let cuts = self.evaluate(shape);

        for pair in cuts.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if !(b.mw > a.mw && b.sg >= a.sg && b.nbp_k >= a.nbp_k) {
                return Err(CharacterizationError::invalid(format!(
                    "non-monotonic cuts: ({}, {}, {}) followed by ({}, {}, {})",
                    a.mw, a.sg, a.nbp_k, b.mw, b.sg, b.nbp_k
                )));
            }
        }

        let set = MethodSet::for_sample(self.sample);
        for cut in &cuts {
            set.domain.check(set.critical_id(), cut)?;
        }
        Ok(cuts)
    }
}

pub(crate) fn averages_of(weights: &[f64], cuts: &[PropertyTriple]) -> BulkAverages {
    let column = |f: fn(&PropertyTriple) -> f64| cuts.iter().map(f).collect::<Vec<_>>();
    BulkAverages {
        mw: weighted_mean(weights, &column(|c| c.mw)),
        sg: weighted_mean(weights, &column(|c| c.sg)),
        nbp_k: weighted_mean(weights, &column(|c| c.nbp_k)),
    }
}
