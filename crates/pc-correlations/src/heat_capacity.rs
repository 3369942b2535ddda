//! Ideal-gas heat capacity.

use serde::{Deserialize, Serialize};

const BTU_PER_LB_R_TO_J_PER_KG_K: f64 = 4186.8;

/// Ideal-gas heat capacity polynomial, Cp° = a + b·T + c·T² in J/(kmol·K), T in K.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealGasCp {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Lower validity bound [K]
    pub t_min_k: f64,
    /// Upper validity bound [K]
    pub t_max_k: f64,
}

impl IdealGasCp {
    /// Evaluate the polynomial without range checking.
    pub fn eval(&self, t_k: f64) -> f64 {
        self.a + self.b * t_k + self.c * t_k * t_k
    }

    /// Evaluate only inside the validity range.
    pub fn at(&self, t_k: f64) -> Option<f64> {
        (t_k >= self.t_min_k && t_k <= self.t_max_k).then(|| self.eval(t_k))
    }
}

/// Kesler–Lee (1976) ideal-gas Cp for petroleum fractions.
///
/// The published form is mass based in Btu/(lb·°R) with T in °R:
///
/// ```text
/// Cp = A0 + A1·T + A2·T²
/// A0 = −0.33886 + 0.02827·Kw − 0.26105·CF + 0.59332·ω·CF
/// A1 = −(0.9291 − 1.1543·Kw + 0.0368·Kw²)·1e-4 + CF·(4.56 − 9.48·ω)·1e-4
/// A2 = −1.6658e-7 + CF·(0.536 − 0.6828·ω)·1e-7
/// CF = ((12.8 − Kw)·(10 − Kw)/(10·ω))²   for 10 < Kw < 12.8, else 0
/// ```
///
/// The coefficients are converted to the molar SI polynomial of [`IdealGasCp`].
/// Validity: 0–1200 °F.
pub fn kesler_lee(mw: f64, watson_k: f64, omega: f64) -> IdealGasCp {
    let cf = if watson_k > 10.0 && watson_k < 12.8 && omega > 0.0 {
        ((12.8 - watson_k) * (10.0 - watson_k) / (10.0 * omega)).powi(2)
    } else {
        0.0
    };

    let a0 = -0.33886 + 0.02827 * watson_k - 0.26105 * cf + 0.59332 * omega * cf;
    let a1 = -(0.9291 - 1.1543 * watson_k + 0.0368 * watson_k * watson_k) * 1.0e-4
        + cf * (4.56 - 9.48 * omega) * 1.0e-4;
    let a2 = -1.6658e-7 + cf * (0.536 - 0.6828 * omega) * 1.0e-7;

    // T[°R] = 1.8·T[K]
    let scale = mw * BTU_PER_LB_R_TO_J_PER_KG_K;
    IdealGasCp {
        a: scale * a0,
        b: scale * a1 * 1.8,
        c: scale * a2 * 1.8 * 1.8,
        t_min_k: 255.372,
        t_max_k: 922.039,
    }
}
