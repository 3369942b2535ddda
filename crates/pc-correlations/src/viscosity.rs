//! Reference kinematic viscosities.

use serde::{Deserialize, Serialize};

/// 100 °F and 210 °F, the ASTM reference temperatures [K].
pub const T_100F_K: f64 = 310.927_777_777_777_8;
pub const T_210F_K: f64 = 372.038_888_888_888_9;

const CST: f64 = 1.0e-6;

/// Lowest kinematic viscosity [cSt] the Walther double log is defined for: at 0.3 cSt
/// `log10(ν + 0.7)` reaches zero.
pub const WALTHER_MIN_CST: f64 = 0.3;

fn walther(nu_m2_s: f64) -> Option<f64> {
    let cst = nu_m2_s / CST;
    (cst.is_finite() && cst > WALTHER_MIN_CST).then(|| (cst + 0.7).log10().log10())
}

/// Two kinematic-viscosity points [m²/s] defining an ASTM D341 (Walther) line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViscosityReference {
    pub t1_k: f64,
    pub nu1_m2_s: f64,
    pub t2_k: f64,
    pub nu2_m2_s: f64,
}

impl ViscosityReference {
    /// Kinematic viscosity [m²/s] at `t_k` on the Walther line
    /// `log10(log10(ν + 0.7)) = A − B·log10(T)`, ν in cSt.
    ///
    /// `None` when a reference point is at or below [`WALTHER_MIN_CST`] or the line
    /// cannot be evaluated at `t_k`.
    pub fn at(&self, t_k: f64) -> Option<f64> {
        let (w1, w2) = (walther(self.nu1_m2_s)?, walther(self.nu2_m2_s)?);
        let (l1, l2) = (self.t1_k.log10(), self.t2_k.log10());
        let slope = (w2 - w1) / (l2 - l1);
        let wt = w1 + slope * (t_k.log10() - l1);
        let nu = (10f64.powf(10f64.powf(wt)) - 0.7) * CST;
        (nu.is_finite() && nu > 0.0).then_some(nu)
    }

    /// Both reference points are finite and inside the Walther range.
    pub fn is_valid(&self) -> bool {
        self.t1_k.is_finite()
            && self.t2_k.is_finite()
            && walther(self.nu1_m2_s).is_some()
            && walther(self.nu2_m2_s).is_some()
    }

    /// Multiply both reference points.
    pub fn scaled(&self, factor1: f64, factor2: f64) -> Self {
        Self {
            nu1_m2_s: self.nu1_m2_s * factor1,
            nu2_m2_s: self.nu2_m2_s * factor2,
            ..*self
        }
    }
}

/// Abbott, Kaufmann & Domash (1971) viscosities at 100 °F and 210 °F from Watson K and API
/// gravity.
///
/// Returns `None` outside Kw ∈ [10, 13.5], API ∈ [0, 80], where a rational term turns
/// singular, or when the 210 °F value falls below the Walther range; the estimate is
/// optional and never extrapolated.
pub fn abbott_1971(watson_k: f64, api: f64) -> Option<ViscosityReference> {
    if !(10.0..=13.5).contains(&watson_k) || !(0.0..=80.0).contains(&api) {
        return None;
    }
    let kw = watson_k;

    let den100 = api + 50.3642 - 4.78231 * kw;
    let den210 = api + 26.786 - 2.6296 * kw;
    if den100 <= 1.0 || den210 <= 1.0 {
        return None;
    }

    let log_nu100 = 4.39371 - 1.94733 * kw + 0.12769 * kw * kw + 3.2629e-4 * api * api
        - 1.18246e-2 * kw * api
        + (0.171617 * kw * kw + 10.9943 * api + 9.50663e-2 * api * api - 0.860218 * kw * api)
            / den100;
    let log_nu210 = -0.463634 - 0.166532 * api + 5.13447e-4 * api * api - 8.48995e-3 * kw * api
        + (8.0325e-2 * kw + 1.24899 * api + 0.19768 * api * api) / den210;

    let nu1 = 10f64.powf(log_nu100) * CST;
    let nu2 = 10f64.powf(log_nu210) * CST;
    let line = ViscosityReference {
        t1_k: T_100F_K,
        nu1_m2_s: nu1,
        t2_k: T_210F_K,
        nu2_m2_s: nu2,
    };
    (line.is_valid() && nu1 > nu2).then_some(line)
}
