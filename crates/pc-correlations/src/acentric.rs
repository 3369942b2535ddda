//! Acentric factor correlations.

use crate::critical::Critical;

const ATM_BAR: f64 = 1.01325;

/// Edmister (1958): ω = (3/7)·log10(Pc/Patm)/(Tc/Tb − 1) − 1.
pub fn edmister(tb_k: f64, crit: Critical) -> f64 {
    let pc_atm = crit.pc_pa / 1.0e5 / ATM_BAR;
    3.0 / 7.0 * pc_atm.log10() / (crit.tc_k / tb_k - 1.0) - 1.0
}

/// Lee–Kesler (1976) vapor-pressure based acentric factor, switching to the Kesler–Lee
/// Watson-K form above a reduced boiling point of 0.8.
pub fn lee_kesler(tb_k: f64, crit: Critical, watson_k: f64) -> f64 {
    let tbr = tb_k / crit.tc_k;
    if tbr <= 0.8 {
        let pc_atm = crit.pc_pa / 1.0e5 / ATM_BAR;
        let tbr6 = tbr.powi(6);
        let num = -pc_atm.ln() - 5.92714 + 6.09648 / tbr + 1.28862 * tbr.ln() - 0.169347 * tbr6;
        let den = 15.2518 - 15.6875 / tbr - 13.4721 * tbr.ln() + 0.43577 * tbr6;
        num / den
    } else {
        -7.904 + 0.1352 * watson_k - 0.007465 * watson_k * watson_k
            + 8.359 * tbr
            + (1.408 - 0.01063 * watson_k) / tbr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEXANE: Critical = Critical {
        tc_k: 507.6,
        pc_pa: 30.25e5,
    };

    #[test]
    fn edmister_hexane() {
        let w = edmister(341.9, HEXANE);
        assert!((w - 0.30).abs() < 0.02, "omega = {w}");
    }

    #[test]
    fn lee_kesler_hexane() {
        let w = lee_kesler(341.9, HEXANE, 12.8);
        assert!((w - 0.30).abs() < 0.02, "omega = {w}");
    }

    #[test]
    fn lee_kesler_grows_with_boiling_point() {
        let light = lee_kesler(400.0, Critical { tc_k: 590.0, pc_pa: 28.0e5 }, 12.0);
        let heavy = lee_kesler(600.0, Critical { tc_k: 790.0, pc_pa: 17.0e5 }, 12.0);
        assert!(heavy > light);
    }
}
