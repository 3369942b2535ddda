//! Critical constants and the properties derived from them.
//!
//! Units: temperatures in K, pressures in Pa, molar volumes in m³/kmol.

use pc_core::constants::R_UNIVERSAL;

const BAR: f64 = 1.0e5;

/// Critical temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Critical {
    pub tc_k: f64,
    pub pc_pa: f64,
}

/// Riazi–Daubert (1980), two-parameter power law in (Tb, SG).
///
/// ```text
/// Tc = 19.06232 · Tb^0.58848 · SG^0.3596
/// Pc = 5.53027e7 · Tb^-2.3125 · SG^2.3201   [bar]
/// ```
pub fn riazi_daubert_1980(tb_k: f64, sg: f64) -> Critical {
    let tc_k = 19.06232 * tb_k.powf(0.58848) * sg.powf(0.3596);
    let pc_bar = 5.53027e7 * tb_k.powf(-2.3125) * sg.powf(2.3201);
    Critical {
        tc_k,
        pc_pa: pc_bar * BAR,
    }
}

/// Riazi–Daubert (1987), extended form with exponential correction terms.
///
/// ```text
/// θ = a · exp(b·Tb + c·SG + d·Tb·SG) · Tb^e · SG^f
/// ```
pub fn riazi_daubert_1987(tb_k: f64, sg: f64) -> Critical {
    let tc_k = 9.5233
        * (-9.314e-4 * tb_k - 0.544442 * sg + 6.4791e-4 * tb_k * sg).exp()
        * tb_k.powf(0.81067)
        * sg.powf(0.53691);
    let pc_bar = 3.1958e5
        * (-8.505e-3 * tb_k - 4.8014 * sg + 5.749e-3 * tb_k * sg).exp()
        * tb_k.powf(-0.4844)
        * sg.powf(4.0846);
    Critical {
        tc_k,
        pc_pa: pc_bar * BAR,
    }
}

/// Lee–Kesler (1976) critical constants.
pub fn lee_kesler(tb_k: f64, sg: f64) -> Critical {
    let tc_k = 189.8
        + 450.6 * sg
        + (0.4244 + 0.1174 * sg) * tb_k
        + (0.1441 - 1.0069 * sg) * 1.0e5 / tb_k;

    let ln_pc_bar = 5.689 - 0.0566 / sg
        - (0.43639 + 4.1216 / sg + 0.21343 / (sg * sg)) * 1.0e-3 * tb_k
        + (0.47579 + 1.182 / sg + 0.15302 / (sg * sg)) * 1.0e-6 * tb_k.powi(2)
        - (2.4505 + 9.9099 / (sg * sg)) * 1.0e-10 * tb_k.powi(3);

    Critical {
        tc_k,
        pc_pa: ln_pc_bar.exp() * BAR,
    }
}

/// Hall–Yarborough (1971) critical volume [m³/kmol]: Vc = 0.025 · MW^1.15 · SG^-0.7935 ft³/lbmol.
pub fn hall_yarborough_vc(mw: f64, sg: f64) -> f64 {
    const FT3_PER_LBMOL: f64 = 0.062_428;
    0.025 * FT3_PER_LBMOL * mw.powf(1.15) * sg.powf(-0.7935)
}

/// Pitzer-type critical compressibility used with the Lee–Kesler constants.
pub fn lee_kesler_zc(omega: f64) -> f64 {
    0.2905 - 0.085 * omega
}

/// Vc = Zc·R·Tc/Pc [m³/kmol].
pub fn vc_from_zc(zc: f64, crit: Critical) -> f64 {
    zc * R_UNIVERSAL * crit.tc_k / crit.pc_pa
}

/// Zc = Pc·Vc/(R·Tc).
pub fn zc_from_vc(vc_m3_per_kmol: f64, crit: Critical) -> f64 {
    crit.pc_pa * vc_m3_per_kmol / (R_UNIVERSAL * crit.tc_k)
}

/// Yamada–Gunn (1973) Rackett parameter.
pub fn yamada_gunn_zra(omega: f64) -> f64 {
    0.29056 - 0.08775 * omega
}

/// Riedel (1954) enthalpy of vaporization at the normal boiling point [J/kmol].
///
/// Only meaningful for Tb/Tc < 0.93; callers check the reduced temperature.
pub fn riedel_hvap_nbp(tb_k: f64, crit: Critical) -> f64 {
    let tbr = tb_k / crit.tc_k;
    let pc_bar = crit.pc_pa / BAR;
    1.093 * R_UNIVERSAL * crit.tc_k * tbr * (pc_bar.ln() - 1.013) / (0.930 - tbr)
}
