//! Bulk characterization factors.

use pc_core::constants::WATER_DENSITY_60F;

/// Watson (UOP) characterization factor, Kw = (1.8·Tb)^(1/3) / SG with Tb in K.
pub fn watson_k(tb_k: f64, sg: f64) -> f64 {
    (1.8 * tb_k).cbrt() / sg
}

/// API gravity from specific gravity 60/60 °F.
pub fn api_gravity(sg: f64) -> f64 {
    141.5 / sg - 131.5
}

/// Liquid density at 60 °F [kg/m³].
pub fn liquid_density_60f(sg: f64) -> f64 {
    sg * WATER_DENSITY_60F
}

/// Riazi–Daubert (1980) molar weight from boiling point and specific gravity:
/// MW = 1.6607e-4 · Tb^2.1962 · SG^-1.0164, Tb in K.
pub fn riazi_daubert_mw(tb_k: f64, sg: f64) -> f64 {
    1.6607e-4 * tb_k.powf(2.1962) * sg.powf(-1.0164)
}

/// Inverse of [`riazi_daubert_mw`]: boiling point [K] from molar weight and specific gravity.
pub fn riazi_daubert_tb(mw: f64, sg: f64) -> f64 {
    (mw * sg.powf(1.0164) / 1.6607e-4).powf(1.0 / 2.1962)
}
