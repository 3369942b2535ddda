// pc-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, MolarEnergy as UomMolarEnergy, MolarMass as UomMolarMass,
    MolarVolume as UomMolarVolume, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MolarEnergy = UomMolarEnergy;
pub type MolarMass = UomMolarMass;
pub type MolarVolume = UomMolarVolume;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_kmol(v: f64) -> MolarMass {
    use uom::si::molar_mass::gram_per_mole;
    // kg/kmol and g/mol are the same number
    MolarMass::new::<gram_per_mole>(v)
}

#[inline]
pub fn m3_per_kmol(v: f64) -> MolarVolume {
    use uom::si::molar_volume::cubic_meter_per_mole;
    MolarVolume::new::<cubic_meter_per_mole>(v / 1000.0)
}

#[inline]
pub fn j_per_kmol(v: f64) -> MolarEnergy {
    use uom::si::molar_energy::joule_per_mole;
    MolarEnergy::new::<joule_per_mole>(v / 1000.0)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Temperature scales accepted at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureScale {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TemperatureScale {
    /// Convert a reading on this scale to kelvin.
    pub fn to_kelvin(self, value: f64) -> f64 {
        use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
        let t = match self {
            TemperatureScale::Kelvin => Temperature::new::<kelvin>(value),
            TemperatureScale::Celsius => Temperature::new::<degree_celsius>(value),
            TemperatureScale::Fahrenheit => Temperature::new::<degree_fahrenheit>(value),
        };
        t.get::<kelvin>()
    }

    /// Convert kelvin to a reading on this scale.
    pub fn from_kelvin(self, value_k: f64) -> f64 {
        use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
        let t = Temperature::new::<kelvin>(value_k);
        match self {
            TemperatureScale::Kelvin => t.get::<kelvin>(),
            TemperatureScale::Celsius => t.get::<degree_celsius>(),
            TemperatureScale::Fahrenheit => t.get::<degree_fahrenheit>(),
        }
    }
}

pub mod constants {
    /// Universal gas constant [J/(kmol·K)]
    pub const R_UNIVERSAL: f64 = 8314.462618;

    /// Water density at 60 °F [kg/m³], the specific-gravity reference
    pub const WATER_DENSITY_60F: f64 = 999.012;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _mw = kg_per_kmol(86.0);
        let _vc = m3_per_kmol(0.37);
        let _h = j_per_kmol(2.9e7);
        let _rho = kg_per_m3(700.0);
    }

    #[test]
    fn temperature_scales_round_trip_reference_points() {
        assert!((TemperatureScale::Celsius.to_kelvin(38.0) - 311.15).abs() < 1e-9);
        assert!((TemperatureScale::Fahrenheit.to_kelvin(210.0) - 372.038_888_9).abs() < 1e-6);
        assert!((TemperatureScale::Kelvin.to_kelvin(333.0) - 333.0).abs() < 1e-12);
        assert!((TemperatureScale::Celsius.from_kelvin(373.15) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn molar_mass_reads_back_as_kg_per_mol() {
        use uom::si::molar_mass::kilogram_per_mole;
        let mw = kg_per_kmol(80.0);
        assert!((mw.get::<kilogram_per_mole>() - 0.080).abs() < 1e-15);
    }
}
