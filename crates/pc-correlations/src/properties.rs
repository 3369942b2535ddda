//! Full constant-property estimation for one pseudo-compound.

use crate::acentric;
use crate::bulk;
use crate::critical::{self, Critical};
use crate::domain::{check_physical, check_range};
use crate::error::CorrelationResult;
use crate::heat_capacity::{self, IdealGasCp};
use crate::method::{
    ABBOTT_1971, AcentricMethod, CriticalMethod, CriticalVolumeMethod, KESLER_LEE_CP, MethodSet,
    RIEDEL_1954, YAMADA_GUNN_1973,
};
use crate::sample::SampleType;
use crate::viscosity::{self, ViscosityReference};
use pc_core::units::{
    Density, MolarEnergy, MolarMass, MolarVolume, Pressure, Temperature, j_per_kmol, k,
    kg_per_kmol, kg_per_m3, m3_per_kmol, pa,
};
use serde::{Deserialize, Serialize};

/// Origin tag written on every generated record.
pub const ORIGIN_PETROLEUM_ASSAY: &str = "petroleum-assay";

/// Molar weight [kg/kmol], specific gravity 60/60 °F and normal boiling point [K].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyTriple {
    pub mw: f64,
    pub sg: f64,
    pub nbp_k: f64,
}

impl PropertyTriple {
    pub const fn new(mw: f64, sg: f64, nbp_k: f64) -> Self {
        Self { mw, sg, nbp_k }
    }
}

/// Methods that produced a record, as `name@version` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationMethods {
    pub critical: String,
    pub acentric: String,
    pub critical_volume: String,
    pub heat_capacity: String,
    pub rackett: String,
    pub vaporization: String,
    pub viscosity: Option<String>,
}

/// Constant properties of one pseudo-compound.
///
/// This is also the export schema: every field is always serialized (optional values as
/// `null`) so that the field set stays identical across database appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantPropertySet {
    pub name: String,
    pub origin: String,
    pub sample_type: SampleType,
    /// [kg/kmol]
    pub molar_weight: f64,
    pub specific_gravity: f64,
    pub normal_boiling_point_k: f64,
    pub api_gravity: f64,
    pub watson_k: f64,
    pub critical_temperature_k: f64,
    pub critical_pressure_pa: f64,
    pub critical_volume_m3_per_kmol: f64,
    pub critical_compressibility: f64,
    pub acentric_factor: f64,
    pub rackett_z: f64,
    pub liquid_density_60f_kg_m3: f64,
    pub enthalpy_of_vaporization_j_per_kmol: f64,
    pub ideal_gas_cp: IdealGasCp,
    pub viscosity: Option<ViscosityReference>,
    pub methods: CorrelationMethods,
}

impl ConstantPropertySet {
    pub fn triple(&self) -> PropertyTriple {
        PropertyTriple::new(
            self.molar_weight,
            self.specific_gravity,
            self.normal_boiling_point_k,
        )
    }

    pub fn molar_mass(&self) -> MolarMass {
        kg_per_kmol(self.molar_weight)
    }

    pub fn normal_boiling_point(&self) -> Temperature {
        k(self.normal_boiling_point_k)
    }

    pub fn critical_temperature(&self) -> Temperature {
        k(self.critical_temperature_k)
    }

    pub fn critical_pressure(&self) -> Pressure {
        pa(self.critical_pressure_pa)
    }

    pub fn critical_volume(&self) -> MolarVolume {
        m3_per_kmol(self.critical_volume_m3_per_kmol)
    }

    pub fn liquid_density_60f(&self) -> Density {
        kg_per_m3(self.liquid_density_60f_kg_m3)
    }

    pub fn enthalpy_of_vaporization(&self) -> MolarEnergy {
        j_per_kmol(self.enthalpy_of_vaporization_j_per_kmol)
    }

    /// Name of the first numeric field that is NaN or infinite.
    ///
    /// JSON has no encoding for those values, so a record that fails this check cannot be
    /// written to and read back from a compound database.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let cp = &self.ideal_gas_cp;
        let mut fields = vec![
            ("molar_weight", self.molar_weight),
            ("specific_gravity", self.specific_gravity),
            ("normal_boiling_point_k", self.normal_boiling_point_k),
            ("api_gravity", self.api_gravity),
            ("watson_k", self.watson_k),
            ("critical_temperature_k", self.critical_temperature_k),
            ("critical_pressure_pa", self.critical_pressure_pa),
            ("critical_volume_m3_per_kmol", self.critical_volume_m3_per_kmol),
            ("critical_compressibility", self.critical_compressibility),
            ("acentric_factor", self.acentric_factor),
            ("rackett_z", self.rackett_z),
            ("liquid_density_60f_kg_m3", self.liquid_density_60f_kg_m3),
            (
                "enthalpy_of_vaporization_j_per_kmol",
                self.enthalpy_of_vaporization_j_per_kmol,
            ),
            ("ideal_gas_cp.a", cp.a),
            ("ideal_gas_cp.b", cp.b),
            ("ideal_gas_cp.c", cp.c),
            ("ideal_gas_cp.t_min_k", cp.t_min_k),
            ("ideal_gas_cp.t_max_k", cp.t_max_k),
        ];
        if let Some(v) = &self.viscosity {
            fields.extend([
                ("viscosity.t1_k", v.t1_k),
                ("viscosity.nu1_m2_s", v.nu1_m2_s),
                ("viscosity.t2_k", v.t2_k),
                ("viscosity.nu2_m2_s", v.nu2_m2_s),
            ]);
        }
        fields
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(field, _)| field)
    }
}

/// Estimate the full constant-property set of a pseudo-compound.
///
/// The sample type selects the method set; the triple must lie inside that set's domain.
pub fn estimate(
    name: &str,
    triple: PropertyTriple,
    sample: SampleType,
) -> CorrelationResult<ConstantPropertySet> {
    let set = MethodSet::for_sample(sample);
    let critical_id = set.critical_id();
    set.domain.check(critical_id, &triple)?;

    let PropertyTriple { mw, sg, nbp_k: tb } = triple;
    let watson_k = bulk::watson_k(tb, sg);
    let api = bulk::api_gravity(sg);

    let crit = match set.critical {
        CriticalMethod::RiaziDaubert1980 => critical::riazi_daubert_1980(tb, sg),
        CriticalMethod::RiaziDaubert1987 => critical::riazi_daubert_1987(tb, sg),
        CriticalMethod::LeeKesler => critical::lee_kesler(tb, sg),
    };
    let tc = check_physical(critical_id, "critical temperature [K]", crit.tc_k)?;
    check_physical(critical_id, "critical pressure [Pa]", crit.pc_pa)?;
    // Tb/Tc must stay below 1 for any of the acentric or vaporization forms to apply
    check_range(critical_id, "reduced boiling point", tb / tc, (0.0, 0.93))?;

    let acentric_id = set.acentric_id();
    let omega = match set.acentric {
        AcentricMethod::Edmister => acentric::edmister(tb, crit),
        AcentricMethod::LeeKesler => acentric::lee_kesler(tb, crit, watson_k),
    };
    let omega = check_range(acentric_id, "acentric factor", omega, (0.0, 2.5))?;

    let vc_id = set.critical_volume_id();
    let vc = match set.critical_volume {
        CriticalVolumeMethod::HallYarborough => critical::hall_yarborough_vc(mw, sg),
        CriticalVolumeMethod::LeeKeslerZc => {
            critical::vc_from_zc(critical::lee_kesler_zc(omega), crit)
        }
    };
    let vc = check_physical(vc_id, "critical volume [m3/kmol]", vc)?;
    let zc = check_physical(vc_id, "critical compressibility", critical::zc_from_vc(vc, crit))?;

    let rackett_z = check_physical(
        YAMADA_GUNN_1973,
        "Rackett parameter",
        critical::yamada_gunn_zra(omega),
    )?;
    let hvap = check_physical(
        RIEDEL_1954,
        "enthalpy of vaporization [J/kmol]",
        critical::riedel_hvap_nbp(tb, crit),
    )?;

    let cp = heat_capacity::kesler_lee(mw, watson_k, omega);
    check_physical(KESLER_LEE_CP, "ideal-gas Cp at 298.15 K", cp.eval(298.15))?;

    let viscosity = viscosity::abbott_1971(watson_k, api);

    Ok(ConstantPropertySet {
        name: name.to_string(),
        origin: ORIGIN_PETROLEUM_ASSAY.to_string(),
        sample_type: sample,
        molar_weight: mw,
        specific_gravity: sg,
        normal_boiling_point_k: tb,
        api_gravity: api,
        watson_k,
        critical_temperature_k: tc,
        critical_pressure_pa: crit.pc_pa,
        critical_volume_m3_per_kmol: vc,
        critical_compressibility: zc,
        acentric_factor: omega,
        rackett_z,
        liquid_density_60f_kg_m3: bulk::liquid_density_60f(sg),
        enthalpy_of_vaporization_j_per_kmol: hvap,
        ideal_gas_cp: cp,
        viscosity,
        methods: CorrelationMethods {
            critical: critical_id.to_string(),
            acentric: acentric_id.to_string(),
            critical_volume: vc_id.to_string(),
            heat_capacity: KESLER_LEE_CP.to_string(),
            rackett: YAMADA_GUNN_1973.to_string(),
            vaporization: RIEDEL_1954.to_string(),
            viscosity: viscosity.map(|_| ABBOTT_1971.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorrelationError;

    #[test]
    fn anchor_of_default_assay_estimates_for_every_sample_type() {
        let triple = PropertyTriple::new(80.0, 0.70, 333.0);
        for sample in SampleType::ALL {
            let props = estimate("OIL-1", triple, sample).unwrap();
            assert_eq!(props.triple(), triple);
            assert!(props.critical_temperature_k > 480.0 && props.critical_temperature_k < 560.0);
            assert!(props.critical_pressure_pa > 25.0e5 && props.critical_pressure_pa < 45.0e5);
            assert!(props.acentric_factor > 0.15 && props.acentric_factor < 0.40);
            assert!(props.critical_compressibility > 0.2 && props.critical_compressibility < 0.32);
            assert_eq!(props.sample_type, sample);
        }
    }

    #[test]
    fn methods_are_tagged_by_sample_type() {
        let triple = PropertyTriple::new(80.0, 0.70, 333.0);
        let light = estimate("x", triple, SampleType::Light).unwrap();
        let heavy = estimate("x", triple, SampleType::Heavy).unwrap();
        assert_eq!(light.methods.critical, "riazi-daubert-1980@1");
        assert_eq!(heavy.methods.critical, "lee-kesler-1976@1");
        assert_eq!(light.methods.acentric, "edmister-1958@1");
    }

    #[test]
    fn rejects_out_of_domain_boiling_point() {
        let triple = PropertyTriple::new(300.0, 0.85, 700.0);
        let err = estimate("x", triple, SampleType::Light).unwrap_err();
        assert!(matches!(err, CorrelationError::Domain { .. }));
        // the heavy method set covers it
        assert!(estimate("x", triple, SampleType::Heavy).is_ok());
    }

    #[test]
    fn heavier_cut_has_higher_critical_temperature_and_lower_pressure() {
        let light = estimate("a", PropertyTriple::new(100.0, 0.73, 370.0), SampleType::Average)
            .unwrap();
        let heavy = estimate("b", PropertyTriple::new(250.0, 0.82, 560.0), SampleType::Average)
            .unwrap();
        assert!(heavy.critical_temperature_k > light.critical_temperature_k);
        assert!(heavy.critical_pressure_pa < light.critical_pressure_pa);
        assert!(heavy.acentric_factor > light.acentric_factor);
    }

    #[test]
    fn typed_accessors_match_raw_fields() {
        use uom::si::pressure::bar;
        use uom::si::thermodynamic_temperature::kelvin;
        let props =
            estimate("x", PropertyTriple::new(80.0, 0.70, 333.0), SampleType::Light).unwrap();
        assert_eq!(props.critical_temperature().get::<kelvin>(), props.critical_temperature_k);
        let pc_bar = props.critical_pressure().get::<bar>();
        assert!((pc_bar - props.critical_pressure_pa / 1e5).abs() < 1e-9);
    }

    #[test]
    fn estimated_records_are_finite() {
        for sample in SampleType::ALL {
            let props = estimate("x", PropertyTriple::new(120.0, 0.76, 410.0), sample).unwrap();
            assert_eq!(props.non_finite_field(), None);
        }
    }

    #[test]
    fn non_finite_viscosity_is_reported() {
        let mut props =
            estimate("x", PropertyTriple::new(150.0, 0.78, 460.0), SampleType::Average).unwrap();
        let mut line = props.viscosity.unwrap();
        line.nu2_m2_s = f64::NAN;
        props.viscosity = Some(line);
        assert_eq!(props.non_finite_field(), Some("viscosity.nu2_m2_s"));
    }
}
