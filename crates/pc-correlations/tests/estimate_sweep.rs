//! Sweeps of the correlation library over and beyond its validated domains.

use pc_correlations::{CorrelationError, MethodSet, PropertyTriple, SampleType, estimate};
use proptest::prelude::*;

fn sample_strategy() -> impl Strategy<Value = SampleType> {
    prop_oneof![
        Just(SampleType::Light),
        Just(SampleType::Average),
        Just(SampleType::Heavy),
    ]
}

proptest! {
    #[test]
    fn results_are_physical_or_rejected(
        sample in sample_strategy(),
        mw in 30.0_f64..1600.0,
        sg in 0.5_f64..1.35,
        tb in 230.0_f64..1150.0,
    ) {
        let triple = PropertyTriple::new(mw, sg, tb);
        match estimate("PC-1", triple, sample) {
            Ok(props) => {
                prop_assert!(MethodSet::for_sample(sample).domain.contains(&triple));
                prop_assert!(props.critical_temperature_k > props.normal_boiling_point_k);
                prop_assert!(props.critical_pressure_pa.is_finite());
                prop_assert!(props.critical_pressure_pa > 0.0);
                prop_assert!(props.critical_volume_m3_per_kmol > 0.0);
                prop_assert!(props.acentric_factor >= 0.0);
                prop_assert!(props.enthalpy_of_vaporization_j_per_kmol > 0.0);
                prop_assert!(props.ideal_gas_cp.eval(298.15) > 0.0);
                prop_assert_eq!(props.non_finite_field(), None);
                if let Some(line) = props.viscosity {
                    prop_assert!(line.is_valid());
                }
            }
            Err(CorrelationError::Domain { .. }) | Err(CorrelationError::NonPhysical { .. }) => {}
        }
    }

    #[test]
    fn outside_domain_is_always_rejected(
        sample in sample_strategy(),
        sg in 0.6_f64..0.9,
        excess in 1.0_f64..200.0,
    ) {
        let domain = MethodSet::for_sample(sample).domain;
        let triple = PropertyTriple::new(100.0, sg, domain.tb_k.1 + excess);
        let rejected = matches!(
            estimate("PC-1", triple, sample),
            Err(CorrelationError::Domain { .. })
        );
        prop_assert!(rejected);
    }
}

#[test]
fn estimation_is_deterministic() {
    let triple = PropertyTriple::new(142.0, 0.78, 455.0);
    let a = estimate("OIL-3", triple, SampleType::Average).unwrap();
    let b = estimate("OIL-3", triple, SampleType::Average).unwrap();
    assert_eq!(a, b);
}

#[test]
fn record_serializes_with_stable_field_set() {
    let props = estimate("OIL-1", PropertyTriple::new(80.0, 0.70, 333.0), SampleType::Light)
        .unwrap();
    let json = serde_json::to_value(&props).unwrap();
    let object = json.as_object().unwrap();
    for key in [
        "name",
        "origin",
        "sample_type",
        "molar_weight",
        "critical_temperature_k",
        "critical_pressure_pa",
        "acentric_factor",
        "ideal_gas_cp",
        "viscosity",
        "methods",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }

    let back: pc_correlations::ConstantPropertySet = serde_json::from_value(json).unwrap();
    assert_eq!(back, props);
}
