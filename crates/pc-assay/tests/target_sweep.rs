//! Property sweep over molar-weight targets.

use pc_assay::{AssaySpec, CharacterizationOptions, SampleType, characterize};
use proptest::prelude::*;

fn sample_and_target() -> impl Strategy<Value = (SampleType, f64)> {
    prop_oneof![
        (85.0_f64..140.0).prop_map(|mw| (SampleType::Light, mw)),
        (90.0_f64..240.0).prop_map(|mw| (SampleType::Average, mw)),
        (90.0_f64..340.0).prop_map(|mw| (SampleType::Heavy, mw)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn molar_weight_target_is_met((sample, target) in sample_and_target(), ncomps in 3usize..=15) {
        let spec = AssaySpec {
            sample_type: sample,
            target_mw: Some(target),
            ncomps,
            ..AssaySpec::default()
        };
        let options = CharacterizationOptions::default();
        let result = characterize(&spec, &options).unwrap();

        prop_assert_eq!(result.compounds.len(), ncomps);
        let avg = result.compounds.averages();
        prop_assert!(((avg.mw - target) / target).abs() <= options.solver.rel_tol);

        let sum: f64 = result.compounds.mole_fractions().iter().sum();
        prop_assert!((sum - 1.0).abs() <= 1e-9);

        let cuts: Vec<_> = result.compounds.iter().collect();
        for pair in cuts.windows(2) {
            prop_assert!(pair[1].molar_weight > pair[0].molar_weight);
            prop_assert!(pair[1].specific_gravity >= pair[0].specific_gravity);
            prop_assert!(pair[1].normal_boiling_point_k >= pair[0].normal_boiling_point_k);
        }
    }
}
