//! Merge scenarios against a populated simulation.

use pc_assay::{AssaySpec, CharacterizationOptions, CompoundSet, characterize};
use pc_correlations::{PropertyTriple, SampleType, estimate};
use pc_flowsheet::{
    EnergyStream, FlowsheetError, FlowsheetIntegrator, MaterialStream, PhaseKind,
    SharedSimulation, SimObject, Simulation,
};

const EXISTING: [(&str, f64, f64, f64); 5] = [
    ("C6", 86.18, 0.664, 341.9),
    ("C7", 100.2, 0.688, 371.6),
    ("C8", 114.2, 0.707, 398.8),
    ("C9", 128.3, 0.722, 424.0),
    ("C10", 142.3, 0.734, 447.3),
];

/// Two material streams over five registered compounds, plus an energy stream.
fn populated() -> Simulation {
    let mut sim = Simulation::new();
    for (name, mw, sg, tb) in EXISTING {
        let props = estimate(name, PropertyTriple::new(mw, sg, tb), SampleType::Light).unwrap();
        sim.register_compound(&props);
        sim.select_compound(name);
    }
    let records: Vec<_> = sim.selected_records().cloned().collect();
    for tag in ["FEED", "RECYCLE"] {
        let mut stream = MaterialStream::new(tag);
        for phase in &mut stream.phases {
            for r in &records {
                phase.ensure_compound(r);
            }
        }
        for entry in &mut stream.phase_mut(PhaseKind::PRIMARY).unwrap().compounds {
            entry.mole_fraction = 0.2;
            entry.mass_fraction = 0.2;
        }
        sim.add_object(SimObject::Material(stream));
    }
    sim.add_object(SimObject::Energy(EnergyStream::new("Q-100")));
    sim
}

fn oil() -> CompoundSet {
    characterize(&AssaySpec::default(), &CharacterizationOptions::default())
        .unwrap()
        .compounds
}

#[test]
fn two_streams_with_five_compounds() {
    let mut sim = populated();
    let set = oil();
    let report = FlowsheetIntegrator::merge(&mut sim, "OIL", &set).unwrap();

    assert_eq!(report.created.len(), 10);
    assert_eq!(sim.available_compounds.len(), 15);
    assert_eq!(sim.selected_compounds.len(), 15);
    assert_eq!(sim.material_streams().count(), 3);
    assert_eq!(sim.objects.len(), 4);

    for stream in sim.material_streams() {
        for phase in &stream.phases {
            assert_eq!(phase.compounds.len(), 15, "{} / {}", stream.tag, phase.kind);
        }
    }

    for tag in ["FEED", "RECYCLE"] {
        let primary = sim.stream_by_tag(tag).unwrap().primary().unwrap();
        for name in set.names() {
            let entry = primary.compound(name).unwrap();
            assert_eq!(entry.mole_fraction, 0.0);
            assert_eq!(entry.mass_fraction, 0.0);
        }
        // existing composition is kept
        assert!((primary.mole_fraction_sum() - 1.0).abs() < 1e-12);
    }

    let oil_stream = sim.stream(&report.stream_id).unwrap();
    assert_eq!(oil_stream.tag, "OIL");
    let primary = oil_stream.primary().unwrap();
    for (name, ..) in EXISTING {
        assert_eq!(primary.compound(name).unwrap().mole_fraction, 0.0);
    }
    for compound in &set {
        let entry = primary.compound(&compound.name).unwrap();
        assert!(entry.mole_fraction > 0.0);
        assert_eq!(entry.mole_fraction, compound.mole_fraction);
    }
    assert!((primary.mass_fraction_sum() - 1.0).abs() < 1e-12);
    assert!((primary.mole_fraction_sum() - 1.0).abs() < 1e-9);
}

#[test]
fn phase_records_are_independent_copies() {
    let mut sim = populated();
    let report = FlowsheetIntegrator::merge(&mut sim, "OIL", &oil()).unwrap();
    let mut touched = sim.clone();
    if let Some(SimObject::Material(stream)) = touched
        .objects
        .iter_mut()
        .find(|o| o.id() == report.stream_id)
    {
        let entry = stream
            .phase_mut(PhaseKind::Vapor)
            .unwrap()
            .compound_mut("OIL-1")
            .unwrap();
        entry.constants.acentric_factor = 9.0;
    }
    let other = touched.stream(&report.stream_id).unwrap();
    let primary = other.primary().unwrap().compound("OIL-1").unwrap();
    assert_ne!(primary.constants.acentric_factor, 9.0);
    assert_ne!(touched.available_compounds["OIL-1"].acentric_factor, 9.0);
}

#[test]
fn merge_during_structural_edit_conflicts_and_changes_nothing() {
    let shared = SharedSimulation::new(populated());
    let before = shared.snapshot().unwrap();
    let set = oil();

    let guard = shared.begin_structural_edit().unwrap();
    let err = shared.merge("OIL", &set).unwrap_err();
    assert!(matches!(err, FlowsheetError::IntegrationConflict { .. }));
    assert_eq!(shared.snapshot().unwrap(), before);

    drop(guard);
    let report = shared.merge("OIL", &set).unwrap();
    assert_eq!(report.created.len(), 10);
    assert_eq!(shared.read(|sim| sim.material_streams().count()).unwrap(), 3);
}

#[test]
fn merge_from_a_worker_thread() {
    let shared = SharedSimulation::new(populated());
    let worker = shared.clone();
    let handle = std::thread::spawn(move || worker.merge("OIL", &oil()));
    let report = handle.join().unwrap().unwrap();
    assert!(shared.read(|sim| sim.stream(&report.stream_id).is_some()).unwrap());
}
