//! Characterize → merge → export through the application layer.

use std::path::PathBuf;

use pc_app::{
    AppError, CharacterizationConfig, CharacterizationRequest, CharacterizationWorker,
    ProgressStage, WorkerMessage, load_assay, load_database, load_simulation,
    run_characterization, run_characterization_with_progress, save_simulation,
};
use pc_assay::{AssaySpec, CharacterizationError, SampleType};
use pc_flowsheet::{
    FlowsheetError, MaterialStream, PhaseKind, SharedSimulation, SimObject, Simulation,
};

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("pc_app_tests");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(format!("{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn simulation_with_feed() -> SharedSimulation {
    let mut sim = Simulation::new();
    sim.add_object(SimObject::Material(MaterialStream::new("FEED")));
    SharedSimulation::new(sim)
}

fn request(spec: &AssaySpec) -> CharacterizationRequest<'_> {
    CharacterizationRequest {
        spec,
        export_path: None,
        accept_closest: false,
    }
}

#[test]
fn characterization_is_merged_into_the_simulation() {
    let shared = simulation_with_feed();
    let spec = AssaySpec::default();
    let outcome =
        run_characterization(&request(&spec), &shared, &CharacterizationConfig::default())
            .unwrap();

    assert_eq!(outcome.created_count, 10);
    assert!(!outcome.accepted_closest);
    assert_eq!(outcome.fingerprint.len(), 64);
    assert!(outcome.export.is_none());

    shared
        .read(|sim| {
            assert_eq!(sim.selected_compounds.len(), 10);
            let oil = sim.stream(&outcome.merge.stream_id).unwrap();
            assert_eq!(oil.tag, "OIL");
            assert!((oil.primary().unwrap().mole_fraction_sum() - 1.0).abs() < 1e-9);
            let feed = sim.stream_by_tag("FEED").unwrap();
            for phase in &feed.phases {
                assert_eq!(phase.compounds.len(), 10);
            }
        })
        .unwrap();
}

#[test]
fn correlation_failure_leaves_simulation_untouched() {
    let shared = simulation_with_feed();
    let before = shared.snapshot().unwrap();
    let spec = AssaySpec {
        target_mw: Some(300.0),
        ..AssaySpec::default()
    };
    let err = run_characterization(&request(&spec), &shared, &CharacterizationConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Characterization(CharacterizationError::CorrelationDomain(_))
    ));
    assert_eq!(shared.snapshot().unwrap(), before);
}

#[test]
fn structural_edit_blocks_the_merge() {
    let shared = simulation_with_feed();
    let before = shared.snapshot().unwrap();
    let spec = AssaySpec::default();

    let guard = shared.begin_structural_edit().unwrap();
    let err = run_characterization(&request(&spec), &shared, &CharacterizationConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Flowsheet(FlowsheetError::IntegrationConflict { .. })
    ));
    drop(guard);
    assert_eq!(shared.snapshot().unwrap(), before);
}

#[test]
fn unreachable_targets_fail_unless_closest_is_accepted() {
    let spec = AssaySpec {
        target_mw: Some(60.0),
        ..AssaySpec::default()
    };

    let shared = simulation_with_feed();
    let err = run_characterization(&request(&spec), &shared, &CharacterizationConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Characterization(CharacterizationError::TargetConvergence { .. })
    ));
    assert_eq!(shared.read(|sim| sim.objects.len()).unwrap(), 1);

    let lenient = CharacterizationRequest {
        accept_closest: true,
        ..request(&spec)
    };
    let mut stages = Vec::new();
    let mut record = |event: pc_app::ProgressEvent| stages.push(event.stage);
    let outcome = run_characterization_with_progress(
        &lenient,
        &shared,
        &CharacterizationConfig::default(),
        Some(&mut record),
    )
    .unwrap();
    assert!(outcome.accepted_closest);
    assert!(outcome.averages.mw > 60.0);
    assert_eq!(outcome.created_count, 10);
    assert!(stages.contains(&ProgressStage::AcceptingClosest));
    assert_eq!(stages.last(), Some(&ProgressStage::Completed));
}

#[test]
fn export_appends_records_after_merge() {
    let shared = simulation_with_feed();
    let db_path = temp_path("export.json");
    let spec = AssaySpec::default();
    let req = CharacterizationRequest {
        export_path: Some(&db_path),
        ..request(&spec)
    };
    let outcome = run_characterization(&req, &shared, &CharacterizationConfig::default()).unwrap();

    let summary = outcome.export.unwrap();
    assert!(summary.created_file);
    assert_eq!(summary.added, 10);
    assert!(outcome.export_error.is_none());

    let db = load_database(&db_path).unwrap();
    assert_eq!(db.names(), outcome.compounds.names());
    let _ = std::fs::remove_file(&db_path);
}

#[test]
fn viscosity_fitted_export_loads_back() {
    let shared = simulation_with_feed();
    let db_path = temp_path("viscosity.json");
    let spec = AssaySpec {
        v1_m2_s: Some(2.0e-6),
        v2_m2_s: Some(0.9e-6),
        ..AssaySpec::default()
    };
    let req = CharacterizationRequest {
        export_path: Some(&db_path),
        ..request(&spec)
    };
    let outcome = run_characterization(&req, &shared, &CharacterizationConfig::default()).unwrap();
    assert!(outcome.export_error.is_none());
    assert_eq!(outcome.export.unwrap().added, 10);

    let db = load_database(&db_path).unwrap();
    assert_eq!(db.compounds.len(), 10);
    for record in &db.compounds {
        assert_eq!(record.non_finite_field(), None, "{}", record.name);
    }
    assert!(db.compounds.iter().skip(1).all(|c| c.viscosity.is_some()));
    let _ = std::fs::remove_file(&db_path);
}

#[test]
fn export_failure_keeps_the_merge() {
    let shared = simulation_with_feed();
    let db_path = temp_path("corrupt.json");
    std::fs::write(&db_path, "{ not a database").unwrap();
    let spec = AssaySpec::default();
    let req = CharacterizationRequest {
        export_path: Some(&db_path),
        ..request(&spec)
    };
    let outcome = run_characterization(&req, &shared, &CharacterizationConfig::default()).unwrap();

    assert!(outcome.export.is_none());
    assert!(outcome.export_error.is_some());
    assert_eq!(shared.read(|sim| sim.selected_compounds.len()).unwrap(), 10);
    assert_eq!(
        std::fs::read_to_string(&db_path).unwrap(),
        "{ not a database"
    );
    let _ = std::fs::remove_file(&db_path);
}

#[test]
fn worker_reports_progress_then_completion() {
    let shared = simulation_with_feed();
    let spec = AssaySpec {
        sample_type: SampleType::Average,
        target_mw: Some(120.0),
        ..AssaySpec::default()
    };
    let worker = CharacterizationWorker::start(
        spec,
        shared.clone(),
        CharacterizationConfig::default(),
        None,
        false,
    );

    let messages: Vec<WorkerMessage> = worker.progress_rx.iter().collect();
    let stages: Vec<ProgressStage> = messages
        .iter()
        .filter_map(|m| match m {
            WorkerMessage::Progress(event) => Some(event.stage),
            _ => None,
        })
        .collect();
    assert_eq!(stages.first(), Some(&ProgressStage::Generating));
    assert!(stages.contains(&ProgressStage::Solving));
    assert!(stages.contains(&ProgressStage::Merging));

    match messages.last() {
        Some(WorkerMessage::Complete(outcome)) => {
            assert!(((outcome.averages.mw - 120.0) / 120.0).abs() <= 1e-4);
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(shared.read(|sim| sim.material_streams().count()).unwrap(), 2);
}

#[test]
fn worker_reports_errors() {
    let shared = simulation_with_feed();
    let spec = AssaySpec {
        ncomps: 0,
        ..AssaySpec::default()
    };
    let worker = CharacterizationWorker::start(
        spec,
        shared,
        CharacterizationConfig::default(),
        None,
        false,
    );
    match worker.wait() {
        Some(WorkerMessage::Error { message }) => assert!(message.contains("Worker error")),
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn assay_files_load_from_yaml_and_json() {
    let yaml = temp_path("assay.yaml");
    std::fs::write(&yaml, "name: CRUDE\nsample_type: Heavy\ntarget_mw: 200.0\nncomps: 12\n")
        .unwrap();
    let spec = load_assay(&yaml).unwrap();
    assert_eq!(spec.name, "CRUDE");
    assert_eq!(spec.sample_type, SampleType::Heavy);
    assert_eq!(spec.ncomps, 12);

    let json = temp_path("assay.json");
    std::fs::write(&json, r#"{"name": "LIGHT", "target_sg": 0.72}"#).unwrap();
    let spec = load_assay(&json).unwrap();
    assert_eq!(spec.name, "LIGHT");
    assert_eq!(spec.target_sg, Some(0.72));

    std::fs::write(&yaml, "ncomps: 0\n").unwrap();
    assert!(matches!(
        load_assay(&yaml),
        Err(AppError::Characterization(_))
    ));
    assert!(matches!(
        load_assay(&temp_path("absent.yaml")),
        Err(AppError::FileRead { .. })
    ));

    let _ = std::fs::remove_file(&yaml);
    let _ = std::fs::remove_file(&json);
}

#[test]
fn simulation_files_round_trip() {
    let shared = simulation_with_feed();
    run_characterization(
        &request(&AssaySpec::default()),
        &shared,
        &CharacterizationConfig::default(),
    )
    .unwrap();
    let sim = shared.snapshot().unwrap();

    for name in ["flowsheet.yaml", "flowsheet.json"] {
        let path = temp_path(name);
        save_simulation(&path, &sim).unwrap();
        let loaded = load_simulation(&path).unwrap();
        assert_eq!(loaded.selected_compounds, sim.selected_compounds);
        let feed = loaded.stream_by_tag("FEED").unwrap();
        assert!(feed.phase(PhaseKind::Vapor).unwrap().contains("OIL-1"));
        let _ = std::fs::remove_file(&path);
    }
}
