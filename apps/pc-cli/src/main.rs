use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use pc_app::{
    AppError, AppResult, CharacterizationConfig, CharacterizationOutcome,
    CharacterizationRequest, ProgressEvent, load_assay, load_config, load_database,
    load_simulation, run_characterization_with_progress, save_simulation,
};
use pc_assay::CharacterizationError;
use pc_core::TemperatureScale;
use pc_correlations::{PropertyTriple, SampleType, estimate};
use pc_flowsheet::{SharedSimulation, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "petrochar")]
#[command(about = "Petroleum fraction characterization from bulk assay data", long_about = None)]
struct Cli {
    /// Temperature unit for printed and entered temperatures
    #[arg(long, value_enum, default_value_t = TempUnit::K, global = true)]
    temp_unit: TempUnit,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Characterize an assay and merge the pseudo-compounds into a flowsheet
    Characterize {
        /// Path to the assay YAML (or JSON) file
        assay_path: PathBuf,
        /// Flowsheet to merge into (defaults to an empty one)
        #[arg(long)]
        flowsheet: Option<PathBuf>,
        /// Write the merged flowsheet here
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Append the generated compounds to this compound database
        #[arg(long)]
        export: Option<PathBuf>,
        /// Run configuration YAML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Use the closest shape when the bulk targets cannot be met
        #[arg(long)]
        accept_closest: bool,
    },
    /// List the records of a compound database
    InspectDb {
        /// Path to the database JSON file
        db_path: PathBuf,
    },
    /// Estimate the constant properties of a single (MW, SG, NBP) triple
    Correlate {
        /// Molar weight [kg/kmol]
        #[arg(long)]
        mw: f64,
        /// Specific gravity 60/60 °F
        #[arg(long)]
        sg: f64,
        /// Normal boiling point, in --temp-unit
        #[arg(long)]
        nbp: f64,
        /// Sample type: light, average or heavy
        #[arg(long = "type", default_value = "light", value_parser = parse_sample)]
        sample: SampleType,
        /// Record name
        #[arg(long, default_value = "PC-1")]
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TempUnit {
    K,
    C,
    F,
}

impl TempUnit {
    fn scale(self) -> TemperatureScale {
        match self {
            TempUnit::K => TemperatureScale::Kelvin,
            TempUnit::C => TemperatureScale::Celsius,
            TempUnit::F => TemperatureScale::Fahrenheit,
        }
    }

    fn label(self) -> &'static str {
        match self {
            TempUnit::K => "K",
            TempUnit::C => "°C",
            TempUnit::F => "°F",
        }
    }
}

fn parse_sample(s: &str) -> Result<SampleType, String> {
    SampleType::from_key(s).ok_or_else(|| format!("unknown sample type '{s}'"))
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let unit = cli.temp_unit;

    match cli.command {
        Commands::Characterize {
            assay_path,
            flowsheet,
            out,
            export,
            config,
            accept_closest,
        } => cmd_characterize(
            &assay_path,
            flowsheet.as_deref(),
            out.as_deref(),
            export.as_deref(),
            config.as_deref(),
            accept_closest,
            unit,
        ),
        Commands::InspectDb { db_path } => cmd_inspect_db(&db_path, unit),
        Commands::Correlate {
            mw,
            sg,
            nbp,
            sample,
            name,
        } => cmd_correlate(&name, mw, sg, nbp, sample, unit),
    }
}

fn cmd_characterize(
    assay_path: &Path,
    flowsheet: Option<&Path>,
    out: Option<&Path>,
    export: Option<&Path>,
    config_path: Option<&Path>,
    accept_closest: bool,
    unit: TempUnit,
) -> AppResult<()> {
    let spec = load_assay(assay_path)?;
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => CharacterizationConfig::default(),
    };
    let simulation = match flowsheet {
        Some(path) => load_simulation(path)?,
        None => Simulation::new(),
    };
    info!(assay = %spec.name, sample = %spec.sample_type, ncomps = spec.ncomps, "characterizing");
    println!(
        "Characterizing assay '{}' ({}, {} pseudo-compounds)",
        spec.name, spec.sample_type, spec.ncomps
    );

    let shared = SharedSimulation::new(simulation);
    let request = CharacterizationRequest {
        spec: &spec,
        export_path: export,
        accept_closest,
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let outcome = run_characterization_with_progress(
        &request,
        &shared,
        &config,
        Some(&mut |event: ProgressEvent| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    print_outcome(&outcome, unit);

    if let Some(path) = out {
        save_simulation(path, &shared.snapshot()?)?;
        println!("✓ Flowsheet written to {}", path.display());
    }
    Ok(())
}

fn print_outcome(outcome: &CharacterizationOutcome, unit: TempUnit) {
    if outcome.accepted_closest {
        println!("! Bulk targets not met; using the closest shape found");
    }
    println!(
        "✓ {} compounds merged into stream '{}' ({} new, {} already registered)",
        outcome.compounds.len(),
        outcome.merge.stream_tag,
        outcome.created_count,
        outcome.merge.already_present.len()
    );
    println!("  Shape: {}", outcome.shape);
    println!(
        "  Bulk: MW {:.2}, SG {:.4}, NBP {:.1} {}",
        outcome.averages.mw,
        outcome.averages.sg,
        unit.scale().from_kelvin(outcome.averages.nbp_k),
        unit.label()
    );
    println!("  Solver iterations: {}", outcome.iterations);

    println!(
        "\n  {:<12} {:>9} {:>8} {:>10} {:>10} {:>8}",
        "name", "MW", "SG", "NBP", "Tc", "z"
    );
    for c in &outcome.compounds {
        println!(
            "  {:<12} {:>9.2} {:>8.4} {:>10.1} {:>10.1} {:>8.5}",
            c.name,
            c.molar_weight,
            c.specific_gravity,
            unit.scale().from_kelvin(c.normal_boiling_point_k),
            unit.scale().from_kelvin(c.constants.critical_temperature_k),
            c.mole_fraction
        );
    }

    match (&outcome.export, &outcome.export_error) {
        (Some(summary), _) => println!(
            "\n✓ Exported to {}: {} added, {} replaced, {} skipped ({} total)",
            summary.path.display(),
            summary.added,
            summary.replaced,
            summary.skipped,
            summary.total
        ),
        (None, Some(err)) => println!("\n! Export failed (flowsheet kept): {err}"),
        (None, None) => {}
    }
    println!("\nFingerprint: {}", outcome.fingerprint);
}

fn cmd_inspect_db(db_path: &Path, unit: TempUnit) -> AppResult<()> {
    let db = load_database(db_path)?;
    println!(
        "{} v{} - {} compounds (created {}, updated {})",
        db.schema,
        db.version,
        db.compounds.len(),
        db.created_at,
        db.updated_at
    );
    for c in &db.compounds {
        println!(
            "  {:<12} {:<8} MW {:>8.2}  SG {:.4}  NBP {:>7.1} {}  origin={}",
            c.name,
            c.sample_type,
            c.molar_weight,
            c.specific_gravity,
            unit.scale().from_kelvin(c.normal_boiling_point_k),
            unit.label(),
            c.origin
        );
    }
    Ok(())
}

fn cmd_correlate(
    name: &str,
    mw: f64,
    sg: f64,
    nbp: f64,
    sample: SampleType,
    unit: TempUnit,
) -> AppResult<()> {
    let triple = PropertyTriple::new(mw, sg, unit.scale().to_kelvin(nbp));
    let props = estimate(name, triple, sample).map_err(CharacterizationError::from)?;
    let yaml = serde_yaml::to_string(&props).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    print!("{yaml}");
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &ProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {:?}  elapsed={:.2}s",
        spinner[spin_idx], event.stage, event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}
