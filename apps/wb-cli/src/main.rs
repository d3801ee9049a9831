use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use wb_app::{AppError, AppResult, NaturalRequest, natural_balance, resolve_climate, run_service};
use wb_elements::{ElementKind, MeasureKind, ParamSpec};

#[derive(Parser)]
#[command(name = "wb")]
#[command(about = "Urban water balance after DWA-A 102", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List surface element kinds and their parameters
    Elements,
    /// List measure kinds and their parameters
    Measures,
    /// Show the reference climate of a place, or list all places
    Climate {
        /// Place name (umlauts may be transcribed, e.g. Muenchen)
        place: Option<String>,
    },
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Compute the water balance of a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Estimate the natural (undeveloped) water balance with Bagrov
    Natural {
        /// Bagrov efficiency parameter n
        #[arg(long)]
        n: f64,
        /// Share of runoff leaving as direct runoff (0 - 1)
        #[arg(long)]
        runoff_ratio: f64,
        #[arg(long, conflicts_with_all = ["precipitation", "etp"])]
        place: Option<String>,
        /// Annual precipitation in mm
        #[arg(long, requires = "etp")]
        precipitation: Option<f64>,
        /// Annual potential evapotranspiration in mm
        #[arg(long, requires = "precipitation")]
        etp: Option<f64>,
        /// Precipitation undercatch correction in %
        #[arg(long, default_value_t = 0.0)]
        correction: f64,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Elements => {
            cmd_elements();
            Ok(())
        }
        Commands::Measures => {
            cmd_measures();
            Ok(())
        }
        Commands::Climate { place } => cmd_climate(place.as_deref()),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            format,
        } => cmd_run(&scenario_path, format),
        Commands::Natural {
            n,
            runoff_ratio,
            place,
            precipitation,
            etp,
            correction,
        } => cmd_natural(
            n,
            runoff_ratio,
            place.as_deref(),
            precipitation,
            etp,
            correction,
        ),
    }
}

fn print_params(params: &[ParamSpec]) {
    for spec in params {
        println!("    {}", spec);
    }
}

fn cmd_elements() {
    for kind in ElementKind::ALL {
        println!("{} - {} ({})", kind.id(), kind.label(), kind.label_de());
        println!("  {}", kind.doc());
        print_params(kind.params());
    }
}

fn cmd_measures() {
    for kind in MeasureKind::ALL {
        println!("{} - {} ({})", kind.id(), kind.label(), kind.label_de());
        println!("  {}", kind.doc());
        print_params(kind.params());
    }
}

fn cmd_climate(place: Option<&str>) -> AppResult<()> {
    match place {
        Some(place) => {
            let record = wb_climate::lookup(place)?;
            println!(
                "{}: P = {:.0} mm/a, ETp = {:.1} mm/a",
                record.place, record.precipitation_mm, record.etp_mm
            );
        }
        None => {
            println!("{:<20} {:>8} {:>8}", "Place", "P", "ETp");
            for record in wb_climate::places() {
                println!(
                    "{:<20} {:>8.0} {:>8.1}",
                    record.place, record.precipitation_mm, record.etp_mm
                );
            }
        }
    }
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let summary = wb_app::validate_file(scenario_path)?;
    println!("✓ Scenario is valid: {}", summary.name);
    println!(
        "  Climate: P = {:.0} mm/a, ETp = {:.1} mm/a",
        summary.precipitation_mm, summary.etp_mm
    );
    println!(
        "  Elements: {} ({} connected, {:.0} m2)",
        summary.element_count, summary.connected_elements, summary.total_area_m2
    );
    println!("  Measures: {}", summary.measure_count);
    Ok(())
}

fn cmd_run(scenario_path: &Path, format: OutputFormat) -> AppResult<()> {
    tracing::debug!(path = %scenario_path.display(), "running scenario file");
    let response = run_service::run_file(scenario_path)?;

    match format {
        OutputFormat::Json => println!("{}", response.report().to_json()?),
        OutputFormat::Table => {
            println!("{}", response.scenario_name);
            println!(
                "P = {:.0} mm/a, ETp = {:.1} mm/a\n",
                response.study.precipitation(),
                response.study.etp()
            );
            print!("{}", response.balance.presentation());
            for row in response.balance.clamped_rows() {
                println!(
                    "! {}: partition outside its physical domain, clamped",
                    row.element
                );
            }
            if !response.skipped.is_empty() {
                println!("Skipped: {}", response.skipped.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_natural(
    n: f64,
    runoff_ratio: f64,
    place: Option<&str>,
    precipitation: Option<f64>,
    etp: Option<f64>,
    correction: f64,
) -> AppResult<()> {
    if place.is_none() && precipitation.is_none() {
        return Err(AppError::InvalidInput(
            "give either --place or --precipitation and --etp".to_string(),
        ));
    }
    let study = resolve_climate(place, precipitation, etp, correction)?;
    let response = natural_balance(&NaturalRequest {
        study,
        n,
        runoff_ratio,
    })?;

    println!(
        "P = {:.0} mm/a, ETp = {:.1} mm/a, n = {}",
        response.precipitation_mm, response.etp_mm, n
    );
    println!(
        "  ETr:      {:>7.1} mm/a  (v = {:.3})",
        response.balance.etr_mm, response.v
    );
    println!(
        "  Runoff:   {:>7.1} mm/a  (a = {:.3})",
        response.balance.runoff_mm, response.a
    );
    println!(
        "  Recharge: {:>7.1} mm/a  (g = {:.3})",
        response.balance.recharge_mm, response.g
    );
    Ok(())
}
