use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use aeroperf::config::{load_aircraft_configs, load_airport_configs};
use aeroperf::export::json;
use aeroperf::performance::{
    ManualOverrides, PerformanceRequest, PerformanceResult, Phase, RunwayConditions,
    WeatherObservation, aircraft, airport, compute_performance,
};
use aeroperf_cli::{init_tracing, load_settings, log_caveats, metres};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Takeoff/landing distances from aircraft performance tables"
)]
struct Cli {
    /// Aircraft name or registration (defaults to the first catalog entry)
    #[arg(long)]
    aircraft: Option<String>,

    /// Airport ICAO code
    #[arg(long)]
    airport: String,

    /// Flight phase
    #[arg(long, value_enum, default_value_t = PhaseArg::Takeoff)]
    phase: PhaseArg,

    /// Aircraft catalog (YAML/JSON list, TOML file or directory of TOML files)
    #[arg(long, default_value = "configs/aircraft")]
    aircraft_catalog: PathBuf,

    /// Airport catalog (YAML/JSON list, TOML file or directory of TOML files)
    #[arg(long, default_value = "configs/airports")]
    airport_catalog: PathBuf,

    /// Engine configuration file (aliases, keywords, factors, wind policy)
    #[arg(long)]
    engine_config: Option<PathBuf>,

    /// Raw METAR used for temperature, wind and precipitation
    #[arg(long)]
    metar: Option<String>,

    /// Manual outside air temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<f64>,

    /// Manual aircraft weight in kg
    #[arg(long)]
    weight: Option<f64>,

    /// Weight-and-balance total in kg
    #[arg(long)]
    wb_total: Option<f64>,

    /// Grass runway
    #[arg(long, default_value_t = false)]
    grass: bool,

    /// Runway slope in percent
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    slope: f64,

    /// Write the full result as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum PhaseArg {
    Takeoff,
    Landing,
}

impl From<PhaseArg> for Phase {
    fn from(value: PhaseArg) -> Self {
        match value {
            PhaseArg::Takeoff => Phase::Takeoff,
            PhaseArg::Landing => Phase::Landing,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.engine_config.as_deref())?;
    let aircraft_catalog = load_aircraft_configs(&cli.aircraft_catalog)?;
    let airport_catalog = load_airport_configs(&cli.airport_catalog)?;
    let aircraft = aircraft::select(&aircraft_catalog, cli.aircraft.as_deref())?;
    let airport = airport::select(&airport_catalog, &cli.airport)?;
    let weather = cli.metar.clone().map(WeatherObservation::from_metar);

    let mut request = PerformanceRequest::new(cli.phase.into(), &aircraft, &airport)
        .with_overrides(ManualOverrides {
            temperature_c: cli.temperature,
            weight_kg: cli.weight,
        })
        .with_runway_conditions(RunwayConditions {
            grass: cli.grass,
            slope_percent: cli.slope,
        });
    if let Some(weather) = &weather {
        request = request.with_weather(weather);
    }
    if let Some(total) = cli.wb_total {
        request = request.with_weight_and_balance(total);
    }

    let result = compute_performance(&request, &settings);
    log_caveats(&airport.icao, &result.errors);

    if let Some(path) = &cli.json {
        json::write_path(path, "performance", &result)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    print_summary(&aircraft.name, &result);
    Ok(())
}

fn print_summary(aircraft: &str, result: &PerformanceResult) {
    let conditions = &result.conditions_used;
    let phase = match result.phase {
        Phase::Takeoff => "Takeoff",
        Phase::Landing => "Landing",
    };

    println!("=== {phase} performance at {} ===", result.airport);
    println!("Aircraft       : {aircraft}");
    if let Some(table) = &conditions.table {
        println!("Table          : {}", table.name);
    }
    match (conditions.altitude_ft, conditions.temperature_c) {
        (Some(alt), Some(temp)) => println!(
            "Conditions     : {alt:.0} ft, {temp:.1} °C, {:.0} kg",
            conditions.weight_kg
        ),
        _ => println!("Conditions     : unresolved"),
    }
    println!(
        "Ground roll    : {} (with margin {})",
        metres(result.ground_roll_m),
        metres(result.ground_roll_with_margin_m)
    );
    println!(
        "50 ft distance : {} (with margin {})",
        metres(result.distance_50ft_m),
        metres(result.distance_50ft_with_margin_m)
    );
    if let Some(runway) = &result.suggested_runway {
        println!(
            "Runway         : {} (headwind {:.1} kt, crosswind {:.1} kt, {})",
            runway.ident, runway.headwind_kt, runway.crosswind_kt, runway.category
        );
    }
    println!("Confidence     : {:.2}", result.confidence);
    for caveat in &result.errors {
        println!("Caveat         : {caveat}");
    }
}
