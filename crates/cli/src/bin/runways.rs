use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use aeroperf::config::load_airport_configs;
use aeroperf::export::runways as runway_export;
use aeroperf::performance::{WeatherObservation, airport};
use aeroperf::wind::{RunwayEnd, WindAnalyzer, WindVector, ends_from_designator};
use aeroperf_cli::{init_tracing, load_settings};

#[derive(Parser)]
#[command(author, version, about = "Rank runway ends for a surface wind")]
struct Cli {
    /// Airport ICAO code to take runways from
    #[arg(long)]
    airport: Option<String>,

    /// Airport catalog (YAML/JSON list, TOML file or directory of TOML files)
    #[arg(long, default_value = "configs/airports")]
    airport_catalog: PathBuf,

    /// Runway designator such as 05/23 (repeatable, used instead of --airport)
    #[arg(long = "runway")]
    runways: Vec<String>,

    /// Wind direction in degrees (omit for calm)
    #[arg(long)]
    wind_dir: Option<f64>,

    /// Wind speed in knots
    #[arg(long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Gust speed in knots
    #[arg(long)]
    gust: Option<f64>,

    /// Variable wind direction
    #[arg(long, default_value_t = false, conflicts_with = "wind_dir")]
    variable: bool,

    /// Raw METAR to read the wind from, instead of the wind flags
    #[arg(long, conflicts_with_all = ["wind_dir", "variable"])]
    metar: Option<String>,

    /// Engine configuration file (wind policy)
    #[arg(long)]
    engine_config: Option<PathBuf>,

    /// Write the ranking as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = load_settings(cli.engine_config.as_deref())?;

    let ends = runway_ends(&cli)?;
    let wind = match &cli.metar {
        Some(raw) => WeatherObservation::from_metar(raw.as_str())
            .wind()
            .ok_or_else(|| anyhow::anyhow!("no wind group found in METAR '{raw}'"))?,
        None => wind_from_flags(&cli),
    };

    let analyzer = WindAnalyzer::new(settings.wind);
    let report = analyzer.analyze(&wind, &ends);

    if let Some(path) = &cli.csv {
        runway_export::write_path(path, &report.runways)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("Rank  Runway  Heading  Headwind  Crosswind  Side   Category");
    for (index, rwy) in report.runways.iter().enumerate() {
        println!(
            "{:<5} {:<7} {:>6.0}°  {:>6.1}kt  {:>7.1}kt  {:<5}  {}",
            index + 1,
            rwy.ident,
            rwy.heading_deg,
            rwy.headwind_kt,
            rwy.crosswind_kt,
            rwy.crosswind_side.to_string(),
            rwy.category
        );
    }
    if let Some(takeoff) = analyzer.preferred_takeoff(&report) {
        println!("Takeoff: {}", takeoff.ident);
    }
    if let Some(landing) = analyzer.preferred_landing(&report) {
        println!("Landing: {}", landing.ident);
    }
    Ok(())
}

fn runway_ends(cli: &Cli) -> anyhow::Result<Vec<RunwayEnd>> {
    if let Some(icao) = &cli.airport {
        let catalog = load_airport_configs(&cli.airport_catalog)?;
        return Ok(airport::select(&catalog, icao)?.runways);
    }
    if cli.runways.is_empty() {
        bail!("either --airport or at least one --runway is required");
    }
    let mut ends = Vec::new();
    for designator in &cli.runways {
        ends.extend(ends_from_designator(designator, None, None)?);
    }
    Ok(ends)
}

fn wind_from_flags(cli: &Cli) -> WindVector {
    let wind = match (cli.variable, cli.wind_dir) {
        (true, _) => WindVector::variable(cli.wind_speed),
        (false, Some(direction)) => WindVector::new(direction, cli.wind_speed),
        (false, None) => WindVector::calm(),
    };
    match cli.gust {
        Some(gust) => wind.with_gust(gust),
        None => wind,
    }
}
