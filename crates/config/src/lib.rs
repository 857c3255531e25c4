//! Configuration models and loaders for AeroPerf.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Engine tunables. Every section is optional; absent values fall back to built-in defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub aliases: AliasConfig,
    pub phase_keywords: PhaseKeywordConfig,
    pub corrections: CorrectionConfig,
    pub wind: WindConfig,
    pub defaults: DefaultsConfig,
}

/// Column-name alias overrides, in priority order.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AliasConfig {
    pub altitude: Option<Vec<String>>,
    pub temperature: Option<Vec<String>>,
    pub ground_roll: Option<Vec<String>>,
    pub distance_50ft: Option<Vec<String>>,
}

/// Table-name keywords used to recognise a phase.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PhaseKeywordConfig {
    pub takeoff: Option<Vec<String>>,
    pub landing: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CorrectionConfig {
    pub wet: Option<f64>,
    pub grass: Option<f64>,
    pub slope_per_percent: Option<f64>,
    pub headwind_per_10kt: Option<f64>,
    pub tailwind_per_10kt: Option<f64>,
    pub safety_margin: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WindConfig {
    pub calm_threshold_kt: Option<f64>,
    pub takeoff_tailwind_tolerance_kt: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub confidence: Option<f64>,
    pub landing_fuel_burn_kg: Option<f64>,
    pub wet_precipitation_codes: Option<Vec<String>>,
    /// Interpolate between tables published at different weights.
    pub interpolate_weight: Option<bool>,
    pub axis_epsilon: Option<f64>,
}

/// Aircraft entry of a catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AircraftConfig {
    pub name: String,
    #[serde(default)]
    pub registration: Option<String>,
    pub max_takeoff_weight_kg: f64,
    /// Estimated trip fuel burn subtracted for landing computations.
    #[serde(default)]
    pub fuel_burn_kg: Option<f64>,
    /// Runway surfaces the aircraft may use; empty means unrestricted.
    #[serde(default)]
    pub surfaces: Vec<String>,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// Performance table as published: free-form rows keyed by source column names.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    #[serde(alias = "table_name")]
    pub name: String,
    #[serde(default, alias = "table_type")]
    pub phase: Option<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, alias = "data")]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Airport entry of a catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AirportConfig {
    pub icao: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elevation_ft: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    #[serde(default)]
    pub runways: Vec<RunwayConfig>,
}

/// Physical runway, e.g. `designator = "05/23"`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunwayConfig {
    pub designator: String,
    /// Published heading of the first end, overriding the designator number.
    #[serde(default)]
    pub qfu: Option<f64>,
    #[serde(default)]
    pub surface: Option<String>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load engine settings from a TOML, JSON or YAML file.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let config = match Format::of(path) {
        Format::Toml => toml::from_str(&std::fs::read_to_string(path)?)?,
        Format::Json => serde_json::from_reader(File::open(path)?)?,
        Format::Yaml => serde_yaml::from_reader(File::open(path)?)?,
    };
    debug!(path = %path.display(), "loaded engine configuration");
    Ok(config)
}

/// Load aircraft from a YAML/JSON list, a single TOML file, or a directory of TOML files.
pub fn load_aircraft_configs<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    let aircraft: Vec<AircraftConfig> = load_records(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        count = aircraft.len(),
        "loaded aircraft catalog"
    );
    Ok(aircraft)
}

/// Load airports from a YAML/JSON list, a single TOML file, or a directory of TOML files.
pub fn load_airport_configs<P: AsRef<Path>>(path: P) -> Result<Vec<AirportConfig>, ConfigError> {
    let airports: Vec<AirportConfig> = load_records(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        count = airports.len(),
        "loaded airport catalog"
    );
    Ok(airports)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        return read_dir_records(path);
    }
    match Format::of(path) {
        Format::Toml => {
            let contents = std::fs::read_to_string(path)?;
            let record: T = toml::from_str(&contents)?;
            Ok(vec![record])
        }
        Format::Json => Ok(serde_json::from_reader(File::open(path)?)?),
        Format::Yaml => Ok(serde_yaml::from_reader(File::open(path)?)?),
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        debug!(path = %path.display(), "reading catalog entry");
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
