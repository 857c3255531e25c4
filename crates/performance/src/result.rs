//! Result shape returned by the orchestrator, and the caveats it collects.

use serde::Serialize;
use thiserror::Error;

use aeroperf_corrections::{CorrectedDistance, Corrections};
use aeroperf_interp::{Boundary, BoundaryCaveat, InterpolationDetails};
use aeroperf_tables::{Phase, RowIssue, SelectionStrategy, Series};
use aeroperf_wind::{RunwayAnalysis, WindVector};

/// Human-readable problem found while computing a result. Never fatal.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(into = "String")]
pub enum Caveat {
    #[error("no {phase} table found")]
    NoTable { phase: Phase },
    #[error("no table is marked as {phase}; falling back to `{table}`")]
    FallbackTable { phase: Phase, table: String },
    #[error("{candidates} {phase} tables match without a usable weight; using the first, `{table}`")]
    AmbiguousTable {
        phase: Phase,
        table: String,
        candidates: usize,
    },
    #[error("table `{table}` has no usable altitude/temperature rows")]
    GridInsufficient { table: String },
    #[error("table `{table}`: {issue}")]
    Uncoercible { table: String, issue: RowIssue },
    #[error("no {series} value could be interpolated")]
    SeriesUnavailable { series: Series },
    #[error("{0}")]
    Boundary(BoundaryCaveat),
    #[error("elevation of {icao} is unknown, assuming sea level")]
    ElevationDefaulted { icao: String },
    #[error("elevation of {icao} is not a finite number")]
    ElevationInvalid { icao: String },
    #[error("no runway data for {icao}")]
    NoRunways { icao: String },
    #[error("no runway surface at {icao} is approved for {aircraft}; ranking all runways")]
    NoCompatibleSurface { icao: String, aircraft: String },
}

impl From<Caveat> for String {
    fn from(caveat: Caveat) -> Self {
        caveat.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AltitudeSource {
    Feet,
    Metres,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemperatureSource {
    Manual,
    Observed,
    Isa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightSource {
    Manual,
    WeightAndBalance,
    MaxTakeoff,
}

/// Table the distances were read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableUsed {
    pub name: String,
    pub strategy: SelectionStrategy,
    pub declared_weight_kg: Option<f64>,
}

/// Inputs as resolved by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionsUsed {
    /// `None` when the airport elevation could not be resolved.
    pub altitude_ft: Option<f64>,
    pub altitude_source: Option<AltitudeSource>,
    pub temperature_c: Option<f64>,
    pub temperature_source: Option<TemperatureSource>,
    pub weight_kg: f64,
    pub weight_source: WeightSource,
    /// Fuel burn subtracted from the weight, landing only.
    pub fuel_burn_kg: Option<f64>,
    pub wind: Option<WindVector>,
    pub runway_wet: bool,
    pub table: Option<TableUsed>,
}

/// Position of the target weight between the two tables blended together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightAxis {
    pub target_kg: f64,
    pub low_kg: f64,
    pub high_kg: f64,
    pub low_table: String,
    pub high_table: String,
    pub boundary: Option<Boundary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterpolationReport {
    pub ground_roll: Option<InterpolationDetails>,
    pub distance_50ft: Option<InterpolationDetails>,
    pub weight: Option<WeightAxis>,
}

/// Corrections fed to the corrector and what they did to each distance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppliedCorrections {
    pub inputs: Corrections,
    pub ground_roll: Option<CorrectedDistance>,
    pub distance_50ft: Option<CorrectedDistance>,
}

/// One takeoff or landing computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceResult {
    pub airport: String,
    pub phase: Phase,
    pub ground_roll_m: Option<f64>,
    pub distance_50ft_m: Option<f64>,
    pub ground_roll_with_margin_m: Option<f64>,
    pub distance_50ft_with_margin_m: Option<f64>,
    pub conditions_used: ConditionsUsed,
    pub confidence: f64,
    pub interpolation_details: InterpolationReport,
    pub corrections: AppliedCorrections,
    pub runways: Vec<RunwayAnalysis>,
    pub suggested_runway: Option<RunwayAnalysis>,
    pub errors: Vec<Caveat>,
}

impl PerformanceResult {
    /// Whether at least one distance was produced.
    pub fn has_distances(&self) -> bool {
        self.ground_roll_m.is_some() || self.distance_50ft_m.is_some()
    }
}
