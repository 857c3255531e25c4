//! Request-side models: aircraft, airport, overrides and runway state.

use serde::{Deserialize, Serialize};

use aeroperf_tables::{Phase, PerformanceTable};
use aeroperf_wind::RunwayEnd;

use crate::weather::WeatherObservation;

/// Aircraft with its performance tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub name: String,
    #[serde(default)]
    pub registration: Option<String>,
    pub max_takeoff_weight_kg: f64,
    #[serde(default)]
    pub fuel_burn_kg: Option<f64>,
    /// Allowed runway surfaces; empty means unrestricted.
    #[serde(default)]
    pub surfaces: Vec<String>,
    #[serde(default)]
    pub tables: Vec<PerformanceTable>,
}

/// Airport with a resolved elevation and its runway ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub icao: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elevation_ft: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    #[serde(default)]
    pub runways: Vec<RunwayEnd>,
}

/// Values entered by the pilot that beat every other source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualOverrides {
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// Runway state that is not derived from the weather report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunwayConditions {
    #[serde(default)]
    pub grass: bool,
    #[serde(default)]
    pub slope_percent: f64,
}

/// Everything one performance computation needs.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceRequest<'a> {
    pub phase: Phase,
    pub aircraft: &'a Aircraft,
    pub airport: &'a Airport,
    pub weather: Option<&'a WeatherObservation>,
    pub overrides: ManualOverrides,
    /// Total from the weight-and-balance sheet.
    pub weight_and_balance_kg: Option<f64>,
    pub runway: RunwayConditions,
}

impl<'a> PerformanceRequest<'a> {
    pub fn new(phase: Phase, aircraft: &'a Aircraft, airport: &'a Airport) -> Self {
        Self {
            phase,
            aircraft,
            airport,
            weather: None,
            overrides: ManualOverrides::default(),
            weight_and_balance_kg: None,
            runway: RunwayConditions::default(),
        }
    }

    pub fn with_weather(mut self, weather: &'a WeatherObservation) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_overrides(mut self, overrides: ManualOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_weight_and_balance(mut self, total_kg: f64) -> Self {
        self.weight_and_balance_kg = Some(total_kg);
        self
    }

    pub fn with_runway_conditions(mut self, runway: RunwayConditions) -> Self {
        self.runway = runway;
        self
    }
}
