//! Whole-flight planner chaining departure takeoff, destination landing and alternates.

use serde::Serialize;

use aeroperf_tables::Phase;

use crate::inputs::{Aircraft, Airport, ManualOverrides, PerformanceRequest, RunwayConditions};
use crate::orchestrator::compute_performance;
use crate::result::PerformanceResult;
use crate::settings::EngineSettings;
use crate::weather::WeatherObservation;

/// One airport of the flight with its local conditions.
#[derive(Debug, Clone, Copy)]
pub struct FlightLeg<'a> {
    pub airport: &'a Airport,
    pub weather: Option<&'a WeatherObservation>,
    pub overrides: ManualOverrides,
    pub runway: RunwayConditions,
}

impl<'a> FlightLeg<'a> {
    pub fn new(airport: &'a Airport) -> Self {
        Self {
            airport,
            weather: None,
            overrides: ManualOverrides::default(),
            runway: RunwayConditions::default(),
        }
    }

    pub fn with_weather(mut self, weather: &'a WeatherObservation) -> Self {
        self.weather = Some(weather);
        self
    }

    fn request(&self, phase: Phase, plan: &FlightPlan<'a>) -> PerformanceRequest<'a> {
        PerformanceRequest {
            phase,
            aircraft: plan.aircraft,
            airport: self.airport,
            weather: self.weather,
            overrides: self.overrides,
            weight_and_balance_kg: plan.weight_and_balance_kg,
            runway: self.runway,
        }
    }
}

/// Inputs for an end-to-end flight.
#[derive(Debug, Clone)]
pub struct FlightPlan<'a> {
    pub aircraft: &'a Aircraft,
    pub weight_and_balance_kg: Option<f64>,
    pub departure: FlightLeg<'a>,
    pub destination: FlightLeg<'a>,
    pub alternates: Vec<FlightLeg<'a>>,
}

/// Takeoff at departure, landing at destination and at each alternate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPerformance {
    pub departure: PerformanceResult,
    pub arrival: PerformanceResult,
    pub alternates: Vec<PerformanceResult>,
}

impl FlightPerformance {
    /// Every result of the flight, departure first.
    pub fn results(&self) -> impl Iterator<Item = &PerformanceResult> {
        std::iter::once(&self.departure)
            .chain(std::iter::once(&self.arrival))
            .chain(self.alternates.iter())
    }
}

/// Run the performance computation for every airport of the flight.
pub fn plan_flight(plan: &FlightPlan<'_>, settings: &EngineSettings) -> FlightPerformance {
    let departure = compute_performance(&plan.departure.request(Phase::Takeoff, plan), settings);
    let arrival = compute_performance(&plan.destination.request(Phase::Landing, plan), settings);
    let alternates = plan
        .alternates
        .iter()
        .map(|leg| compute_performance(&leg.request(Phase::Landing, plan), settings))
        .collect();

    FlightPerformance {
        departure,
        arrival,
        alternates,
    }
}
