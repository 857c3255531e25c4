//! Re-exported APIs for consumers of the performance crate.

pub use crate::flight::{FlightLeg, FlightPerformance, FlightPlan, plan_flight};
pub use crate::inputs::{Aircraft, Airport, ManualOverrides, PerformanceRequest, RunwayConditions};
pub use crate::orchestrator::compute_performance;
pub use crate::result::{
    AltitudeSource, AppliedCorrections, Caveat, ConditionsUsed, InterpolationReport,
    PerformanceResult, TableUsed, TemperatureSource, WeightAxis, WeightSource,
};
pub use crate::settings::EngineSettings;
pub use crate::weather::WeatherObservation;
pub use aeroperf_tables::Phase;

pub mod aircraft {
    use aeroperf_config::{AircraftConfig, TableConfig};
    use aeroperf_tables::{Phase, PerformanceTable};
    use thiserror::Error;

    use crate::inputs::Aircraft;

    /// Errors surfaced when selecting aircraft from a catalog.
    #[derive(Debug, Error)]
    pub enum AircraftError {
        #[error("aircraft '{0}' not found in catalog")]
        NotFound(String),
        #[error("aircraft catalog is empty")]
        EmptyCatalog,
    }

    /// Convert an `AircraftConfig` into the runtime `Aircraft` representation.
    pub fn from_config(config: &AircraftConfig) -> Aircraft {
        Aircraft {
            name: config.name.clone(),
            registration: config.registration.clone(),
            max_takeoff_weight_kg: config.max_takeoff_weight_kg,
            fuel_burn_kg: config.fuel_burn_kg,
            surfaces: config.surfaces.clone(),
            tables: config.tables.iter().map(table_from_config).collect(),
        }
    }

    fn table_from_config(config: &TableConfig) -> PerformanceTable {
        PerformanceTable {
            name: config.name.clone(),
            phase: config.phase.as_deref().and_then(Phase::parse),
            conditions: config.conditions.clone(),
            confidence: config.confidence,
            rows: config.rows.clone(),
        }
    }

    /// Select an aircraft by name or registration (case-insensitive), defaulting to the first entry.
    pub fn select(
        configs: &[AircraftConfig],
        requested: Option<&str>,
    ) -> Result<Aircraft, AircraftError> {
        if configs.is_empty() {
            return Err(AircraftError::EmptyCatalog);
        }

        let chosen = match requested {
            Some(name) => {
                let upper = name.to_uppercase();
                configs
                    .iter()
                    .find(|cfg| {
                        cfg.name.to_uppercase() == upper
                            || cfg
                                .registration
                                .as_deref()
                                .is_some_and(|reg| reg.to_uppercase() == upper)
                    })
                    .ok_or_else(|| AircraftError::NotFound(name.to_string()))?
            }
            None => &configs[0],
        };

        Ok(from_config(chosen))
    }
}

pub mod airport {
    use aeroperf_config::AirportConfig;
    use aeroperf_wind::{RunwayParseError, ends_from_designator};
    use thiserror::Error;

    use crate::inputs::Airport;

    /// Errors surfaced when selecting or converting airports.
    #[derive(Debug, Error)]
    pub enum AirportError {
        #[error("airport '{0}' not found in catalog")]
        NotFound(String),
        #[error("airport {icao}: runway `{designator}`: {source}")]
        Runway {
            icao: String,
            designator: String,
            source: RunwayParseError,
        },
    }

    /// Convert an `AirportConfig` into an `Airport`, expanding each designator into its ends.
    pub fn from_config(config: &AirportConfig) -> Result<Airport, AirportError> {
        let mut runways = Vec::new();
        for runway in &config.runways {
            let ends = ends_from_designator(&runway.designator, runway.qfu, runway.surface.as_deref())
                .map_err(|source| AirportError::Runway {
                    icao: config.icao.clone(),
                    designator: runway.designator.clone(),
                    source,
                })?;
            runways.extend(ends);
        }

        Ok(Airport {
            icao: config.icao.clone(),
            name: config.name.clone(),
            elevation_ft: config.elevation_ft,
            elevation_m: config.elevation_m,
            runways,
        })
    }

    /// Select an airport by ICAO code (case-insensitive).
    pub fn select(configs: &[AirportConfig], icao: &str) -> Result<Airport, AirportError> {
        let upper = icao.to_uppercase();
        let config = configs
            .iter()
            .find(|cfg| cfg.icao.to_uppercase() == upper)
            .ok_or_else(|| AirportError::NotFound(icao.to_string()))?;
        from_config(config)
    }
}
