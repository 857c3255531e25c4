//! Runtime engine settings resolved from [`EngineConfig`].

use aeroperf_config::EngineConfig;
use aeroperf_core::constants::AXIS_EPSILON;
use aeroperf_corrections::CorrectionFactors;
use aeroperf_tables::{FieldAliases, PhaseKeywords};
use aeroperf_wind::WindPolicy;

/// Confidence reported when the source table carries none.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
/// Fuel burn subtracted for landing when the aircraft declares none.
pub const DEFAULT_LANDING_FUEL_BURN_KG: f64 = 50.0;

/// Everything the orchestrator can be tuned with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub aliases: FieldAliases,
    pub phase_keywords: PhaseKeywords,
    pub factors: CorrectionFactors,
    pub wind: WindPolicy,
    pub default_confidence: f64,
    pub landing_fuel_burn_kg: f64,
    /// Precipitation codes that make the runway wet.
    pub wet_codes: Vec<String>,
    pub interpolate_weight: bool,
    pub axis_epsilon: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            aliases: FieldAliases::default(),
            phase_keywords: PhaseKeywords::default(),
            factors: CorrectionFactors::default(),
            wind: WindPolicy::default(),
            default_confidence: DEFAULT_CONFIDENCE,
            landing_fuel_burn_kg: DEFAULT_LANDING_FUEL_BURN_KG,
            wet_codes: ["RA", "SN", "DZ"].iter().map(|c| c.to_string()).collect(),
            interpolate_weight: false,
            axis_epsilon: AXIS_EPSILON,
        }
    }
}

impl EngineSettings {
    /// Overlay the values present in `config` on the defaults.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut settings = Self::default();

        let aliases = &config.aliases;
        override_with(&mut settings.aliases.altitude, &aliases.altitude);
        override_with(&mut settings.aliases.temperature, &aliases.temperature);
        override_with(&mut settings.aliases.ground_roll, &aliases.ground_roll);
        override_with(&mut settings.aliases.distance_50ft, &aliases.distance_50ft);

        override_with(&mut settings.phase_keywords.takeoff, &config.phase_keywords.takeoff);
        override_with(&mut settings.phase_keywords.landing, &config.phase_keywords.landing);

        let corrections = &config.corrections;
        let factors = &mut settings.factors;
        override_with(&mut factors.wet, &corrections.wet);
        override_with(&mut factors.grass, &corrections.grass);
        override_with(&mut factors.slope_per_percent, &corrections.slope_per_percent);
        override_with(&mut factors.headwind_per_10kt, &corrections.headwind_per_10kt);
        override_with(&mut factors.tailwind_per_10kt, &corrections.tailwind_per_10kt);
        override_with(&mut factors.safety_margin, &corrections.safety_margin);

        override_with(&mut settings.wind.calm_threshold_kt, &config.wind.calm_threshold_kt);
        override_with(
            &mut settings.wind.takeoff_tailwind_tolerance_kt,
            &config.wind.takeoff_tailwind_tolerance_kt,
        );

        let defaults = &config.defaults;
        override_with(&mut settings.default_confidence, &defaults.confidence);
        override_with(&mut settings.landing_fuel_burn_kg, &defaults.landing_fuel_burn_kg);
        override_with(&mut settings.wet_codes, &defaults.wet_precipitation_codes);
        override_with(&mut settings.interpolate_weight, &defaults.interpolate_weight);
        override_with(&mut settings.axis_epsilon, &defaults.axis_epsilon);

        settings
    }
}

fn override_with<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}
