//! Multiplicative environmental corrections for takeoff/landing distances.

use std::fmt;

use serde::Serialize;

use aeroperf_core::units::round_m;

/// Runway and wind conditions that modify a table distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Corrections {
    pub runway_wet: bool,
    pub runway_grass: bool,
    /// Runway slope in percent; the sign is ignored.
    pub slope_percent: f64,
    pub headwind_kt: f64,
    pub tailwind_kt: f64,
}

/// Correction coefficients. Defaults follow common light-aircraft flight manual guidance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectionFactors {
    pub wet: f64,
    pub grass: f64,
    /// Fractional increase per percent of slope.
    pub slope_per_percent: f64,
    /// Fractional decrease per 10 kt of headwind.
    pub headwind_per_10kt: f64,
    /// Fractional increase per 10 kt of tailwind.
    pub tailwind_per_10kt: f64,
    pub safety_margin: f64,
}

impl Default for CorrectionFactors {
    fn default() -> Self {
        Self {
            wet: 1.15,
            grass: 1.25,
            slope_per_percent: 0.10,
            headwind_per_10kt: 0.10,
            tailwind_per_10kt: 0.15,
            safety_margin: 1.15,
        }
    }
}

/// Which correction produced a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Wet,
    Grass,
    Slope,
    Headwind,
    Tailwind,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wet => f.write_str("wet runway"),
            Self::Grass => f.write_str("grass runway"),
            Self::Slope => f.write_str("runway slope"),
            Self::Headwind => f.write_str("headwind"),
            Self::Tailwind => f.write_str("tailwind"),
        }
    }
}

/// One factor applied to the base distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedFactor {
    pub kind: CorrectionKind,
    pub factor: f64,
}

/// A corrected distance and its safety-margin variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedDistance {
    pub base_m: f64,
    /// Unrounded corrected distance.
    pub corrected_m: f64,
    /// `corrected_m × safety_margin`, rounded to the nearest metre.
    pub with_margin_m: f64,
    pub factors: Vec<AppliedFactor>,
}

impl CorrectedDistance {
    /// Corrected distance rounded to the nearest metre.
    pub fn rounded_m(&self) -> f64 {
        round_m(self.corrected_m)
    }
}

/// Applies [`Corrections`] with a set of [`CorrectionFactors`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentalCorrector {
    factors: CorrectionFactors,
}

impl EnvironmentalCorrector {
    pub fn new(factors: CorrectionFactors) -> Self {
        Self { factors }
    }

    /// Apply wet, grass, slope, headwind, then tailwind factors in sequence. Factors compound.
    pub fn apply(&self, base_m: f64, corrections: &Corrections) -> CorrectedDistance {
        let f = &self.factors;
        let headwind = corrections.headwind_kt.max(0.0);
        let tailwind = corrections.tailwind_kt.max(0.0);
        let slope = corrections.slope_percent.abs();

        let candidates = [
            (CorrectionKind::Wet, corrections.runway_wet.then_some(f.wet)),
            (
                CorrectionKind::Grass,
                corrections.runway_grass.then_some(f.grass),
            ),
            (
                CorrectionKind::Slope,
                (slope > 0.0).then(|| 1.0 + f.slope_per_percent * slope),
            ),
            (
                CorrectionKind::Headwind,
                (headwind > 0.0).then(|| 1.0 - f.headwind_per_10kt * (headwind / 10.0)),
            ),
            (
                CorrectionKind::Tailwind,
                (tailwind > 0.0).then(|| 1.0 + f.tailwind_per_10kt * (tailwind / 10.0)),
            ),
        ];

        let factors: Vec<AppliedFactor> = candidates
            .into_iter()
            .filter_map(|(kind, factor)| factor.map(|factor| AppliedFactor { kind, factor }))
            .collect();
        let corrected_m = factors.iter().fold(base_m, |acc, applied| acc * applied.factor);

        CorrectedDistance {
            base_m,
            corrected_m,
            with_margin_m: round_m(corrected_m * f.safety_margin),
            factors,
        }
    }
}
