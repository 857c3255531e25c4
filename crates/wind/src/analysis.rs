//! Per-end wind components, ranking, and takeoff/landing runway selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use aeroperf_core::angles::{angular_difference, signed_difference};

use crate::runway::RunwayEnd;
use crate::vector::{WindDirection, WindVector};

const SNAP_KT: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosswindSide {
    Left,
    Right,
}

impl fmt::Display for CrosswindSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Suitability of a runway end by the angle between wind and runway heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Optimal,
    Good,
    Acceptable,
    Poor,
}

impl Category {
    /// ≤ 30° optimal, ≤ 45° good, ≤ 90° acceptable, otherwise poor.
    pub fn from_angle(angle_deg: f64) -> Self {
        if angle_deg <= 30.0 {
            Self::Optimal
        } else if angle_deg <= 45.0 {
            Self::Good
        } else if angle_deg <= 90.0 {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Optimal => "optimal",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Poor => "poor",
        };
        f.write_str(label)
    }
}

/// Wind components for one runway end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayAnalysis {
    pub ident: String,
    pub heading_deg: f64,
    pub surface: Option<String>,
    /// Positive along the runway into the aircraft's nose, negative for a tailwind.
    pub headwind_kt: f64,
    pub crosswind_kt: f64,
    pub gust_crosswind_kt: Option<f64>,
    pub crosswind_side: CrosswindSide,
    pub angle_diff_deg: f64,
    pub category: Category,
    pub is_tailwind: bool,
    /// `2·headwind − crosswind`.
    pub score: f64,
}

impl RunwayAnalysis {
    fn still_air(end: &RunwayEnd) -> Self {
        Self {
            ident: end.ident.clone(),
            heading_deg: end.heading_deg,
            surface: end.surface.clone(),
            headwind_kt: 0.0,
            crosswind_kt: 0.0,
            gust_crosswind_kt: None,
            crosswind_side: CrosswindSide::Left,
            angle_diff_deg: 0.0,
            category: Category::Optimal,
            is_tailwind: false,
            score: 0.0,
        }
    }

    fn from_geometry(wind_deg: f64, wind: &WindVector, end: &RunwayEnd) -> Self {
        let angle_diff_deg = angular_difference(wind_deg, end.heading_deg);
        let (sin, cos) = angle_diff_deg.to_radians().sin_cos();
        let headwind_kt = snap(wind.speed_kt * cos);
        let crosswind_kt = snap((wind.speed_kt * sin).abs());
        let crosswind_side = if signed_difference(wind_deg, end.heading_deg) > 0.0 {
            CrosswindSide::Right
        } else {
            CrosswindSide::Left
        };
        Self {
            ident: end.ident.clone(),
            heading_deg: end.heading_deg,
            surface: end.surface.clone(),
            headwind_kt,
            crosswind_kt,
            gust_crosswind_kt: wind.gust_kt.map(|gust| snap((gust * sin).abs())),
            crosswind_side,
            angle_diff_deg,
            category: Category::from_angle(angle_diff_deg),
            is_tailwind: headwind_kt < 0.0,
            score: 2.0 * headwind_kt - crosswind_kt,
        }
    }

    /// Tailwind component, zero when the wind is on the nose.
    pub fn tailwind_kt(&self) -> f64 {
        (-self.headwind_kt).max(0.0)
    }
}

fn snap(v: f64) -> f64 {
    if v.abs() < SNAP_KT { 0.0 } else { v }
}

/// How the wind was interpreted for this report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindCondition {
    Directional,
    Calm,
    Variable,
}

/// Analysed runway ends, best first for a directional wind, input order otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindReport {
    pub condition: WindCondition,
    pub runways: Vec<RunwayAnalysis>,
}

impl WindReport {
    pub fn best(&self) -> Option<&RunwayAnalysis> {
        self.runways.first()
    }
}

/// Tunables for calm detection and takeoff selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindPolicy {
    /// Speeds below this are treated as calm.
    pub calm_threshold_kt: f64,
    /// Largest tailwind accepted for a takeoff pick before falling back to the best end.
    pub takeoff_tailwind_tolerance_kt: f64,
}

impl Default for WindPolicy {
    fn default() -> Self {
        Self {
            calm_threshold_kt: 1.0,
            takeoff_tailwind_tolerance_kt: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindAnalyzer {
    policy: WindPolicy,
}

impl WindAnalyzer {
    pub fn new(policy: WindPolicy) -> Self {
        Self { policy }
    }

    /// Compute components for every end and rank them by descending score.
    ///
    /// Calm, variable, or sub-threshold winds skip the geometry: every end is reported with
    /// zero components, in input order.
    pub fn analyze(&self, wind: &WindVector, ends: &[RunwayEnd]) -> WindReport {
        let directional = match wind.direction {
            WindDirection::Degrees(deg)
                if deg.is_finite() && wind.speed_kt >= self.policy.calm_threshold_kt =>
            {
                Some(deg)
            }
            _ => None,
        };

        let Some(wind_deg) = directional else {
            let condition = if wind.direction == WindDirection::Variable {
                WindCondition::Variable
            } else {
                WindCondition::Calm
            };
            return WindReport {
                condition,
                runways: ends.iter().map(RunwayAnalysis::still_air).collect(),
            };
        };

        let mut runways: Vec<RunwayAnalysis> = ends
            .iter()
            .map(|end| RunwayAnalysis::from_geometry(wind_deg, wind, end))
            .collect();
        runways.sort_by(|a, b| b.score.total_cmp(&a.score));
        WindReport {
            condition: WindCondition::Directional,
            runways,
        }
    }

    /// Highest-scoring end whose tailwind stays within tolerance, else the best available.
    pub fn preferred_takeoff<'a>(&self, report: &'a WindReport) -> Option<&'a RunwayAnalysis> {
        let limit = -self.policy.takeoff_tailwind_tolerance_kt;
        report
            .runways
            .iter()
            .find(|rwy| rwy.headwind_kt > limit)
            .or_else(|| report.best())
    }

    /// First end classified optimal or good, else the best available.
    pub fn preferred_landing<'a>(&self, report: &'a WindReport) -> Option<&'a RunwayAnalysis> {
        report
            .runways
            .iter()
            .find(|rwy| matches!(rwy.category, Category::Optimal | Category::Good))
            .or_else(|| report.best())
    }
}
