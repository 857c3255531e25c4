//! Interpolation over normalized performance grids.
//!
//! The interpolator brackets the target on each axis independently, interpolates along the
//! temperature axis for the low and high altitude rows, then along the altitude axis. Missing
//! cells are coalesced with their neighbour (see [`aeroperf_core::math::coalesce`]) so that
//! sparse manufacturer tables still produce a number.

pub mod bracket;
pub mod weight;

use std::fmt;

use serde::Serialize;

use aeroperf_core::constants::AXIS_EPSILON;
use aeroperf_core::math::lerp_lenient;
use aeroperf_core::units::round_m;
use aeroperf_tables::{NormalizedGrid, Series};

pub use bracket::{AxisBracket, Boundary, bracket};
pub use weight::{WeightInterpolation, interpolate_weight};

/// Interpolation strategy that produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterpolationMethod {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "linear-1D")]
    Linear1D,
    #[serde(rename = "bilinear-2D")]
    Bilinear2D,
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Linear1D => f.write_str("linear-1D"),
            Self::Bilinear2D => f.write_str("bilinear-2D"),
        }
    }
}

/// Grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Altitude,
    Temperature,
    Weight,
}

impl Axis {
    fn unit(self) -> &'static str {
        match self {
            Self::Altitude => "ft",
            Self::Temperature => "°C",
            Self::Weight => "kg",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Altitude => f.write_str("altitude"),
            Self::Temperature => f.write_str("temperature"),
            Self::Weight => f.write_str("weight"),
        }
    }
}

/// A target that fell outside the sampled range and was clamped to an edge sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryCaveat {
    pub axis: Axis,
    pub side: Boundary,
    pub target: f64,
    pub clamped_to: f64,
}

impl fmt::Display for BoundaryCaveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.axis.unit();
        write!(
            f,
            "{} {}{unit} is {} the table range, clamped to {}{unit}",
            self.axis, self.target, self.side, self.clamped_to
        )
    }
}

/// A grid cell that took part in the interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerPoint {
    pub altitude_ft: f64,
    pub temperature_c: f64,
    pub value: Option<f64>,
}

/// Explainability record attached to every interpolated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolationDetails {
    pub target_altitude_ft: f64,
    pub target_temperature_c: f64,
    pub altitudes_in_table: Vec<f64>,
    pub temperatures_in_table: Vec<f64>,
    pub altitude_bracket: [f64; 2],
    pub temperature_bracket: [f64; 2],
    pub exact_match: bool,
    pub method: InterpolationMethod,
    pub boundaries: Vec<BoundaryCaveat>,
    pub corners: Vec<CornerPoint>,
}

/// Interpolated value with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpolation {
    /// Unrounded value, kept for further composition (corrections, weight axis).
    pub value: Option<f64>,
    pub details: InterpolationDetails,
}

impl Interpolation {
    /// Value rounded to the nearest metre.
    pub fn display_value(&self) -> Option<f64> {
        self.value.map(round_m)
    }
}

/// Bilinear interpolator with a configurable exact-hit tolerance.
#[derive(Debug, Clone, Copy)]
pub struct GridInterpolator {
    epsilon: f64,
}

impl Default for GridInterpolator {
    fn default() -> Self {
        Self {
            epsilon: AXIS_EPSILON,
        }
    }
}

impl GridInterpolator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Interpolate `series` at `(altitude_ft, temperature_c)`.
    ///
    /// Returns `None` when the grid has an empty axis or the target is not finite; a missing
    /// value with a well-formed grid is reported through `Interpolation::value`.
    pub fn interpolate(
        &self,
        grid: &NormalizedGrid,
        series: Series,
        altitude_ft: f64,
        temperature_c: f64,
    ) -> Option<Interpolation> {
        let altitudes = grid.altitudes();
        let temperatures = grid.temperatures();
        let alt = bracket(altitudes, altitude_ft, self.epsilon)?;
        let temp = bracket(temperatures, temperature_c, self.epsilon)?;

        let cell = |a: usize, t: usize| grid.cell(series, a, t);
        let exact_match = alt.exact && temp.exact;

        let value = if exact_match {
            cell(alt.low, temp.low)
        } else {
            let (t1, t2) = (temperatures[temp.low], temperatures[temp.high]);
            let low_row = lerp_lenient(
                t1,
                cell(alt.low, temp.low),
                t2,
                cell(alt.low, temp.high),
                temperature_c,
            );
            let high_row = lerp_lenient(
                t1,
                cell(alt.high, temp.low),
                t2,
                cell(alt.high, temp.high),
                temperature_c,
            );
            lerp_lenient(
                altitudes[alt.low],
                low_row,
                altitudes[alt.high],
                high_row,
                altitude_ft,
            )
        };

        let method = if exact_match {
            InterpolationMethod::Exact
        } else if alt.spans() && temp.spans() {
            InterpolationMethod::Bilinear2D
        } else {
            InterpolationMethod::Linear1D
        };

        let mut boundaries = Vec::new();
        if let Some(side) = alt.boundary {
            boundaries.push(BoundaryCaveat {
                axis: Axis::Altitude,
                side,
                target: altitude_ft,
                clamped_to: altitudes[alt.low],
            });
        }
        if let Some(side) = temp.boundary {
            boundaries.push(BoundaryCaveat {
                axis: Axis::Temperature,
                side,
                target: temperature_c,
                clamped_to: temperatures[temp.low],
            });
        }

        let mut corners: Vec<CornerPoint> = Vec::with_capacity(4);
        for a in [alt.low, alt.high] {
            for t in [temp.low, temp.high] {
                let corner = CornerPoint {
                    altitude_ft: altitudes[a],
                    temperature_c: temperatures[t],
                    value: cell(a, t),
                };
                if !corners.contains(&corner) {
                    corners.push(corner);
                }
            }
        }

        Some(Interpolation {
            value,
            details: InterpolationDetails {
                target_altitude_ft: altitude_ft,
                target_temperature_c: temperature_c,
                altitudes_in_table: altitudes.to_vec(),
                temperatures_in_table: temperatures.to_vec(),
                altitude_bracket: [altitudes[alt.low], altitudes[alt.high]],
                temperature_bracket: [temperatures[temp.low], temperatures[temp.high]],
                exact_match,
                method,
                boundaries,
                corners,
            },
        })
    }
}
