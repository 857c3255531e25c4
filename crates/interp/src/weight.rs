//! Third interpolation axis: blending results from tables published at different weights.

use aeroperf_core::math::lerp_lenient;

use crate::bracket::{Boundary, bracket};

/// Result of interpolating along the weight axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightInterpolation {
    pub value: Option<f64>,
    pub low_kg: f64,
    pub high_kg: f64,
    pub boundary: Option<Boundary>,
}

/// Interpolate per-weight values at `target_kg`.
///
/// `samples` pairs each declared table weight with the value interpolated from that table
/// and must be sorted by ascending weight. Out-of-range targets clamp to the lightest or
/// heaviest table, and a missing value is coalesced with its neighbour.
pub fn interpolate_weight(
    samples: &[(f64, Option<f64>)],
    target_kg: f64,
    epsilon: f64,
) -> Option<WeightInterpolation> {
    let weights: Vec<f64> = samples.iter().map(|(w, _)| *w).collect();
    let found = bracket(&weights, target_kg, epsilon)?;
    let (low_kg, low_value) = samples[found.low];
    let (high_kg, high_value) = samples[found.high];
    let value = if found.spans() {
        lerp_lenient(low_kg, low_value, high_kg, high_value, target_kg)
    } else {
        low_value
    };
    Some(WeightInterpolation {
        value,
        low_kg,
        high_kg,
        boundary: found.boundary,
    })
}
