//! Locating a target value on a sorted sample axis.

use std::fmt;

use serde::Serialize;

/// Side of the sampled range a target fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    BelowRange,
    AboveRange,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowRange => f.write_str("below"),
            Self::AboveRange => f.write_str("above"),
        }
    }
}

/// Sample indices surrounding a target.
///
/// `low == high` for exact hits and for targets clamped to an edge sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBracket {
    pub low: usize,
    pub high: usize,
    pub exact: bool,
    pub boundary: Option<Boundary>,
}

impl AxisBracket {
    fn point(index: usize, exact: bool, boundary: Option<Boundary>) -> Self {
        Self {
            low: index,
            high: index,
            exact,
            boundary,
        }
    }

    /// Whether the bracket spans two distinct samples.
    pub fn spans(&self) -> bool {
        self.low != self.high
    }
}

/// Bracket `target` on an ascending `axis`.
///
/// A sample within `epsilon` of the target is an exact hit. Targets outside the sampled
/// range clamp to the nearest edge; there is no extrapolation. Returns `None` for an empty
/// axis or a non-finite target.
pub fn bracket(axis: &[f64], target: f64, epsilon: f64) -> Option<AxisBracket> {
    if axis.is_empty() || !target.is_finite() {
        return None;
    }
    if let Some(index) = axis.iter().position(|&v| (v - target).abs() < epsilon) {
        return Some(AxisBracket::point(index, true, None));
    }
    let last = axis.len() - 1;
    if target < axis[0] {
        return Some(AxisBracket::point(0, false, Some(Boundary::BelowRange)));
    }
    if target > axis[last] {
        return Some(AxisBracket::point(last, false, Some(Boundary::AboveRange)));
    }
    axis.windows(2)
        .position(|pair| pair[0] <= target && target <= pair[1])
        .map(|low| AxisBracket {
            low,
            high: low + 1,
            exact: false,
            boundary: None,
        })
}
