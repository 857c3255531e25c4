//! Core units, constants, and shared numeric primitives for the AeroPerf workspace.

/// Aeronautical constants. Distances in metres, altitudes in feet, temperatures in °C.
pub mod constants {
    /// Feet per metre.
    pub const FEET_PER_METRE: f64 = 3.28084;
    /// Kilograms per pound.
    pub const KG_PER_LB: f64 = 0.453_592_37;
    /// ISA temperature at mean sea level (°C).
    pub const ISA_SEA_LEVEL_C: f64 = 15.0;
    /// ISA lapse rate used by performance charts (°C per 1000 ft).
    pub const ISA_LAPSE_C_PER_1000_FT: f64 = 2.0;
    /// Tolerance under which an axis sample is treated as an exact hit.
    pub const AXIS_EPSILON: f64 = 0.01;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{FEET_PER_METRE, KG_PER_LB};

    /// Convert metres to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v * FEET_PER_METRE
    }

    /// Convert pounds to kilograms.
    #[inline]
    pub fn lb_to_kg(v: f64) -> f64 {
        v * KG_PER_LB
    }

    /// Round a distance to the nearest whole metre for display.
    #[inline]
    pub fn round_m(v: f64) -> f64 {
        v.round()
    }
}

/// Standard atmosphere helpers.
pub mod atmosphere {
    use super::constants::{ISA_LAPSE_C_PER_1000_FT, ISA_SEA_LEVEL_C};

    /// ISA temperature (°C) at a pressure altitude in feet: `15 − 2·(ft/1000)`.
    #[inline]
    pub fn isa_temperature_c(altitude_ft: f64) -> f64 {
        ISA_SEA_LEVEL_C - ISA_LAPSE_C_PER_1000_FT * altitude_ft / 1000.0
    }
}

/// Interpolation primitives shared by the grid and weight interpolators.
pub mod math {
    /// Linear interpolation through `(x1, y1)` and `(x2, y2)` evaluated at `x`.
    ///
    /// Degenerate brackets (`x1 == x2`) return `y1`.
    #[inline]
    pub fn lerp(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
        if x1 == x2 {
            return y1;
        }
        y1 + (y2 - y1) * (x - x1) / (x2 - x1)
    }

    /// Lenient combinator: the first operand when present, otherwise the second.
    ///
    /// Sparse performance tables routinely miss cells; a missing operand is replaced by its
    /// neighbour instead of poisoning the whole interpolation.
    #[inline]
    pub fn coalesce(a: Option<f64>, b: Option<f64>) -> Option<f64> {
        a.or(b)
    }

    /// [`lerp`] over optional operands, coalescing when one side is missing.
    pub fn lerp_lenient(x1: f64, y1: Option<f64>, x2: f64, y2: Option<f64>, x: f64) -> Option<f64> {
        match (y1, y2) {
            (Some(a), Some(b)) => Some(lerp(x1, a, x2, b, x)),
            _ => coalesce(y1, y2),
        }
    }
}

/// Compass arithmetic in degrees.
pub mod angles {
    /// Normalise a bearing into `[0, 360)`.
    #[inline]
    pub fn normalize_deg(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Unsigned smallest angle between two bearings, in `[0, 180]`.
    #[inline]
    pub fn angular_difference(a: f64, b: f64) -> f64 {
        let diff = (a - b).abs() % 360.0;
        diff.min(360.0 - diff)
    }

    /// Signed difference `a − b` wrapped into `[−180, 180]`.
    #[inline]
    pub fn signed_difference(a: f64, b: f64) -> f64 {
        let mut diff = normalize_deg(a) - normalize_deg(b);
        if diff > 180.0 {
            diff -= 360.0;
        }
        if diff < -180.0 {
            diff += 360.0;
        }
        diff
    }
}
