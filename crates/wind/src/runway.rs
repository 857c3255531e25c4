//! Runway ends and the helpers that build them from published designators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One usable direction of a runway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayEnd {
    pub ident: String,
    /// Runway end heading (QFU) in degrees.
    pub heading_deg: f64,
    #[serde(default)]
    pub surface: Option<String>,
}

impl RunwayEnd {
    pub fn new(ident: impl Into<String>, heading_deg: f64) -> Self {
        Self {
            ident: ident.into(),
            heading_deg,
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }
}

/// Errors raised while expanding a runway designator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunwayParseError {
    #[error("runway designator is empty")]
    Empty,
    #[error("`{0}` is not a runway number between 01 and 36")]
    InvalidIdent(String),
}

/// Expand a designator such as `"05/23"` or `"09L/27R"` into its runway ends.
///
/// The first end takes `qfu` when supplied, otherwise its number × 10; the second end is
/// the reciprocal heading. A single ident (`"05"`) yields a single end.
pub fn ends_from_designator(
    designator: &str,
    qfu: Option<f64>,
    surface: Option<&str>,
) -> Result<Vec<RunwayEnd>, RunwayParseError> {
    let mut idents = designator
        .split('/')
        .map(str::trim)
        .filter(|ident| !ident.is_empty());
    let first = idents.next().ok_or(RunwayParseError::Empty)?;
    let first_heading = match qfu {
        Some(heading) => heading,
        None => ident_heading(first)?,
    };

    let build = |ident: &str, heading_deg: f64| RunwayEnd {
        ident: ident.to_string(),
        heading_deg,
        surface: surface.map(str::to_string),
    };

    let mut ends = vec![build(first, first_heading)];
    if let Some(second) = idents.next() {
        ident_heading(second)?;
        ends.push(build(second, (first_heading + 180.0) % 360.0));
    }
    Ok(ends)
}

fn ident_heading(ident: &str) -> Result<f64, RunwayParseError> {
    let number = ident.trim_end_matches(|c: char| matches!(c.to_ascii_uppercase(), 'L' | 'R' | 'C'));
    match number.parse::<u16>() {
        Ok(n) if (1..=36).contains(&n) => Ok(f64::from(n) * 10.0),
        _ => Err(RunwayParseError::InvalidIdent(ident.to_string())),
    }
}

/// Whether a runway surface is acceptable for an aircraft restricted to `allowed` surfaces.
///
/// No restriction or an unknown surface accepts the runway. Otherwise the surface must
/// match an allowed entry exactly, contain it as part of a combined surface
/// (`"CONC+ASPH"`), or contain or be contained by it ignoring case (`"ASPHALT"` ~ `"ASPH"`).
pub fn surface_compatible(surface: Option<&str>, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let surface = match surface.map(str::trim) {
        None | Some("") => return true,
        Some(s) if s.eq_ignore_ascii_case("UNKNOWN") => return true,
        Some(s) => s,
    };
    if allowed.iter().any(|a| a == surface) {
        return true;
    }
    if surface.contains('+') && allowed.iter().any(|a| surface.contains(a.as_str())) {
        return true;
    }
    let upper = surface.to_uppercase();
    allowed.iter().any(|a| {
        let a = a.to_uppercase();
        upper.contains(&a) || a.contains(&upper)
    })
}
