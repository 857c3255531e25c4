//! Raw rows → altitude × temperature grid.
//!
//! Normalization never fails outright: rows missing an axis value are left out of the grid,
//! values that cannot be read as numbers are reported as [`RowIssue`]s, and a table with no
//! usable rows simply produces no grid.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::aliases::{self, FieldAliases};
use crate::table::{DataPoint, RawRow};

/// Cells indexed `[altitude][temperature]`; `None` marks a missing cell.
pub type Matrix = Vec<Vec<Option<f64>>>;

/// Distance series carried by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    GroundRoll,
    Distance50ft,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroundRoll => f.write_str("ground roll"),
            Self::Distance50ft => f.write_str("50 ft distance"),
        }
    }
}

/// Semantic row fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Altitude,
    Temperature,
    GroundRoll,
    Distance50ft,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Altitude => f.write_str("altitude"),
            Self::Temperature => f.write_str("temperature"),
            Self::GroundRoll => f.write_str("ground roll"),
            Self::Distance50ft => f.write_str("50 ft distance"),
        }
    }
}

/// A value that was present in a row but could not be read as a number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: {field} value `{raw}` is not numeric")]
pub struct RowIssue {
    pub row: usize,
    pub field: Field,
    pub raw: String,
}

/// Shape violations rejected by [`NormalizedGrid::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridShapeError {
    #[error("{series} matrix has {rows} rows for {expected} altitudes")]
    RowCount {
        series: &'static str,
        rows: usize,
        expected: usize,
    },
    #[error("{series} matrix row {row} has {cols} cells for {expected} temperatures")]
    ColumnCount {
        series: &'static str,
        row: usize,
        cols: usize,
        expected: usize,
    },
    #[error("{0} axis must be strictly increasing")]
    UnsortedAxis(&'static str),
}

/// Clean 2D grid of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGrid {
    altitudes: Vec<f64>,
    temperatures: Vec<f64>,
    ground_roll: Matrix,
    distance_50ft: Matrix,
}

impl NormalizedGrid {
    /// Build a grid, checking that axes are strictly increasing and that both matrices are
    /// exactly `altitudes.len() × temperatures.len()`.
    pub fn new(
        altitudes: Vec<f64>,
        temperatures: Vec<f64>,
        ground_roll: Matrix,
        distance_50ft: Matrix,
    ) -> Result<Self, GridShapeError> {
        if altitudes.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(GridShapeError::UnsortedAxis("altitude"));
        }
        if temperatures.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(GridShapeError::UnsortedAxis("temperature"));
        }
        check_shape("ground roll", &ground_roll, altitudes.len(), temperatures.len())?;
        check_shape(
            "50 ft distance",
            &distance_50ft,
            altitudes.len(),
            temperatures.len(),
        )?;
        Ok(Self {
            altitudes,
            temperatures,
            ground_roll,
            distance_50ft,
        })
    }

    pub fn altitudes(&self) -> &[f64] {
        &self.altitudes
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Matrix of the requested series.
    pub fn matrix(&self, series: Series) -> &Matrix {
        match series {
            Series::GroundRoll => &self.ground_roll,
            Series::Distance50ft => &self.distance_50ft,
        }
    }

    /// Cell at `altitudes[alt] × temperatures[temp]`, `None` when missing or out of range.
    pub fn cell(&self, series: Series, alt: usize, temp: usize) -> Option<f64> {
        self.matrix(series)
            .get(alt)
            .and_then(|row| row.get(temp))
            .copied()
            .flatten()
    }

    /// Whether at least one cell of the series holds a value.
    pub fn has_values(&self, series: Series) -> bool {
        self.matrix(series)
            .iter()
            .any(|row| row.iter().any(Option::is_some))
    }
}

fn check_shape(
    series: &'static str,
    matrix: &Matrix,
    altitudes: usize,
    temperatures: usize,
) -> Result<(), GridShapeError> {
    if matrix.len() != altitudes {
        return Err(GridShapeError::RowCount {
            series,
            rows: matrix.len(),
            expected: altitudes,
        });
    }
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != temperatures {
            return Err(GridShapeError::ColumnCount {
                series,
                row,
                cols: cells.len(),
                expected: temperatures,
            });
        }
    }
    Ok(())
}

/// Outcome of normalizing one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    /// `None` when no row carried both an altitude and a temperature.
    pub grid: Option<NormalizedGrid>,
    pub points: Vec<DataPoint>,
    pub issues: Vec<RowIssue>,
}

/// Resolves raw rows through [`FieldAliases`] and assembles the grid.
#[derive(Debug, Clone, Default)]
pub struct TableNormalizer {
    aliases: FieldAliases,
}

impl TableNormalizer {
    pub fn new(aliases: FieldAliases) -> Self {
        Self { aliases }
    }

    /// Normalize `rows` into a grid, collecting coercion issues along the way.
    pub fn normalize(&self, rows: &[RawRow]) -> Normalization {
        let mut issues = Vec::new();
        let mut altitudes = Vec::new();
        let mut temperatures = Vec::new();
        let mut points = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let altitude = self.read(row, index, Field::Altitude, &mut issues);
            let temperature = self.read(row, index, Field::Temperature, &mut issues);
            if let Some(alt) = altitude {
                altitudes.push(alt);
            }
            if let Some(temp) = temperature {
                temperatures.push(temp);
            }
            if let (Some(altitude_ft), Some(temperature_c)) = (altitude, temperature) {
                points.push(DataPoint {
                    altitude_ft,
                    temperature_c,
                    ground_roll_m: self.read(row, index, Field::GroundRoll, &mut issues),
                    distance_50ft_m: self.read(row, index, Field::Distance50ft, &mut issues),
                });
            }
        }

        let altitudes = sorted_unique(altitudes);
        let temperatures = sorted_unique(temperatures);
        let grid = if altitudes.is_empty() || temperatures.is_empty() {
            None
        } else {
            let lookup = |pick: fn(&DataPoint) -> Option<f64>| -> Matrix {
                altitudes
                    .iter()
                    .map(|&alt| {
                        temperatures
                            .iter()
                            .map(|&temp| {
                                points
                                    .iter()
                                    .find(|p| p.altitude_ft == alt && p.temperature_c == temp)
                                    .and_then(pick)
                            })
                            .collect()
                    })
                    .collect()
            };
            let ground_roll = lookup(|p| p.ground_roll_m);
            let distance_50ft = lookup(|p| p.distance_50ft_m);
            NormalizedGrid::new(
                altitudes.clone(),
                temperatures.clone(),
                ground_roll,
                distance_50ft,
            )
            .ok()
        };

        Normalization {
            grid,
            points,
            issues,
        }
    }

    /// Convenience wrapper returning only the grid.
    pub fn grid(&self, rows: &[RawRow]) -> Option<NormalizedGrid> {
        self.normalize(rows).grid
    }

    fn read(
        &self,
        row: &RawRow,
        index: usize,
        field: Field,
        issues: &mut Vec<RowIssue>,
    ) -> Option<f64> {
        let aliases = match field {
            Field::Altitude => &self.aliases.altitude,
            Field::Temperature => &self.aliases.temperature,
            Field::GroundRoll => &self.aliases.ground_roll,
            Field::Distance50ft => &self.aliases.distance_50ft,
        };
        let value = aliases::resolve(row, aliases)?;
        match coerce(value, field) {
            Coerced::Number(v) => Some(v),
            Coerced::Ignored => None,
            Coerced::Invalid => {
                issues.push(RowIssue {
                    row: index,
                    field,
                    raw: display_raw(value),
                });
                None
            }
        }
    }
}

enum Coerced {
    Number(f64),
    /// Recognised non-numeric marker, e.g. an "ISA" temperature column.
    Ignored,
    Invalid,
}

fn coerce(value: &Value, field: Field) -> Coerced {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.is_finite() => Coerced::Number(v),
            _ => Coerced::Invalid,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if field == Field::Altitude && trimmed.to_uppercase().contains("SL") {
                return Coerced::Number(0.0);
            }
            if field == Field::Temperature && trimmed.eq_ignore_ascii_case("ISA") {
                return Coerced::Ignored;
            }
            match leading_number(trimmed) {
                Some(v) => Coerced::Number(v),
                None => Coerced::Invalid,
            }
        }
        _ => Coerced::Invalid,
    }
}

/// Parse the longest numeric prefix of `text` (`"1500 ft"` → 1500, `"-5°C"` → -5).
pub fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    text[..end].trim_end_matches('.').parse::<f64>().ok()
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
