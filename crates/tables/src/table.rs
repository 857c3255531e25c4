//! Table records as produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::phase::{self, Phase};

/// One raw table row. Keys are whatever column names the source document used.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// A manufacturer performance table for one phase (and usually one weight).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTable {
    #[serde(alias = "table_name")]
    pub name: String,
    #[serde(default, alias = "table_type", deserialize_with = "phase::lenient")]
    pub phase: Option<Phase>,
    /// Free-text conditions (flaps, weight, surface) attached to the table.
    #[serde(default)]
    pub conditions: Option<String>,
    /// Extraction confidence in `[0, 1]`, when the pipeline reports one.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, alias = "data")]
    pub rows: Vec<RawRow>,
}

impl PerformanceTable {
    /// Build a table with a declared phase and no annotations.
    pub fn new(name: impl Into<String>, phase: Option<Phase>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            phase,
            conditions: None,
            confidence: None,
            rows,
        }
    }
}

/// A row after alias resolution and numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub altitude_ft: f64,
    pub temperature_c: f64,
    pub ground_roll_m: Option<f64>,
    pub distance_50ft_m: Option<f64>,
}
