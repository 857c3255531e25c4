//! Ordered column-name aliases for each semantic field of a table row.

use serde_json::Value;

use crate::table::RawRow;

/// Column aliases per semantic field. Resolution walks each list in order and the first key
/// carrying a non-empty value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliases {
    pub altitude: Vec<String>,
    pub temperature: Vec<String>,
    pub ground_roll: Vec<String>,
    pub distance_50ft: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            altitude: owned(&[
                "pressure_altitude_ft",
                "pressure_alt_ft",
                "altitude",
                "altitude_ft",
                "Altitude",
            ]),
            temperature: owned(&[
                "temperature_c",
                "temperature_C",
                "temperature",
                "temp_c",
                "Temperature",
            ]),
            ground_roll: owned(&[
                "ground_roll",
                "ground_roll_m",
                "groundroll",
                "tod",
                "Distance_roulement",
                "Distance roulement",
            ]),
            distance_50ft: owned(&[
                "distance_50ft",
                "distance_15m",
                "over_50ft_m",
                "distance50ft",
                "toda50ft",
                "toda15m",
                "Distance_passage_15m",
                "Distance passage 15m",
                "Distance_passage_50ft",
                "Distance passage 50ft",
            ]),
        }
    }
}

/// First value among `aliases` that is present and not empty.
pub(crate) fn resolve<'a>(row: &'a RawRow, aliases: &[String]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}
