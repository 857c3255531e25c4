//! Reported surface wind.

use serde::{Deserialize, Serialize};

/// Wind direction as reported: a true bearing, or one of the non-directional sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DirectionRepr", into = "DirectionRepr")]
pub enum WindDirection {
    Degrees(f64),
    Calm,
    Variable,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Degrees(f64),
    Label(String),
}

impl TryFrom<DirectionRepr> for WindDirection {
    type Error = String;

    fn try_from(value: DirectionRepr) -> Result<Self, Self::Error> {
        match value {
            DirectionRepr::Degrees(deg) => Ok(Self::Degrees(deg)),
            DirectionRepr::Label(label) => match label.trim().to_lowercase().as_str() {
                "calm" | "calme" => Ok(Self::Calm),
                "variable" | "vrb" => Ok(Self::Variable),
                other => other
                    .parse::<f64>()
                    .map(Self::Degrees)
                    .map_err(|_| format!("unrecognised wind direction `{label}`")),
            },
        }
    }
}

impl From<WindDirection> for DirectionRepr {
    fn from(value: WindDirection) -> Self {
        match value {
            WindDirection::Degrees(deg) => Self::Degrees(deg),
            WindDirection::Calm => Self::Label("calm".to_string()),
            WindDirection::Variable => Self::Label("variable".to_string()),
        }
    }
}

/// Surface wind: direction it blows from, mean speed, optional gust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub direction: WindDirection,
    pub speed_kt: f64,
    #[serde(default)]
    pub gust_kt: Option<f64>,
}

impl WindVector {
    pub fn new(direction_deg: f64, speed_kt: f64) -> Self {
        Self {
            direction: WindDirection::Degrees(direction_deg),
            speed_kt,
            gust_kt: None,
        }
    }

    pub fn calm() -> Self {
        Self {
            direction: WindDirection::Calm,
            speed_kt: 0.0,
            gust_kt: None,
        }
    }

    pub fn variable(speed_kt: f64) -> Self {
        Self {
            direction: WindDirection::Variable,
            speed_kt,
            gust_kt: None,
        }
    }

    pub fn with_gust(mut self, gust_kt: f64) -> Self {
        self.gust_kt = Some(gust_kt);
        self
    }
}
