//! Weather observation handed in by the caller, with a fallback decoder for raw METAR text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use aeroperf_wind::{WindDirection, WindVector};

static TEMPERATURE_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(M?\d{1,2})/(M?\d{1,2})?(?:\s|=|$)").expect("temperature pattern is valid")
});

static WIND_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?KT(?:\s|=|$)")
        .expect("wind pattern is valid")
});

static WEATHER_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+|-|VC)?(?:MI|BC|PR|DR|BL|SH|TS|FZ)?(?:DZ|RA|SN|SG|PL|GR|GS|UP)+$")
        .expect("weather pattern is valid")
});

/// Observation at the airport. Decoded fields take precedence over the raw report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub wind: Option<WindVector>,
    /// Present-weather codes such as `-RA` or `SHSN`.
    #[serde(default)]
    pub precipitation: Vec<String>,
}

impl WeatherObservation {
    /// Observation built from a raw METAR only.
    pub fn from_metar(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Decoded temperature, else the temperature group of the raw report.
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_c
            .filter(|t| t.is_finite())
            .or_else(|| self.raw.as_deref().and_then(parse_metar_temperature))
    }

    /// Decoded wind, else the wind group of the raw report.
    pub fn wind(&self) -> Option<WindVector> {
        self.wind
            .or_else(|| self.raw.as_deref().and_then(parse_metar_wind))
    }

    /// Decoded precipitation, else the present-weather groups of the raw report.
    pub fn precipitation(&self) -> Vec<String> {
        if !self.precipitation.is_empty() {
            return self.precipitation.clone();
        }
        self.raw
            .as_deref()
            .map(parse_metar_weather)
            .unwrap_or_default()
    }

    /// Whether any reported precipitation contains one of `wet_codes`.
    pub fn is_wet(&self, wet_codes: &[String]) -> bool {
        self.precipitation().iter().any(|group| {
            let group = group.to_uppercase();
            wet_codes
                .iter()
                .any(|code| !code.is_empty() && group.contains(&code.to_uppercase()))
        })
    }
}

/// Air temperature from a `TT/DD` group, `M` marking negative values (`M05/M08` → −5).
pub fn parse_metar_temperature(raw: &str) -> Option<f64> {
    let captures = TEMPERATURE_GROUP.captures(raw)?;
    parse_signed(captures.get(1)?.as_str())
}

fn parse_signed(group: &str) -> Option<f64> {
    match group.strip_prefix('M') {
        Some(value) => value.parse::<f64>().ok().map(|v| -v),
        None => group.parse().ok(),
    }
}

/// Wind from a `dddssKT`, `dddssGggKT` or `VRBssKT` group; `00000KT` decodes as calm.
pub fn parse_metar_wind(raw: &str) -> Option<WindVector> {
    let captures = WIND_GROUP.captures(raw)?;
    let speed_kt: f64 = captures.get(2)?.as_str().parse().ok()?;
    let gust_kt = captures
        .get(3)
        .and_then(|gust| gust.as_str().parse::<f64>().ok());
    let direction = match captures.get(1)?.as_str() {
        "VRB" => WindDirection::Variable,
        _ if speed_kt == 0.0 => WindDirection::Calm,
        degrees => WindDirection::Degrees(degrees.parse().ok()?),
    };
    Some(WindVector {
        direction,
        speed_kt,
        gust_kt,
    })
}

/// Present-weather groups carrying precipitation (`RA`, `-SHRA`, `+TSRA`, `FZDZ`, ...).
pub fn parse_metar_weather(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .filter(|token| WEATHER_GROUP.is_match(token))
        .map(str::to_string)
        .collect()
}
