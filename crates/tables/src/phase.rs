//! Flight phase and the keyword lists used to recognise it in free-form table names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Flight phase a performance table (or calculation) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Takeoff,
    Landing,
}

impl Phase {
    /// Parse a declared phase, accepting English and French spellings.
    pub fn parse(text: &str) -> Option<Self> {
        let lower = text.trim().to_lowercase();
        match lower.as_str() {
            "takeoff" | "take-off" | "take off" | "to" | "décollage" | "decollage" => {
                Some(Self::Takeoff)
            }
            "landing" | "ldg" | "atterrissage" => Some(Self::Landing),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Takeoff => f.write_str("takeoff"),
            Self::Landing => f.write_str("landing"),
        }
    }
}

/// Deserialize an optional declared phase; unknown labels become `None` instead of failing.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<Phase>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Phase::parse))
}

/// Case-insensitive keywords that identify a phase inside a table name.
///
/// Keywords of two characters or fewer (e.g. `to`) only match a whole word, so that
/// "Landing distance over 50 ft" or "stop" do not read as takeoff tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseKeywords {
    pub takeoff: Vec<String>,
    pub landing: Vec<String>,
}

impl Default for PhaseKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            takeoff: owned(&[
                "takeoff",
                "take-off",
                "take off",
                "take",
                "to",
                "décollage",
                "decollage",
                "decolle",
            ]),
            landing: owned(&["landing", "land", "ldg", "atterrissage", "atterri"]),
        }
    }
}

impl PhaseKeywords {
    /// Keywords registered for `phase`.
    pub fn for_phase(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Takeoff => &self.takeoff,
            Phase::Landing => &self.landing,
        }
    }

    /// Whether `name` mentions `phase` through one of its keywords.
    pub fn name_matches(&self, name: &str, phase: Phase) -> bool {
        let lower = name.to_lowercase();
        self.for_phase(phase).iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            if keyword.is_empty() {
                false
            } else if keyword.chars().count() <= 2 {
                lower
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| word == keyword)
            } else {
                lower.contains(&keyword)
            }
        })
    }
}
