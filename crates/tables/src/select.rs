//! Picking the table to interpolate for a phase and a target weight.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use aeroperf_core::units::lb_to_kg;

use crate::phase::{Phase, PhaseKeywords};
use crate::table::PerformanceTable;

static WEIGHT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(kg|lbs?)\b").expect("weight pattern is valid")
});

/// How a table ended up selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Exactly one table matched the phase.
    SoleMatch,
    /// Several tables matched; the declared weight closest to the target won.
    ClosestWeight,
    /// Several tables matched and no weight could discriminate them; the first was kept.
    Ambiguous,
    /// No table matched the phase; the first table of the whole list was used.
    Fallback,
}

/// A selected table with the reason it was chosen.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub table: &'a PerformanceTable,
    /// Index of the table in the list handed to the selector.
    pub index: usize,
    pub strategy: SelectionStrategy,
    pub declared_weight_kg: Option<f64>,
}

/// A phase-matching table annotated with its declared weight.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTable<'a> {
    pub table: &'a PerformanceTable,
    pub index: usize,
    pub weight_kg: f64,
}

/// Filters tables by phase keywords and ranks them by declared weight.
#[derive(Debug, Clone, Default)]
pub struct TableSelector {
    keywords: PhaseKeywords,
}

impl TableSelector {
    pub fn new(keywords: PhaseKeywords) -> Self {
        Self { keywords }
    }

    /// Whether the table declares `phase` or names it.
    pub fn matches(&self, table: &PerformanceTable, phase: Phase) -> bool {
        table.phase == Some(phase) || self.keywords.name_matches(&table.name, phase)
    }

    /// Select the table to use.
    ///
    /// Returns `None` only for an empty list; a list without any phase match falls back to
    /// its first table, flagged [`SelectionStrategy::Fallback`].
    pub fn select<'a>(
        &self,
        tables: &'a [PerformanceTable],
        phase: Phase,
        target_weight_kg: Option<f64>,
    ) -> Option<Selection<'a>> {
        let first = tables.first()?;
        let matching: Vec<(usize, &PerformanceTable)> = tables
            .iter()
            .enumerate()
            .filter(|(_, table)| self.matches(table, phase))
            .collect();

        let (index, table, strategy) = match matching.as_slice() {
            [] => (0, first, SelectionStrategy::Fallback),
            [(index, table)] => (*index, *table, SelectionStrategy::SoleMatch),
            [(first_index, first_table), ..] => {
                let closest = target_weight_kg.and_then(|target| {
                    let mut best: Option<(usize, &PerformanceTable, f64)> = None;
                    for (index, table) in &matching {
                        let Some(weight) = declared_weight_kg(table) else {
                            continue;
                        };
                        let diff = (weight - target).abs();
                        match best {
                            Some((_, _, best_diff)) if diff >= best_diff => {}
                            _ => best = Some((*index, *table, diff)),
                        }
                    }
                    best
                });
                match closest {
                    Some((index, table, _)) => (index, table, SelectionStrategy::ClosestWeight),
                    None => (*first_index, *first_table, SelectionStrategy::Ambiguous),
                }
            }
        };

        Some(Selection {
            table,
            index,
            strategy,
            declared_weight_kg: declared_weight_kg(table),
        })
    }

    /// Phase-matching tables that declare a weight, sorted by ascending weight.
    ///
    /// When two tables declare the same weight the earlier one is kept.
    pub fn weighted<'a>(
        &self,
        tables: &'a [PerformanceTable],
        phase: Phase,
    ) -> Vec<WeightedTable<'a>> {
        let mut weighted: Vec<WeightedTable<'a>> = Vec::new();
        for (index, table) in tables.iter().enumerate() {
            if !self.matches(table, phase) {
                continue;
            }
            let Some(weight_kg) = declared_weight_kg(table) else {
                continue;
            };
            if weighted.iter().any(|w| w.weight_kg == weight_kg) {
                continue;
            }
            weighted.push(WeightedTable {
                table,
                index,
                weight_kg,
            });
        }
        weighted.sort_by(|a, b| a.weight_kg.total_cmp(&b.weight_kg));
        weighted
    }
}

/// Weight encoded in the table name, else in its conditions text (`"1100 kg"`, `"2425 lb"`).
pub fn declared_weight_kg(table: &PerformanceTable) -> Option<f64> {
    std::iter::once(table.name.as_str())
        .chain(table.conditions.as_deref())
        .find_map(parse_weight_kg)
}

/// First `<number> kg|lb` mention in `text`, converted to kilograms.
pub fn parse_weight_kg(text: &str) -> Option<f64> {
    let captures = WEIGHT_PATTERN.captures(text)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();
    if unit == "kg" {
        Some(value)
    } else {
        Some(lb_to_kg(value))
    }
}
