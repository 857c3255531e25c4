//! Single-phase performance computation.

use aeroperf_core::atmosphere::isa_temperature_c;
use aeroperf_core::units::m_to_ft;
use aeroperf_corrections::{CorrectedDistance, Corrections, EnvironmentalCorrector};
use aeroperf_interp::{
    Axis, BoundaryCaveat, GridInterpolator, Interpolation, WeightInterpolation, interpolate_weight,
};
use aeroperf_tables::{
    Phase, PerformanceTable, SelectionStrategy, Series, TableNormalizer, TableSelector,
};
use aeroperf_wind::{RunwayAnalysis, WindAnalyzer, WindVector, surface_compatible};

use crate::inputs::{Airport, PerformanceRequest};
use crate::result::{
    AltitudeSource, AppliedCorrections, Caveat, ConditionsUsed, InterpolationReport,
    PerformanceResult, TableUsed, TemperatureSource, WeightAxis, WeightSource,
};
use crate::settings::EngineSettings;

/// Compute takeoff or landing distances for one airport.
///
/// Never fails: anything that prevents a distance from being produced leaves it `None` and
/// adds a [`Caveat`] to `errors`.
pub fn compute_performance(
    request: &PerformanceRequest<'_>,
    settings: &EngineSettings,
) -> PerformanceResult {
    let mut errors = Vec::new();
    let phase = request.phase;

    let altitude = resolve_altitude(request.airport, &mut errors);
    let altitude_ft = altitude.map(|(ft, _)| ft);
    let temperature = resolve_temperature(request, altitude_ft);
    let weight = resolve_weight(request, settings);

    let tables = match (altitude_ft, temperature) {
        (Some(alt), Some((temp, _))) => {
            interpolate_tables(request, settings, alt, temp, weight.weight_kg, &mut errors)
        }
        _ => None,
    };

    let wind = request.weather.and_then(|weather| weather.wind());
    let runway_wet = request
        .weather
        .is_some_and(|weather| weather.is_wet(&settings.wet_codes));
    let (runways, suggested_runway) = rank_runways(request, settings, wind, &mut errors);

    let inputs = Corrections {
        runway_wet,
        runway_grass: request.runway.grass,
        slope_percent: request.runway.slope_percent,
        headwind_kt: suggested_runway
            .as_ref()
            .map_or(0.0, |rwy| rwy.headwind_kt.max(0.0)),
        tailwind_kt: suggested_runway
            .as_ref()
            .map_or(0.0, RunwayAnalysis::tailwind_kt),
    };
    let corrector = EnvironmentalCorrector::new(settings.factors);
    let correct = |interpolation: Option<&Interpolation>| -> Option<CorrectedDistance> {
        let base = interpolation?.value?;
        Some(corrector.apply(base, &inputs))
    };

    let (table, ground_roll, distance_50ft, weight_axis, confidence) = match &tables {
        Some(outcome) => (
            Some(outcome.table.clone()),
            outcome.ground_roll.as_ref(),
            outcome.distance_50ft.as_ref(),
            outcome.weight_axis.clone(),
            outcome.confidence,
        ),
        None => (None, None, None, None, None),
    };

    if tables.is_some() {
        for (series, interpolation) in [
            (Series::GroundRoll, ground_roll),
            (Series::Distance50ft, distance_50ft),
        ] {
            if interpolation.and_then(|i| i.value).is_none() {
                errors.push(Caveat::SeriesUnavailable { series });
            }
        }
    }
    for interpolation in [ground_roll, distance_50ft].into_iter().flatten() {
        for boundary in &interpolation.details.boundaries {
            let caveat = Caveat::Boundary(*boundary);
            if !errors.contains(&caveat) {
                errors.push(caveat);
            }
        }
    }

    let corrected_ground_roll = correct(ground_roll);
    let corrected_distance_50ft = correct(distance_50ft);

    PerformanceResult {
        airport: request.airport.icao.clone(),
        phase,
        ground_roll_m: corrected_ground_roll.as_ref().map(CorrectedDistance::rounded_m),
        distance_50ft_m: corrected_distance_50ft
            .as_ref()
            .map(CorrectedDistance::rounded_m),
        ground_roll_with_margin_m: corrected_ground_roll.as_ref().map(|c| c.with_margin_m),
        distance_50ft_with_margin_m: corrected_distance_50ft.as_ref().map(|c| c.with_margin_m),
        conditions_used: ConditionsUsed {
            altitude_ft,
            altitude_source: altitude.map(|(_, source)| source),
            temperature_c: temperature.map(|(temp, _)| temp),
            temperature_source: temperature.map(|(_, source)| source),
            weight_kg: weight.weight_kg,
            weight_source: weight.source,
            fuel_burn_kg: weight.fuel_burn_kg,
            wind,
            runway_wet,
            table,
        },
        confidence: confidence.unwrap_or(settings.default_confidence),
        interpolation_details: InterpolationReport {
            ground_roll: ground_roll.map(|i| i.details.clone()),
            distance_50ft: distance_50ft.map(|i| i.details.clone()),
            weight: weight_axis,
        },
        corrections: AppliedCorrections {
            inputs,
            ground_roll: corrected_ground_roll,
            distance_50ft: corrected_distance_50ft,
        },
        runways,
        suggested_runway,
        errors,
    }
}

/// Elevation in feet: explicit feet, else metres converted, else sea level.
fn resolve_altitude(airport: &Airport, errors: &mut Vec<Caveat>) -> Option<(f64, AltitudeSource)> {
    let (altitude_ft, source) = match (airport.elevation_ft, airport.elevation_m) {
        (Some(ft), _) => (ft, AltitudeSource::Feet),
        (None, Some(m)) => (m_to_ft(m), AltitudeSource::Metres),
        (None, None) => {
            errors.push(Caveat::ElevationDefaulted {
                icao: airport.icao.clone(),
            });
            (0.0, AltitudeSource::Default)
        }
    };
    if altitude_ft.is_finite() {
        Some((altitude_ft, source))
    } else {
        errors.push(Caveat::ElevationInvalid {
            icao: airport.icao.clone(),
        });
        None
    }
}

/// Manual override, else observed, else ISA at the airport elevation.
fn resolve_temperature(
    request: &PerformanceRequest<'_>,
    altitude_ft: Option<f64>,
) -> Option<(f64, TemperatureSource)> {
    if let Some(manual) = request.overrides.temperature_c.filter(|t| t.is_finite()) {
        return Some((manual, TemperatureSource::Manual));
    }
    if let Some(observed) = request.weather.and_then(|weather| weather.temperature_c()) {
        return Some((observed, TemperatureSource::Observed));
    }
    altitude_ft.map(|ft| (isa_temperature_c(ft), TemperatureSource::Isa))
}

struct ResolvedWeight {
    weight_kg: f64,
    source: WeightSource,
    fuel_burn_kg: Option<f64>,
}

/// Manual override, else weight-and-balance total, else MTOW; landing subtracts fuel burn.
fn resolve_weight(request: &PerformanceRequest<'_>, settings: &EngineSettings) -> ResolvedWeight {
    let (weight_kg, source) = if let Some(manual) = request.overrides.weight_kg {
        (manual, WeightSource::Manual)
    } else if let Some(total) = request.weight_and_balance_kg {
        (total, WeightSource::WeightAndBalance)
    } else {
        (request.aircraft.max_takeoff_weight_kg, WeightSource::MaxTakeoff)
    };

    match request.phase {
        Phase::Takeoff => ResolvedWeight {
            weight_kg,
            source,
            fuel_burn_kg: None,
        },
        Phase::Landing => {
            let burn = request
                .aircraft
                .fuel_burn_kg
                .unwrap_or(settings.landing_fuel_burn_kg);
            ResolvedWeight {
                weight_kg: weight_kg - burn,
                source,
                fuel_burn_kg: Some(burn),
            }
        }
    }
}

struct TableOutcome {
    table: TableUsed,
    ground_roll: Option<Interpolation>,
    distance_50ft: Option<Interpolation>,
    weight_axis: Option<WeightAxis>,
    confidence: Option<f64>,
}

struct Evaluation {
    ground_roll: Option<Interpolation>,
    distance_50ft: Option<Interpolation>,
}

fn interpolate_tables(
    request: &PerformanceRequest<'_>,
    settings: &EngineSettings,
    altitude_ft: f64,
    temperature_c: f64,
    weight_kg: f64,
    errors: &mut Vec<Caveat>,
) -> Option<TableOutcome> {
    let phase = request.phase;
    let tables = &request.aircraft.tables;
    let selector = TableSelector::new(settings.phase_keywords.clone());
    let target_weight = weight_kg.is_finite().then_some(weight_kg);

    let Some(selection) = selector.select(tables, phase, target_weight) else {
        errors.push(Caveat::NoTable { phase });
        return None;
    };
    match selection.strategy {
        SelectionStrategy::Fallback => errors.push(Caveat::FallbackTable {
            phase,
            table: selection.table.name.clone(),
        }),
        SelectionStrategy::Ambiguous => errors.push(Caveat::AmbiguousTable {
            phase,
            table: selection.table.name.clone(),
            candidates: tables.iter().filter(|t| selector.matches(t, phase)).count(),
        }),
        SelectionStrategy::SoleMatch | SelectionStrategy::ClosestWeight => {}
    }

    let evaluator = Evaluator {
        normalizer: TableNormalizer::new(settings.aliases.clone()),
        interpolator: GridInterpolator::new(settings.axis_epsilon),
        altitude_ft,
        temperature_c,
    };
    let table = TableUsed {
        name: selection.table.name.clone(),
        strategy: selection.strategy,
        declared_weight_kg: selection.declared_weight_kg,
    };
    let confidence = selection.table.confidence;

    if settings.interpolate_weight
        && let Some(target) = target_weight
    {
        let weighted = selector.weighted(tables, phase);
        if weighted.len() >= 2 {
            let evaluations: Vec<(f64, Option<Evaluation>)> = weighted
                .iter()
                .map(|w| (w.weight_kg, evaluator.evaluate(w.table, errors)))
                .collect();
            let blend = |series: Series| {
                let samples: Vec<(f64, Option<f64>)> = evaluations
                    .iter()
                    .map(|(kg, evaluation)| {
                        let value = evaluation
                            .as_ref()
                            .and_then(|e| e.series(series))
                            .and_then(|i| i.value);
                        (*kg, value)
                    })
                    .collect();
                interpolate_weight(&samples, target, settings.axis_epsilon)
            };
            // Details come from the lighter table, else the heavier one when it supplied the value.
            let pick = |series: Series, blended: Option<&WeightInterpolation>| {
                let blended = blended?;
                blended.value?;
                let details_at = |kg: f64| {
                    evaluations
                        .iter()
                        .find(|(w, _)| *w == kg)
                        .and_then(|(_, evaluation)| evaluation.as_ref()?.series(series))
                };
                let mut interpolation = details_at(blended.low_kg)
                    .or_else(|| details_at(blended.high_kg))?
                    .clone();
                interpolation.value = blended.value;
                Some(interpolation)
            };
            let table_at = |kg: f64| {
                weighted
                    .iter()
                    .find(|w| w.weight_kg == kg)
                    .map(|w| w.table.name.clone())
                    .unwrap_or_default()
            };

            let ground_blend = blend(Series::GroundRoll);
            let distance_blend = blend(Series::Distance50ft);
            let weight_axis = ground_blend
                .as_ref()
                .or(distance_blend.as_ref())
                .map(|w| WeightAxis {
                    target_kg: target,
                    low_kg: w.low_kg,
                    high_kg: w.high_kg,
                    low_table: table_at(w.low_kg),
                    high_table: table_at(w.high_kg),
                    boundary: w.boundary,
                });
            if let Some(axis) = &weight_axis
                && let Some(side) = axis.boundary
            {
                errors.push(Caveat::Boundary(BoundaryCaveat {
                    axis: Axis::Weight,
                    side,
                    target,
                    clamped_to: axis.low_kg,
                }));
            }
            return Some(TableOutcome {
                table,
                ground_roll: pick(Series::GroundRoll, ground_blend.as_ref()),
                distance_50ft: pick(Series::Distance50ft, distance_blend.as_ref()),
                weight_axis,
                confidence,
            });
        }
    }

    let evaluation = evaluator.evaluate(selection.table, errors);
    let (ground_roll, distance_50ft) = match evaluation {
        Some(evaluation) => (evaluation.ground_roll, evaluation.distance_50ft),
        None => (None, None),
    };
    Some(TableOutcome {
        table,
        ground_roll,
        distance_50ft,
        weight_axis: None,
        confidence,
    })
}

struct Evaluator {
    normalizer: TableNormalizer,
    interpolator: GridInterpolator,
    altitude_ft: f64,
    temperature_c: f64,
}

impl Evaluator {
    /// Normalize and interpolate one table; `None` when it yields no grid.
    fn evaluate(&self, table: &PerformanceTable, errors: &mut Vec<Caveat>) -> Option<Evaluation> {
        let normalization = self.normalizer.normalize(&table.rows);
        errors.extend(normalization.issues.into_iter().map(|issue| Caveat::Uncoercible {
            table: table.name.clone(),
            issue,
        }));
        let Some(grid) = normalization.grid else {
            errors.push(Caveat::GridInsufficient {
                table: table.name.clone(),
            });
            return None;
        };
        let series = |series: Series| {
            if grid.has_values(series) {
                self.interpolator
                    .interpolate(&grid, series, self.altitude_ft, self.temperature_c)
            } else {
                None
            }
        };
        Some(Evaluation {
            ground_roll: series(Series::GroundRoll),
            distance_50ft: series(Series::Distance50ft),
        })
    }
}

impl Evaluation {
    fn series(&self, series: Series) -> Option<&Interpolation> {
        match series {
            Series::GroundRoll => self.ground_roll.as_ref(),
            Series::Distance50ft => self.distance_50ft.as_ref(),
        }
    }
}

/// Rank the airport's runway ends for the observed wind and pick one for the phase.
///
/// Without a wind observation every end is treated as in calm air.
fn rank_runways(
    request: &PerformanceRequest<'_>,
    settings: &EngineSettings,
    wind: Option<WindVector>,
    errors: &mut Vec<Caveat>,
) -> (Vec<RunwayAnalysis>, Option<RunwayAnalysis>) {
    let airport = request.airport;
    if airport.runways.is_empty() {
        errors.push(Caveat::NoRunways {
            icao: airport.icao.clone(),
        });
        return (Vec::new(), None);
    }

    let allowed = &request.aircraft.surfaces;
    let compatible: Vec<_> = airport
        .runways
        .iter()
        .filter(|end| surface_compatible(end.surface.as_deref(), allowed))
        .cloned()
        .collect();
    let ends = if compatible.is_empty() {
        errors.push(Caveat::NoCompatibleSurface {
            icao: airport.icao.clone(),
            aircraft: request.aircraft.name.clone(),
        });
        airport.runways.clone()
    } else {
        compatible
    };

    let analyzer = WindAnalyzer::new(settings.wind);
    let report = analyzer.analyze(&wind.unwrap_or_else(WindVector::calm), &ends);
    let suggested = match request.phase {
        Phase::Takeoff => analyzer.preferred_takeoff(&report),
        Phase::Landing => analyzer.preferred_landing(&report),
    }
    .cloned();
    (report.runways, suggested)
}
