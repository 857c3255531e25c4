use aeroperf::tables::select::{declared_weight_kg, parse_weight_kg};
use aeroperf::tables::{
    PerformanceTable, Phase, PhaseKeywords, SelectionStrategy, TableSelector,
};

fn table(name: &str, phase: Option<Phase>) -> PerformanceTable {
    PerformanceTable::new(name, phase, Vec::new())
}

#[test]
fn empty_list_selects_nothing() {
    let selector = TableSelector::default();
    assert!(selector.select(&[], Phase::Landing, None).is_none());
}

#[test]
fn declared_phase_or_keyword_matches() {
    let selector = TableSelector::default();
    let tables = [
        table("Distances de décollage", None),
        table("Landing distance", None),
        table("Table 3", Some(Phase::Landing)),
    ];

    let takeoff = selector.select(&tables, Phase::Takeoff, None).expect("takeoff");
    assert_eq!(takeoff.index, 0);
    assert_eq!(takeoff.strategy, SelectionStrategy::SoleMatch);

    let landing = selector.select(&tables, Phase::Landing, None).expect("landing");
    assert_eq!(landing.index, 1);
    assert_eq!(landing.strategy, SelectionStrategy::Ambiguous);
}

#[test]
fn short_keywords_only_match_whole_words() {
    let keywords = PhaseKeywords::default();
    assert!(keywords.name_matches("TO distance", Phase::Takeoff));
    assert!(keywords.name_matches("Perf T/O - to", Phase::Takeoff));
    assert!(!keywords.name_matches("Stop distance", Phase::Takeoff));
    assert!(!keywords.name_matches("Landing distance over 50 ft", Phase::Takeoff));
}

#[test]
fn no_match_falls_back_to_first_table() {
    let selector = TableSelector::default();
    let tables = [table("Climb rate", None), table("Cruise", None)];
    let selection = selector.select(&tables, Phase::Takeoff, Some(900.0)).expect("fallback");
    assert_eq!(selection.index, 0);
    assert_eq!(selection.strategy, SelectionStrategy::Fallback);
}

#[test]
fn closest_declared_weight_wins() {
    let selector = TableSelector::default();
    let mut conditions_only = table("Takeoff B", Some(Phase::Takeoff));
    conditions_only.conditions = Some("flaps 10, 2425 lb".into());
    let tables = [
        table("Takeoff 900 kg", Some(Phase::Takeoff)),
        table("Takeoff 1000 kg", Some(Phase::Takeoff)),
        conditions_only,
    ];

    let selection = selector
        .select(&tables, Phase::Takeoff, Some(980.0))
        .expect("selection");
    assert_eq!(selection.index, 1);
    assert_eq!(selection.strategy, SelectionStrategy::ClosestWeight);
    assert_eq!(selection.declared_weight_kg, Some(1000.0));

    let heavy = selector
        .select(&tables, Phase::Takeoff, Some(1100.0))
        .expect("selection");
    assert_eq!(heavy.index, 2);
}

#[test]
fn weight_ties_keep_the_earlier_table() {
    let selector = TableSelector::default();
    let tables = [
        table("Takeoff 900 kg", Some(Phase::Takeoff)),
        table("Takeoff 1100 kg", Some(Phase::Takeoff)),
    ];
    let selection = selector
        .select(&tables, Phase::Takeoff, Some(1000.0))
        .expect("selection");
    assert_eq!(selection.index, 0);
}

#[test]
fn weighted_tables_are_sorted_and_unique() {
    let selector = TableSelector::default();
    let tables = [
        table("Takeoff 1100 kg", Some(Phase::Takeoff)),
        table("Takeoff 1000 kg", Some(Phase::Takeoff)),
        table("Takeoff 1000 kg (copy)", Some(Phase::Takeoff)),
        table("Takeoff", Some(Phase::Takeoff)),
        table("Landing 1000 kg", Some(Phase::Landing)),
    ];
    let weighted = selector.weighted(&tables, Phase::Takeoff);
    let weights: Vec<f64> = weighted.iter().map(|w| w.weight_kg).collect();
    assert_eq!(weights, vec![1000.0, 1100.0]);
    assert_eq!(weighted[0].index, 1);
}

#[test]
fn weight_annotations_parse_kg_and_lb() {
    assert_eq!(parse_weight_kg("MTOW 1111 kg"), Some(1111.0));
    assert_eq!(parse_weight_kg("at 1000KG"), Some(1000.0));
    let lb = parse_weight_kg("2550 lbs gross").expect("lb");
    assert!((lb - 1156.66).abs() < 0.01);
    assert_eq!(parse_weight_kg("flaps 10"), None);

    let mut annotated = table("Takeoff", None);
    annotated.conditions = Some("900 kg, paved".into());
    assert_eq!(declared_weight_kg(&annotated), Some(900.0));
}

#[test]
fn phase_labels_parse_leniently() {
    let parsed: PerformanceTable = serde_json::from_value(serde_json::json!({
        "table_name": "Perf",
        "table_type": "Décollage",
        "data": [{ "altitude": 0, "temperature": 0 }]
    }))
    .expect("table");
    assert_eq!(parsed.phase, Some(Phase::Takeoff));
    assert_eq!(parsed.rows.len(), 1);

    let unknown: PerformanceTable = serde_json::from_value(serde_json::json!({
        "name": "Perf",
        "phase": "climb"
    }))
    .expect("table");
    assert_eq!(unknown.phase, None);
}
