use aeroperf::wind::{
    Category, CrosswindSide, RunwayEnd, RunwayParseError, WindAnalyzer, WindCondition,
    WindDirection, WindVector, ends_from_designator, surface_compatible,
};
use proptest::prelude::*;

fn ends_09_27() -> Vec<RunwayEnd> {
    ends_from_designator("09/27", None, Some("ASPH")).expect("designator")
}

#[test]
fn aligned_wind_is_pure_headwind() {
    let report = WindAnalyzer::default().analyze(&WindVector::new(90.0, 10.0), &ends_09_27());
    assert_eq!(report.condition, WindCondition::Directional);

    let best = report.best().expect("runway");
    assert_eq!(best.ident, "09");
    assert!((best.headwind_kt - 10.0).abs() < 1e-9);
    assert_eq!(best.crosswind_kt, 0.0);
    assert_eq!(best.category, Category::Optimal);
    assert!(!best.is_tailwind);
}

#[test]
fn opposite_end_has_the_tailwind() {
    let report = WindAnalyzer::default().analyze(&WindVector::new(90.0, 10.0), &ends_09_27());
    let reciprocal = &report.runways[1];
    assert_eq!(reciprocal.ident, "27");
    assert!((reciprocal.headwind_kt + 10.0).abs() < 1e-9);
    assert!((reciprocal.tailwind_kt() - 10.0).abs() < 1e-9);
    assert_eq!(reciprocal.crosswind_kt, 0.0);
    assert_eq!(reciprocal.category, Category::Poor);
    assert!(reciprocal.is_tailwind);
}

#[test]
fn crosswind_side_and_gust_component() {
    let wind = WindVector::new(120.0, 10.0).with_gust(20.0);
    let report = WindAnalyzer::default().analyze(&wind, &[RunwayEnd::new("09", 90.0)]);
    let rwy = &report.runways[0];

    assert!((rwy.crosswind_kt - 5.0).abs() < 1e-9);
    assert!((rwy.gust_crosswind_kt.expect("gust") - 10.0).abs() < 1e-9);
    assert_eq!(rwy.crosswind_side, CrosswindSide::Right);
    assert_eq!(rwy.category, Category::Optimal);

    let left = WindAnalyzer::default().analyze(&WindVector::new(60.0, 10.0), &[RunwayEnd::new("09", 90.0)]);
    assert_eq!(left.runways[0].crosswind_side, CrosswindSide::Left);
}

#[test]
fn calm_and_variable_winds_keep_input_order() {
    let analyzer = WindAnalyzer::default();
    let ends = ends_09_27();

    for wind in [WindVector::calm(), WindVector::new(270.0, 0.5)] {
        let report = analyzer.analyze(&wind, &ends);
        assert_eq!(report.condition, WindCondition::Calm);
        let idents: Vec<&str> = report.runways.iter().map(|r| r.ident.as_str()).collect();
        assert_eq!(idents, vec!["09", "27"]);
        assert!(report.runways.iter().all(|r| r.headwind_kt == 0.0 && r.crosswind_kt == 0.0));
    }

    let variable = analyzer.analyze(&WindVector::variable(4.0), &ends);
    assert_eq!(variable.condition, WindCondition::Variable);
    assert_eq!(variable.runways.len(), 2);
    assert_eq!(variable.runways[0].ident, "09");
}

#[test]
fn takeoff_pick_falls_back_to_the_best_end() {
    let analyzer = WindAnalyzer::default();
    let report = analyzer.analyze(&WindVector::new(90.0, 10.0), &ends_09_27());
    assert_eq!(analyzer.preferred_takeoff(&report).expect("takeoff").ident, "09");

    let downwind_only = analyzer.analyze(&WindVector::new(90.0, 10.0), &[RunwayEnd::new("27", 270.0)]);
    assert_eq!(
        analyzer.preferred_takeoff(&downwind_only).expect("takeoff").ident,
        "27"
    );

    let empty = analyzer.analyze(&WindVector::new(90.0, 10.0), &[]);
    assert!(analyzer.preferred_takeoff(&empty).is_none());
}

#[test]
fn landing_pick_prefers_optimal_or_good() {
    let analyzer = WindAnalyzer::default();
    let report = analyzer.analyze(&WindVector::new(150.0, 10.0), &ends_09_27());
    assert_eq!(report.runways[0].category, Category::Acceptable);
    assert_eq!(analyzer.preferred_landing(&report).expect("landing").ident, "09");

    let ends = vec![RunwayEnd::new("05", 50.0), RunwayEnd::new("09", 90.0)];
    let report = analyzer.analyze(&WindVector::new(80.0, 12.0), &ends);
    assert_eq!(analyzer.preferred_landing(&report).expect("landing").ident, "09");
}

#[test]
fn designators_expand_to_both_ends() {
    let ends = ends_from_designator("05/23", None, None).expect("designator");
    assert_eq!(ends.len(), 2);
    assert_eq!((ends[0].ident.as_str(), ends[0].heading_deg), ("05", 50.0));
    assert_eq!((ends[1].ident.as_str(), ends[1].heading_deg), ("23", 230.0));

    let qfu = ends_from_designator("09L/27R", Some(92.0), Some("GRASS")).expect("designator");
    assert_eq!(qfu[0].heading_deg, 92.0);
    assert_eq!(qfu[1].heading_deg, 272.0);
    assert_eq!(qfu[1].surface.as_deref(), Some("GRASS"));

    let single = ends_from_designator("36", None, None).expect("designator");
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].heading_deg, 360.0);
}

#[test]
fn malformed_designators_are_rejected() {
    assert_eq!(ends_from_designator("", None, None), Err(RunwayParseError::Empty));
    assert_eq!(ends_from_designator(" / ", None, None), Err(RunwayParseError::Empty));
    assert_eq!(
        ends_from_designator("37", None, None),
        Err(RunwayParseError::InvalidIdent("37".into()))
    );
    assert!(matches!(
        ends_from_designator("09/XX", None, None),
        Err(RunwayParseError::InvalidIdent(_))
    ));
}

#[test]
fn surface_matching_is_lenient() {
    let asph = vec!["ASPH".to_string()];
    assert!(surface_compatible(Some("GRASS"), &[]));
    assert!(surface_compatible(None, &asph));
    assert!(surface_compatible(Some("unknown"), &asph));
    assert!(surface_compatible(Some("CONC+ASPH"), &asph));
    assert!(surface_compatible(Some("asphalt"), &asph));
    assert!(!surface_compatible(Some("GRASS"), &asph));
}

#[test]
fn wind_direction_accepts_labels_and_numbers() {
    let parse = |value: serde_json::Value| serde_json::from_value::<WindDirection>(value);

    assert_eq!(parse(serde_json::json!("VRB")).expect("vrb"), WindDirection::Variable);
    assert_eq!(parse(serde_json::json!("Calme")).expect("calm"), WindDirection::Calm);
    assert_eq!(parse(serde_json::json!(270)).expect("deg"), WindDirection::Degrees(270.0));
    assert_eq!(parse(serde_json::json!("240")).expect("deg"), WindDirection::Degrees(240.0));
    assert!(parse(serde_json::json!("north")).is_err());

    let wind: WindVector =
        serde_json::from_value(serde_json::json!({ "direction": "calm", "speed_kt": 0 }))
            .expect("wind");
    assert_eq!(wind, WindVector::calm());
    assert_eq!(
        serde_json::to_value(WindDirection::Variable).expect("json"),
        serde_json::json!("variable")
    );
}

proptest! {
    #[test]
    fn reciprocal_ends_share_exactly_one_tailwind(
        direction in 0.0f64..360.0,
        speed in 1.0f64..60.0,
        number in 1u16..=36,
    ) {
        let heading = f64::from(number) * 10.0;
        let off_axis = aeroperf::primitives::angles::angular_difference(direction, heading);
        prop_assume!((off_axis - 90.0).abs() > 1.0);

        let ends = vec![
            RunwayEnd::new("A", heading),
            RunwayEnd::new("B", (heading + 180.0) % 360.0),
        ];
        let report = WindAnalyzer::default().analyze(&WindVector::new(direction, speed), &ends);
        let tailwinds = report.runways.iter().filter(|r| r.is_tailwind).count();
        prop_assert_eq!(tailwinds, 1);
    }

    #[test]
    fn components_never_exceed_wind_speed(
        direction in 0.0f64..360.0,
        speed in 1.0f64..60.0,
        heading in 0.0f64..360.0,
    ) {
        let report = WindAnalyzer::default()
            .analyze(&WindVector::new(direction, speed), &[RunwayEnd::new("X", heading)]);
        let rwy = &report.runways[0];
        prop_assert!(rwy.crosswind_kt >= 0.0);
        prop_assert!(rwy.headwind_kt.abs() <= speed + 1e-9);
        prop_assert!(rwy.crosswind_kt <= speed + 1e-9);
        prop_assert!(rwy.angle_diff_deg >= 0.0 && rwy.angle_diff_deg <= 180.0);
    }
}
