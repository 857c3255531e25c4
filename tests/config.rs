use std::fs;

use aeroperf::config::{
    ConfigError, load_aircraft_configs, load_airport_configs, load_engine_config,
};
use aeroperf::performance::{EngineSettings, Phase, aircraft, airport};
use tempfile::tempdir;

const CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/configs");

#[test]
fn engine_config_fixture_overrides_defaults() {
    let config = load_engine_config(format!("{CONFIG_DIR}/engine.toml")).expect("engine config");
    let settings = EngineSettings::from_config(&config);

    assert_eq!(settings.aliases.altitude.last().map(String::as_str), Some("zp_ft"));
    assert!(settings.phase_keywords.landing.contains(&"arrival".to_string()));
    assert_eq!(settings.factors.wet, 1.15);
    assert_eq!(settings.wind.takeoff_tailwind_tolerance_kt, 5.0);
    assert!(!settings.interpolate_weight);
    // sections absent from the file keep their defaults
    assert_eq!(
        settings.aliases.temperature,
        EngineSettings::default().aliases.temperature
    );
}

#[test]
fn partial_engine_config_in_yaml_and_json() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("engine.yaml");
    fs::write(
        &yaml,
        "corrections:\n  wet: 1.3\ndefaults:\n  interpolate_weight: true\n  confidence: 0.6\n",
    )
    .expect("write yaml");
    let settings = EngineSettings::from_config(&load_engine_config(&yaml).expect("yaml"));
    assert_eq!(settings.factors.wet, 1.3);
    assert_eq!(settings.factors.grass, 1.25);
    assert!(settings.interpolate_weight);
    assert_eq!(settings.default_confidence, 0.6);

    let json = dir.path().join("engine.json");
    fs::write(&json, r#"{ "wind": { "calm_threshold_kt": 2.5 } }"#).expect("write json");
    let settings = EngineSettings::from_config(&load_engine_config(&json).expect("json"));
    assert_eq!(settings.wind.calm_threshold_kt, 2.5);
    assert_eq!(settings.landing_fuel_burn_kg, 50.0);
}

#[test]
fn aircraft_directory_loads_every_toml_file() {
    let catalog = load_aircraft_configs(format!("{CONFIG_DIR}/aircraft")).expect("catalog");
    let names: Vec<&str> = catalog.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["C172S", "DR400-120"]);

    let dr400 = aircraft::select(&catalog, Some("f-gkqz")).expect("DR400");
    assert_eq!(dr400.tables.len(), 2);
    assert_eq!(dr400.tables[0].phase, Some(Phase::Takeoff));
    assert_eq!(dr400.tables[1].phase, None);
    assert_eq!(dr400.tables[0].confidence, Some(0.8));

    assert_eq!(aircraft::select(&catalog, None).expect("first").name, "C172S");
    assert!(matches!(
        aircraft::select(&catalog, Some("PA28")),
        Err(aircraft::AircraftError::NotFound(_))
    ));
    assert!(matches!(
        aircraft::select(&[], None),
        Err(aircraft::AircraftError::EmptyCatalog)
    ));
}

#[test]
fn airport_directory_expands_runway_designators() {
    let catalog = load_airport_configs(format!("{CONFIG_DIR}/airports")).expect("catalog");
    assert_eq!(catalog.len(), 3);

    let lfaq = airport::select(&catalog, "LFAQ").expect("LFAQ");
    assert_eq!(lfaq.elevation_m, Some(111.0));
    let ends: Vec<(&str, f64)> = lfaq
        .runways
        .iter()
        .map(|end| (end.ident.as_str(), end.heading_deg))
        .collect();
    assert_eq!(
        ends,
        vec![("09", 92.0), ("27", 272.0), ("09L", 90.0), ("27R", 270.0)]
    );
    assert_eq!(lfaq.runways[2].surface.as_deref(), Some("GRASS"));

    assert!(matches!(
        airport::select(&catalog, "EGLL"),
        Err(airport::AirportError::NotFound(_))
    ));
}

#[test]
fn yaml_and_json_catalogs_are_lists() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("aircraft.yaml");
    fs::write(
        &yaml,
        r#"
- name: PA28
  max_takeoff_weight_kg: 1055
  tables:
    - table_name: Décollage
      table_type: décollage
      data:
        - { altitude: 0, temperature: 15, ground_roll: 330, distance_50ft: 520 }
"#,
    )
    .expect("write yaml");
    let catalog = load_aircraft_configs(&yaml).expect("yaml catalog");
    let pa28 = aircraft::from_config(&catalog[0]);
    assert_eq!(pa28.tables[0].name, "Décollage");
    assert_eq!(pa28.tables[0].phase, Some(Phase::Takeoff));
    assert_eq!(pa28.tables[0].rows.len(), 1);

    let json = dir.path().join("airports.json");
    fs::write(
        &json,
        r#"[{ "icao": "LFXX", "runways": [{ "designator": "37/19" }] }]"#,
    )
    .expect("write json");
    let airports = load_airport_configs(&json).expect("json catalog");
    assert!(matches!(
        airport::from_config(&airports[0]),
        Err(airport::AirportError::Runway { .. })
    ));
}

#[test]
fn loader_errors_are_typed() {
    let dir = tempdir().expect("tempdir");
    assert!(matches!(
        load_aircraft_configs(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "name = \"X\"\nmax_takeoff_weight_kg = \"heavy\"\n").expect("write");
    assert!(matches!(load_aircraft_configs(&broken), Err(ConfigError::Toml(_))));

    let broken_yaml = dir.path().join("broken.yaml");
    fs::write(&broken_yaml, "- icao: [unterminated\n").expect("write");
    assert!(matches!(load_airport_configs(&broken_yaml), Err(ConfigError::Parse(_))));
}
