#![cfg(feature = "serde")]

use spline_handles::prelude::{CurveType, RigConfig};

#[test]
fn test_config_serialization() {
    let config = RigConfig {
        curve_type: CurveType::CatmullRom { tension: 0.25 },
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&config).unwrap();
    println!("{}", json);
    let restored: RigConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let json = r#"{ "initial_points": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "edit_resolution": 64 }"#;
    let config: RigConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.initial_points.len(), 3);
    assert_eq!(config.edit_resolution, 64);
    assert_eq!(config.initial_resolution, RigConfig::default().initial_resolution);
    assert_eq!(config.curve_type, CurveType::Chordal);
}
