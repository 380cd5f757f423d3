use trend_virality::config::ScoringConfig;

#[test]
fn default_weights_sum_to_one() {
    let weights = ScoringConfig::default().weights;
    let total =
        weights.growth + weights.acceleration + weights.viral + weights.quality + weights.creator;
    assert!((total - 1.0).abs() < 1e-12);
    assert!(ScoringConfig::default().validate().is_ok());
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let config = ScoringConfig::from_toml("[weights]\ngrowth = 0.4\n").unwrap();
    assert!((config.weights.growth - 0.4).abs() < 1e-12);
    assert!((config.weights.acceleration - 0.2).abs() < 1e-12);
    assert_eq!(config.classification, ScoringConfig::default().classification);
    assert_eq!(config.attribution, ScoringConfig::default().attribution);
}

#[test]
fn validate_rejects_unordered_thresholds() {
    let config = ScoringConfig::from_toml("[classification]\nviral = 40.0\n").unwrap();
    assert!(config.validate().is_err());

    let mut config = ScoringConfig::default();
    config.classification.probability_cap = 1.5;
    assert!(config.validate().is_err());

    let mut config = ScoringConfig::default();
    config.growth.momentum_window_hours = 0.0;
    assert!(config.validate().is_err());

    let mut config = ScoringConfig::default();
    config.weights.viral = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn malformed_toml_is_reported() {
    let err = ScoringConfig::from_toml("[weights\ngrowth = ").unwrap_err();
    assert!(err.starts_with("failed to parse config"));
}

#[test]
fn load_reads_written_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("scoring.toml");

    let mut config = ScoringConfig::default();
    config.classification.viral = 75.0;
    config.growth.momentum_window_hours = 8.0;
    config.write(&path).unwrap();

    let (loaded, loaded_path) = ScoringConfig::load(Some(path.clone())).unwrap();
    assert_eq!(loaded_path, Some(path));
    assert_eq!(loaded.classification.viral, 75.0);
    assert_eq!(loaded.growth.momentum_window_hours, 8.0);
}

#[test]
fn load_falls_back_to_defaults_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let (config, _) = ScoringConfig::load(Some(path)).unwrap();
    assert_eq!(config.weights, ScoringConfig::default().weights);
}

#[test]
fn load_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoring.toml");
    std::fs::write(&path, "[classification]\nwatch = 60.0\n").unwrap();
    assert!(ScoringConfig::load(Some(path)).is_err());
}
