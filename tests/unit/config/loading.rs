//! Unit tests for engine configuration files

use altscore::config::EngineConfig;
use altscore::error::ConfigError;
use altscore::models::{Decision, Subject};
use altscore::sentiment::FixedPolarity;
use altscore::signals::RiskEngine;
use std::path::PathBuf;
use std::sync::Arc;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("altscore-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn test_from_file_applies_thresholds() {
    let path = write_temp(
        "strict",
        r#"
        [decision]
        approve_threshold = 95.0
        review_threshold = 60.0
        "#,
    );
    let config = EngineConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(config.validate().is_ok());

    let engine = RiskEngine::with_extractor(config, Arc::new(FixedPolarity(0.3)));
    let mut subject = Subject::new("Strict Co");
    subject.add_signal("News", "Solid month", "2024-01-01");
    let assessment = engine.evaluate(&mut subject);

    // 50 + 0.3 * 80
    assert_eq!(assessment.risk_score, 74.0);
    assert_eq!(assessment.decision, Decision::ManualReview);
}

#[test]
fn test_custom_critical_terms() {
    let path = write_temp(
        "terms",
        r#"
        [lexicons.critical_terms]
        terms = ["liquidation"]
        "#,
    );
    let config = EngineConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let engine = RiskEngine::with_extractor(config, Arc::new(FixedPolarity(0.5)));
    let mut subject = Subject::new("Custom Terms");
    subject.add_signal("News", "Lawsuit rumors", "2024-01-01");
    subject.add_signal("News", "Liquidation announced", "2024-01-02");
    let assessment = engine.evaluate(&mut subject);

    assert_eq!(assessment.critical_signals, vec![1]);
    assert!(subject.lawsuit_flag);
}

#[test]
fn test_missing_file_is_read_error() {
    let err = EngineConfig::from_file(&PathBuf::from("/nonexistent/altscore.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let path = write_temp("broken", "[decision\napprove_threshold = ");
    let err = EngineConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
