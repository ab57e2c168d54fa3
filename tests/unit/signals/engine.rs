//! Unit tests for the risk engine

use altscore::config::EngineConfig;
use altscore::models::{Decision, EvaluationPath, Subject};
use altscore::sentiment::FixedPolarity;
use altscore::signals::RiskEngine;
use std::sync::Arc;

fn engine_with(polarity: f64) -> RiskEngine {
    RiskEngine::with_extractor(EngineConfig::default(), Arc::new(FixedPolarity(polarity)))
}

fn dated_subject(name: &str, count: usize) -> Subject {
    let mut subject = Subject::new(name);
    for day in 1..=count {
        subject.add_signal("News", "Routine update", format!("2024-01-{:02}", day));
    }
    subject
}

#[test]
fn test_empty_signals_is_neutral() {
    let mut subject = Subject::new("Quiet LLC");
    let assessment = engine_with(0.9).evaluate(&mut subject);

    assert_eq!(assessment.path, EvaluationPath::NoSignals);
    assert_eq!(subject.risk_score, 50.0);
    assert!(subject.decision_reasons.is_empty());
    assert_eq!(assessment.decision, Decision::ManualReview);
}

#[test]
fn test_score_is_always_clamped() {
    for polarity in [-1.0, -0.6, -0.2, 0.0, 0.3, 0.7, 1.0] {
        let mut subject = dated_subject("Bounded Inc", 6).with_business_age(1);
        subject.add_related_entity("Sister A", 10.0, "Sister");
        subject.add_related_entity("Sister B", 5.0, "Sister");
        subject.verify_financials(100.0);
        let assessment = engine_with(polarity).evaluate(&mut subject);
        assert!(
            (0.0..=100.0).contains(&assessment.risk_score),
            "polarity {} produced {}",
            polarity,
            assessment.risk_score
        );
    }
}

#[test]
fn test_short_series_has_zero_momentum() {
    let mut subject = dated_subject("Short Series", 2);
    let assessment = engine_with(-0.8).evaluate(&mut subject);
    assert_eq!(assessment.sentiment_momentum, 0.0);
    assert_eq!(subject.sentiment_momentum, 0.0);
}

#[test]
fn test_re_evaluation_is_idempotent() {
    let engine = engine_with(-0.4);
    let mut subject = dated_subject("Repeat Co", 4).with_industry("Retail");
    subject.add_related_entity("Sister", 20.0, "Sister");

    let first = engine.evaluate(&mut subject);
    let reasons = subject.decision_reasons.clone();
    let second = engine.evaluate(&mut subject);

    assert_eq!(first.risk_score, second.risk_score);
    assert_eq!(reasons, subject.decision_reasons);
}

#[test]
fn test_lawsuit_flag_is_sticky() {
    let engine = engine_with(0.8);
    let mut subject = Subject::new("Sticky Corp");
    subject.add_signal("Court", "Lawsuit filed by supplier", "2024-01-01");
    engine.evaluate(&mut subject);
    assert!(subject.lawsuit_flag);

    subject.signals.clear();
    subject.add_signal("News", "Case dismissed, record sales", "2024-02-01");
    let assessment = engine.evaluate(&mut subject);

    assert!(subject.lawsuit_flag);
    assert!(assessment.risk_score <= 40.0);
    assert_eq!(assessment.decision, Decision::Reject);
}

#[test]
fn test_polarities_written_back_in_order() {
    let engine = RiskEngine::with_extractor(
        EngineConfig::default(),
        Arc::new(|text: &str| if text.contains("good") { 0.6 } else { -0.2 }),
    );
    let mut subject = Subject::new("Order Co");
    subject.add_signal("A", "good news", "2024-01-03");
    subject.add_signal("B", "so-so", "2024-01-01");
    subject.add_signal("C", "fraud alleged", "2024-01-02");
    engine.evaluate(&mut subject);

    let polarities: Vec<f64> = subject.signals.iter().map(|s| s.polarity).collect();
    assert_eq!(polarities, vec![0.6, -0.2, -1.0]);
}
