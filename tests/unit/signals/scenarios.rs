//! End-to-end evaluation scenarios

use altscore::config::EngineConfig;
use altscore::models::{Decision, Subject, NEUTRAL_GEO_LABEL};
use altscore::sentiment::FixedPolarity;
use altscore::signals::{RiskEngine, HARD_STOP_REASON};
use std::sync::Arc;

#[test]
fn test_strong_established_tech_company_is_approved() {
    let engine = RiskEngine::default();
    let mut subject = Subject::new("Austin Analytics")
        .with_headquarters("Austin, TX")
        .with_industry("Technology")
        .with_business_age(15);
    for day in 1..=5 {
        subject.add_signal("Google News", "Revenue beat expectations", format!("2024-04-{:02}", day));
    }

    let assessment = engine.evaluate(&mut subject);

    assert_eq!(subject.geo_risk_label, NEUTRAL_GEO_LABEL);
    assert!(subject.risk_score > 50.0);
    assert_eq!(assessment.decision, Decision::Approve);
    assert!(!subject.lawsuit_flag);
    assert_eq!(subject.sentiment_momentum, 0.0);
}

#[test]
fn test_bankruptcy_headline_forces_rejection() {
    let engine = RiskEngine::default();
    for date in ["2024-02-10", "Tue, 13 Feb 2024 09:30:00 GMT", "not a date"] {
        let mut subject = Subject::new("Sinking Ship Co")
            .with_industry("Technology")
            .with_business_age(30);
        subject.add_signal("Google News", "Sinking Ship Co files for Bankruptcy", date);
        subject.add_signal("Google News", "Record growth and strong profit", "2024-01-01");
        subject.verify_financials(250000.0);

        let assessment = engine.evaluate(&mut subject);

        assert!(subject.lawsuit_flag, "date {}", date);
        assert!(subject.risk_score <= 40.0, "date {}", date);
        assert_eq!(subject.decision_reasons[0], HARD_STOP_REASON);
        assert_eq!(assessment.decision, Decision::Reject);
    }
}

#[test]
fn test_startup_with_distressed_sister_loses_at_least_25_points() {
    let engine = RiskEngine::with_extractor(EngineConfig::default(), Arc::new(FixedPolarity(0.0)));

    let mut baseline = Subject::new("Fresh Start Inc").with_business_age(10);
    baseline.add_signal("News", "Quarterly update", "2024-03-01");
    let base = engine.evaluate(&mut baseline);

    let mut subject = Subject::new("Fresh Start Inc").with_business_age(1);
    subject.add_signal("News", "Quarterly update", "2024-03-01");
    subject.add_related_entity("Old Venture LLC", 30.0, "Sister");
    let assessment = engine.evaluate(&mut subject);

    assert_eq!(subject.contagion_penalty, 10.0);
    assert!(base.risk_score - assessment.risk_score >= 25.0);
    assert!(subject
        .decision_reasons
        .iter()
        .any(|r| r.contains("Old Venture LLC")));
    assert!(subject
        .decision_reasons
        .iter()
        .any(|r| r.contains("Early-stage")));
}

#[test]
fn test_early_stage_in_high_cost_zone() {
    let engine = RiskEngine::with_extractor(EngineConfig::default(), Arc::new(FixedPolarity(0.1)));
    let mut subject = Subject::new("Bay Bakery")
        .with_headquarters("San Francisco, CA")
        .with_industry("Restaurant")
        .with_business_age(3);
    subject.add_signal("Yelp", "Nice bread", "2024-05-01");

    let assessment = engine.evaluate(&mut subject);

    assert_eq!(subject.geo_risk_label, "High Operational Cost Zone");
    assert_eq!(subject.geo_risk_score, 5.0);
    // 50 + 0.1 * 80 - 5 (industry) - 5 (geo)
    assert_eq!(assessment.risk_score, 48.0);
    assert_eq!(assessment.decision, Decision::ManualReview);
}

#[test]
fn test_climate_zone_is_reported_without_penalty() {
    let engine = RiskEngine::with_extractor(EngineConfig::default(), Arc::new(FixedPolarity(0.0)));
    let mut subject = Subject::new("Gulf Marine").with_headquarters("Miami, FL");
    subject.add_signal("News", "Harbor expansion", "2024-05-01");

    let assessment = engine.evaluate(&mut subject);

    assert_eq!(assessment.risk_score, 50.0);
    assert_eq!(subject.geo_risk_score, 0.0);
    assert!(subject.decision_reasons[0].starts_with("Geo-Risk"));
}

#[test]
fn test_critical_cash_and_negative_news_rejects() {
    let engine = RiskEngine::with_extractor(EngineConfig::default(), Arc::new(FixedPolarity(-0.3)));
    let mut subject = Subject::new("Thin Margins").with_business_age(8);
    subject.add_signal("News", "Sales dip", "2024-01-01");
    subject.verify_financials(450.0);

    let assessment = engine.evaluate(&mut subject);

    // 50 - 0.3 * 80 - 10
    assert_eq!(assessment.risk_score, 16.0);
    assert_eq!(assessment.decision, Decision::Reject);
    assert_eq!(
        subject.decision_reasons,
        vec!["CRITICAL: Insufficient cash reserves verified (< $1,000).".to_string()]
    );
}
