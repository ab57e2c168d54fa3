//! Unit tests for collaborator pipelines

use altscore::error::CollaboratorError;
use altscore::models::{Decision, KeyPerson, RelatedEntity, Signal, Subject};
use altscore::report::RiskReport;
use altscore::sentiment::FixedPolarity;
use altscore::services::{
    Pipeline, RelationshipResolver, StatementBalanceVerifier, StaticRelationships, StaticSignals,
    SubjectProfile,
};
use altscore::signals::RiskEngine;
use std::sync::Arc;

struct RegistryDown;

impl RelationshipResolver for RegistryDown {
    fn name(&self) -> &str {
        "registry"
    }

    fn resolve(&self, _subject: &mut Subject) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::RelationshipResolver(
            "registry timed out".to_string(),
        ))
    }
}

fn engine() -> RiskEngine {
    RiskEngine::with_extractor(Default::default(), Arc::new(FixedPolarity(0.2)))
}

#[test]
fn test_full_pipeline_builds_report() {
    let pipeline = Pipeline::new()
        .with_source(
            StaticSignals::new(vec![
                Signal::new("Google News", "Opens new store", "Mon, 06 Jan 2025 08:00:00 GMT"),
                Signal::new("Yelp", "Friendly staff", "2025-01-10"),
            ])
            .with_profile(SubjectProfile {
                headquarters: Some("Denver, CO".to_string()),
                industry: Some("Retail".to_string()),
                business_age: Some(6),
                ..Default::default()
            }),
        )
        .with_verifier(StatementBalanceVerifier::new(
            "Statement period Jan 2025\nEnding Balance: $64,300.00",
        ))
        .with_resolver(StaticRelationships::new(
            vec![RelatedEntity {
                name: "Mile High Holdings".to_string(),
                risk_score: 72.0,
                relation: "Parent".to_string(),
            }],
            vec![KeyPerson {
                name: "Ana Ortiz".to_string(),
                role: "Founder".to_string(),
            }],
        ));

    let mut subject = Subject::new("Denver Goods");
    let assessment = pipeline.run(&engine(), &mut subject);
    let report = RiskReport::new(&subject, &assessment);

    // 50 + 0.2 * 80 - 5 (industry) + 15 (cash)
    assert_eq!(assessment.risk_score, 76.0);
    assert_eq!(report.decision, Decision::Approve);
    assert_eq!(report.verified_cash, Some(64300.0));
    assert_eq!(report.key_person, "Ana Ortiz");
    assert_eq!(report.contagion_penalty, 0.0);
}

#[test]
fn test_failed_resolver_scores_without_relationships() {
    let pipeline = Pipeline::new()
        .with_source(StaticSignals::new(vec![Signal::new(
            "News",
            "Steady trading",
            "2024-01-01",
        )]))
        .with_resolver(RegistryDown);

    let mut subject = Subject::new("Partial Data Co");
    let assessment = pipeline.run(&engine(), &mut subject);

    assert!(subject.related_entities.is_empty());
    assert_eq!(assessment.contagion_penalty, 0.0);
    assert_eq!(assessment.risk_score, 66.0);
}
