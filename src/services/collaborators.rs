//! Upstream data interfaces and in-memory implementations.
//!
//! Real acquisition (feeds, registries, document extraction) lives outside
//! this crate. Anything that can fill in a [`Subject`] implements one of
//! these traits.

use crate::error::CollaboratorError;
use crate::models::subject::{KeyPerson, RelatedEntity, Signal, Subject};

/// Supplies signals and, optionally, profile metadata.
pub trait SignalSource: Send + Sync {
    fn name(&self) -> &str;

    fn populate(&self, subject: &mut Subject) -> Result<(), CollaboratorError>;
}

/// Confirms the subject's cash position.
pub trait FinancialVerifier: Send + Sync {
    fn name(&self) -> &str;

    fn verify(&self, subject: &mut Subject) -> Result<(), CollaboratorError>;
}

/// Adds related entities and key people.
pub trait RelationshipResolver: Send + Sync {
    fn name(&self) -> &str;

    fn resolve(&self, subject: &mut Subject) -> Result<(), CollaboratorError>;
}

/// Registry metadata a signal source may know about the subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectProfile {
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub founding_year: Option<i32>,
    pub business_age: Option<u32>,
}

impl SubjectProfile {
    fn apply(&self, subject: &mut Subject) {
        if let Some(headquarters) = &self.headquarters {
            subject.headquarters = headquarters.clone();
        }
        if let Some(industry) = &self.industry {
            subject.industry = industry.clone();
        }
        if let Some(year) = self.founding_year {
            subject.founding_year = year;
        }
        if let Some(age) = self.business_age {
            subject.business_age = age;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    signals: Vec<Signal>,
    profile: SubjectProfile,
}

impl StaticSignals {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals,
            profile: SubjectProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: SubjectProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl SignalSource for StaticSignals {
    fn name(&self) -> &str {
        "static-signals"
    }

    fn populate(&self, subject: &mut Subject) -> Result<(), CollaboratorError> {
        self.profile.apply(subject);
        subject.signals.extend(self.signals.iter().cloned());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticRelationships {
    related_entities: Vec<RelatedEntity>,
    key_people: Vec<KeyPerson>,
}

impl StaticRelationships {
    pub fn new(related_entities: Vec<RelatedEntity>, key_people: Vec<KeyPerson>) -> Self {
        Self {
            related_entities,
            key_people,
        }
    }
}

impl RelationshipResolver for StaticRelationships {
    fn name(&self) -> &str {
        "static-relationships"
    }

    fn resolve(&self, subject: &mut Subject) -> Result<(), CollaboratorError> {
        subject
            .related_entities
            .extend(self.related_entities.iter().cloned());
        subject.key_people.extend(self.key_people.iter().cloned());
        Ok(())
    }
}
