//! Runs collaborators against a subject, then evaluates it.
//!
//! A failing collaborator is logged and skipped. The subject keeps whatever
//! it had before that collaborator ran, so the engine sees neutral defaults
//! for the missing data.

use crate::error::CollaboratorError;
use crate::models::assessment::RiskAssessment;
use crate::models::subject::Subject;
use crate::services::collaborators::{FinancialVerifier, RelationshipResolver, SignalSource};
use crate::signals::RiskEngine;
use tracing::{debug, warn};

#[derive(Default)]
pub struct Pipeline {
    sources: Vec<Box<dyn SignalSource>>,
    verifiers: Vec<Box<dyn FinancialVerifier>>,
    resolvers: Vec<Box<dyn RelationshipResolver>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl SignalSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn with_verifier(mut self, verifier: impl FinancialVerifier + 'static) -> Self {
        self.verifiers.push(Box::new(verifier));
        self
    }

    pub fn with_resolver(mut self, resolver: impl RelationshipResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Run every collaborator in order: sources, verifiers, resolvers.
    /// Returns the number of collaborators that failed.
    pub fn collect(&self, subject: &mut Subject) -> usize {
        let mut failures = 0;
        for source in &self.sources {
            failures += absorb(subject, source.name(), |s| source.populate(s));
        }
        for verifier in &self.verifiers {
            failures += absorb(subject, verifier.name(), |s| verifier.verify(s));
        }
        for resolver in &self.resolvers {
            failures += absorb(subject, resolver.name(), |s| resolver.resolve(s));
        }
        failures
    }

    /// Collect, then evaluate with `engine`.
    pub fn run(&self, engine: &RiskEngine, subject: &mut Subject) -> RiskAssessment {
        let failures = self.collect(subject);
        if failures > 0 {
            warn!(
                subject = %subject.name,
                failures,
                "Evaluating with partial data"
            );
        }
        engine.evaluate(subject)
    }
}

/// Apply `step` to a scratch copy and keep it only on success.
fn absorb<F>(subject: &mut Subject, collaborator: &str, step: F) -> usize
where
    F: FnOnce(&mut Subject) -> Result<(), CollaboratorError>,
{
    let mut scratch = subject.clone();
    match step(&mut scratch) {
        Ok(()) => {
            debug!(subject = %subject.name, collaborator, "Collaborator completed");
            *subject = scratch;
            0
        }
        Err(e) => {
            warn!(
                subject = %subject.name,
                collaborator,
                error = %e,
                "Collaborator failed, continuing with defaults"
            );
            1
        }
    }
}
