//! Shared data models spanning the engine layers.

pub mod assessment;
pub mod subject;

pub use assessment::{Adjustment, Decision, EvaluationPath, RiskAssessment};
pub use subject::{KeyPerson, RelatedEntity, Signal, Subject, NEUTRAL_GEO_LABEL, UNKNOWN};
