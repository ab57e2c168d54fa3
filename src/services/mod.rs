//! Collaborator interfaces that populate a subject before evaluation.

pub mod collaborators;
pub mod financials;
pub mod pipeline;

pub use collaborators::{
    FinancialVerifier, RelationshipResolver, SignalSource, StaticRelationships, StaticSignals,
    SubjectProfile,
};
pub use financials::{parse_statement_balance, StatementBalanceVerifier};
pub use pipeline::Pipeline;
