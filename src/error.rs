//! Error types for the crate's outer surfaces.
//!
//! The scoring engine itself never fails; these cover configuration loading,
//! boundary validation of incoming subjects and upstream collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },

    #[error("inconsistent thresholds: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("subject name must not be empty")]
    EmptyName,

    #[error("cash balance must be finite, got {0}")]
    NonFiniteCash(f64),

    #[error("related entity '{name}' has risk score {score} outside [0, 100]")]
    RelatedScoreOutOfRange { name: String, score: f64 },

    #[error("founding year {year} is after {current_year}")]
    FoundingYearInFuture { year: i32, current_year: i32 },
}

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("signal source unavailable: {0}")]
    SignalSource(String),

    #[error("financial verification failed: {0}")]
    FinancialVerifier(String),

    #[error("relationship resolution failed: {0}")]
    RelationshipResolver(String),
}
