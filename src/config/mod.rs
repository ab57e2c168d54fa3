//! Engine configuration: thresholds, penalties and lexicons.
//!
//! Resolution order: built-in defaults, then an optional TOML file named by
//! `ALTSCORE_CONFIG`, then individual env overrides.

pub mod lexicon;

pub use lexicon::{Lexicon, MatchMode};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "ALTSCORE_CONFIG";
pub const APPROVE_THRESHOLD_ENV: &str = "ALTSCORE_APPROVE_THRESHOLD";
pub const HARD_STOP_CEILING_ENV: &str = "ALTSCORE_HARD_STOP_CEILING";

/// Runtime environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub decision: DecisionConfig,
    pub lexicons: LexiconConfig,
}

/// Baseline scaling and per-rule thresholds for score composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub neutral_score: f64,
    pub sentiment_scale: f64,
    pub momentum_window: usize,
    pub momentum_threshold: f64,
    pub momentum_penalty: f64,
    pub volatility_threshold: f64,
    pub volatility_penalty: f64,
    pub startup_max_age: u32,
    pub startup_penalty: f64,
    pub established_min_age: u32,
    pub established_bonus: f64,
    pub industry_penalty: f64,
    pub healthy_cash: f64,
    pub healthy_cash_bonus: f64,
    pub critical_cash: f64,
    pub critical_cash_penalty: f64,
    pub distressed_entity_score: f64,
    pub contagion_penalty: f64,
    pub geo_early_stage_age: u32,
    pub geo_cost_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            neutral_score: 50.0,
            sentiment_scale: 80.0,
            momentum_window: 3,
            momentum_threshold: -0.15,
            momentum_penalty: 10.0,
            volatility_threshold: 0.4,
            volatility_penalty: 5.0,
            startup_max_age: 2,
            startup_penalty: 15.0,
            established_min_age: 20,
            established_bonus: 5.0,
            industry_penalty: 5.0,
            healthy_cash: 50_000.0,
            healthy_cash_bonus: 15.0,
            critical_cash: 1_000.0,
            critical_cash_penalty: 10.0,
            distressed_entity_score: 50.0,
            contagion_penalty: 10.0,
            geo_early_stage_age: 5,
            geo_cost_penalty: 5.0,
        }
    }
}

/// Gate ceiling and categorical decision cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    pub hard_stop_ceiling: f64,
    pub approve_threshold: f64,
    pub review_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            hard_stop_ceiling: 40.0,
            approve_threshold: 55.0,
            review_threshold: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub critical_terms: Lexicon,
    pub high_risk_industries: Lexicon,
    pub high_cost_zones: Lexicon,
    pub climate_zones: Lexicon,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            critical_terms: Lexicon::new(
                &[
                    "bankruptcy",
                    "fraud",
                    "investigation",
                    "subpoena",
                    "default",
                    "scandal",
                    "lawsuit",
                ],
                MatchMode::Substring,
            ),
            high_risk_industries: Lexicon::new(
                &["restaurant", "retail", "airlines", "construction"],
                MatchMode::Substring,
            ),
            high_cost_zones: Lexicon::new(
                &[
                    "california",
                    "new york",
                    "massachusetts",
                    "san francisco",
                    "manhattan",
                    "ca",
                    "ny",
                    "ma",
                ],
                MatchMode::Token,
            ),
            climate_zones: Lexicon::new(
                &["florida", "louisiana", "miami", "houston", "fl"],
                MatchMode::Token,
            ),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the optional TOML file and env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(value) = env::var(APPROVE_THRESHOLD_ENV) {
            config.decision.approve_threshold = parse_override(APPROVE_THRESHOLD_ENV, &value)?;
        }
        if let Ok(value) = env::var(HARD_STOP_CEILING_ENV) {
            config.decision.hard_stop_ceiling = parse_override(HARD_STOP_CEILING_ENV, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Check that the decision bands are ordered and within the score range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.decision;
        for (name, value) in [
            ("hard_stop_ceiling", d.hard_stop_ceiling),
            ("approve_threshold", d.approve_threshold),
            ("review_threshold", d.review_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Inconsistent(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }
        if d.review_threshold > d.approve_threshold {
            return Err(ConfigError::Inconsistent(format!(
                "review_threshold {} exceeds approve_threshold {}",
                d.review_threshold, d.approve_threshold
            )));
        }
        let s = &self.scoring;
        for (name, value) in [
            ("neutral_score", s.neutral_score),
            ("sentiment_scale", s.sentiment_scale),
            ("momentum_threshold", s.momentum_threshold),
            ("volatility_threshold", s.volatility_threshold),
            ("healthy_cash", s.healthy_cash),
            ("critical_cash", s.critical_cash),
            ("distressed_entity_score", s.distressed_entity_score),
            ("momentum_penalty", s.momentum_penalty),
            ("volatility_penalty", s.volatility_penalty),
            ("startup_penalty", s.startup_penalty),
            ("established_bonus", s.established_bonus),
            ("industry_penalty", s.industry_penalty),
            ("healthy_cash_bonus", s.healthy_cash_bonus),
            ("critical_cash_penalty", s.critical_cash_penalty),
            ("contagion_penalty", s.contagion_penalty),
            ("geo_cost_penalty", s.geo_cost_penalty),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Inconsistent(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.scoring.momentum_window == 0 {
            return Err(ConfigError::Inconsistent(
                "momentum_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_override(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}
