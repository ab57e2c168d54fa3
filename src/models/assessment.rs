//! Immutable evaluation results and the categorical decision.

use crate::config::DecisionConfig;
use crate::models::subject::Subject;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    ManualReview,
    Reject,
}

impl Decision {
    /// Map a gated score onto a decision. A legal flag always rejects.
    pub fn from_score(risk_score: f64, lawsuit_flag: bool, config: &DecisionConfig) -> Self {
        if lawsuit_flag {
            Decision::Reject
        } else if risk_score >= config.approve_threshold {
            Decision::Approve
        } else if risk_score >= config.review_threshold {
            Decision::ManualReview
        } else {
            Decision::Reject
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::ManualReview => "MANUAL_REVIEW",
            Decision::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule contribution to the composed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub rule: &'static str,
    pub delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Which branch of the evaluation produced the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPath {
    /// The subject had no signals at all.
    NoSignals,
    /// Signals existed but none carried a parseable timestamp.
    NoDatedSignals,
    Scored,
}

/// Result of scoring a subject.
///
/// Per-signal values are indexed by the signal's position in
/// `Subject::signals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub path: EvaluationPath,
    /// Effective polarity per signal, after critical-term forcing.
    pub polarities: Vec<f64>,
    /// Indices of signals that contained a critical term.
    pub critical_signals: Vec<usize>,
    /// Indices of signals left out of the series for bad timestamps.
    pub undated_signals: Vec<usize>,
    pub series_len: usize,
    pub sentiment_score: f64,
    pub sentiment_momentum: f64,
    pub news_volume_volatility: f64,
    /// Baseline plus adjustments, before clamping and the hard stop.
    pub composed_score: f64,
    pub risk_score: f64,
    pub lawsuit_flag: bool,
    pub hard_stop_applied: bool,
    pub contagion_penalty: f64,
    pub geo_risk_score: f64,
    pub geo_risk_label: String,
    pub adjustments: Vec<Adjustment>,
    pub reasons: Vec<String>,
    pub decision: Decision,
}

impl RiskAssessment {
    /// Write the results back onto the subject.
    ///
    /// Overwrites each signal's polarity, replaces every computed field and
    /// rebuilds `decision_reasons`. The lawsuit flag is only ever raised here,
    /// never cleared.
    pub fn apply_to(&self, subject: &mut Subject) {
        for (signal, polarity) in subject.signals.iter_mut().zip(&self.polarities) {
            signal.polarity = *polarity;
        }
        subject.sentiment_score = self.sentiment_score;
        subject.sentiment_momentum = self.sentiment_momentum;
        subject.news_volume_volatility = self.news_volume_volatility;
        subject.risk_score = self.risk_score;
        subject.lawsuit_flag = subject.lawsuit_flag || self.lawsuit_flag;
        subject.contagion_penalty = self.contagion_penalty;
        subject.geo_risk_score = self.geo_risk_score;
        subject.geo_risk_label = self.geo_risk_label.clone();
        subject.decision_reasons = self.reasons.clone();
    }
}
