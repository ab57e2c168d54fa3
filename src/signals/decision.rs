//! Decision gate: clamp, hard-stop ceiling and categorical decision.

use crate::common::math;
use crate::config::DecisionConfig;
use crate::models::assessment::Decision;
use tracing::warn;

pub const HARD_STOP_REASON: &str =
    "HARD STOP: Active legal/regulatory risk detected in background check.";

pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub risk_score: f64,
    pub reasons: Vec<String>,
    pub hard_stop_applied: bool,
    pub decision: Decision,
}

/// Clamp `composed` into [0, 100]; when the legal flag is set, cap at the
/// hard-stop ceiling and put the hard-stop reason first.
pub fn apply_gate(
    composed: f64,
    lawsuit_flag: bool,
    mut reasons: Vec<String>,
    config: &DecisionConfig,
) -> GateOutcome {
    let mut risk_score = math::finite_or(composed, SCORE_FLOOR).clamp(SCORE_FLOOR, SCORE_CEILING);

    if lawsuit_flag {
        warn!(
            composed_score = composed,
            ceiling = config.hard_stop_ceiling,
            "Hard stop triggered, capping score"
        );
        risk_score = risk_score.min(config.hard_stop_ceiling);
        reasons.insert(0, HARD_STOP_REASON.to_string());
    }

    let risk_score = math::round2(risk_score);
    GateOutcome {
        risk_score,
        decision: Decision::from_score(risk_score, lawsuit_flag, config),
        reasons,
        hard_stop_applied: lawsuit_flag,
    }
}
