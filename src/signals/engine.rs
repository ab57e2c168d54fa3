//! Risk evaluation engine.
//!
//! [`RiskEngine::score`] is a pure function of the subject and the engine's
//! configuration. [`RiskEngine::evaluate`] scores and then writes the result
//! back onto the subject.

use crate::config::EngineConfig;
use crate::models::assessment::{EvaluationPath, RiskAssessment};
use crate::models::subject::{Subject, NEUTRAL_GEO_LABEL};
use crate::sentiment::{CriticalTermDetector, VaderSentiment, SentimentExtractor};
use crate::signals::aggregation::TimeSeries;
use crate::signals::decision::apply_gate;
use crate::signals::scan::{scan_signals, SignalScan};
use crate::signals::scoring::{compose, default_rules, ScoreRule};
use std::sync::Arc;
use tracing::info;

pub struct RiskEngine {
    config: EngineConfig,
    extractor: Arc<dyn SentimentExtractor>,
    detector: CriticalTermDetector,
    rules: Vec<ScoreRule>,
}

impl RiskEngine {
    /// Engine with the default VADER extractor and standard rule list.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_extractor(config, Arc::new(VaderSentiment::new()))
    }

    pub fn with_extractor(config: EngineConfig, extractor: Arc<dyn SentimentExtractor>) -> Self {
        let detector = CriticalTermDetector::new(config.lexicons.critical_terms.clone());
        Self {
            config,
            extractor,
            detector,
            rules: default_rules(),
        }
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<ScoreRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a subject without touching it.
    pub fn score(&self, subject: &Subject) -> RiskAssessment {
        if subject.signals.is_empty() {
            return self.neutral(
                EvaluationPath::NoSignals,
                SignalScan::seeded(subject.lawsuit_flag),
            );
        }

        let scan = scan_signals(
            &subject.name,
            &subject.signals,
            self.extractor.as_ref(),
            &self.detector,
            subject.lawsuit_flag,
        );

        let series = TimeSeries::from_scan(&scan);
        let Some(stats) = series.stats(self.config.scoring.momentum_window) else {
            return self.neutral(EvaluationPath::NoDatedSignals, scan);
        };

        let composition = compose(subject, &stats, &self.config, &self.rules);
        let gate = apply_gate(
            composition.score,
            scan.lawsuit_flag,
            composition.reasons,
            &self.config.decision,
        );

        RiskAssessment {
            path: EvaluationPath::Scored,
            polarities: scan.polarities(),
            critical_signals: scan.critical_indices(),
            undated_signals: scan.undated_indices(),
            series_len: stats.len,
            sentiment_score: stats.mean,
            sentiment_momentum: stats.momentum,
            news_volume_volatility: stats.volatility,
            composed_score: composition.score,
            risk_score: gate.risk_score,
            lawsuit_flag: scan.lawsuit_flag,
            hard_stop_applied: gate.hard_stop_applied,
            contagion_penalty: composition.contagion_penalty,
            geo_risk_score: composition.geo_risk_score,
            geo_risk_label: composition.geo_zone.label().to_string(),
            adjustments: composition.adjustments,
            reasons: gate.reasons,
            decision: gate.decision,
        }
    }

    /// Score the subject and write the result back onto it.
    pub fn evaluate(&self, subject: &mut Subject) -> RiskAssessment {
        info!(
            subject = %subject.name,
            signals = subject.signals.len(),
            "Evaluating risk"
        );
        let assessment = self.score(subject);
        assessment.apply_to(subject);
        info!(
            subject = %subject.name,
            risk_score = assessment.risk_score,
            decision = %assessment.decision,
            path = ?assessment.path,
            "Risk evaluation complete"
        );
        assessment
    }

    /// Neutral-score exit. Still passes through the gate so a legal flag
    /// caps the score.
    fn neutral(&self, path: EvaluationPath, scan: SignalScan) -> RiskAssessment {
        let neutral = self.config.scoring.neutral_score;
        let gate = apply_gate(neutral, scan.lawsuit_flag, Vec::new(), &self.config.decision);

        RiskAssessment {
            path,
            polarities: scan.polarities(),
            critical_signals: scan.critical_indices(),
            undated_signals: scan.undated_indices(),
            series_len: 0,
            sentiment_score: 0.0,
            sentiment_momentum: 0.0,
            news_volume_volatility: 0.0,
            composed_score: neutral,
            risk_score: gate.risk_score,
            lawsuit_flag: scan.lawsuit_flag,
            hard_stop_applied: gate.hard_stop_applied,
            contagion_penalty: 0.0,
            geo_risk_score: 0.0,
            geo_risk_label: NEUTRAL_GEO_LABEL.to_string(),
            adjustments: Vec::new(),
            reasons: gate.reasons,
            decision: gate.decision,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
