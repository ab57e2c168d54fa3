//! Score composition: a sentiment baseline plus an ordered list of
//! declarative rule adjustments.
//!
//! Every rule is additive, so order only affects the order of reasons. Rules
//! read their thresholds and deltas from [`ScoringConfig`]; the list itself is
//! plain data and each entry can be tested on its own.

use crate::config::{EngineConfig, LexiconConfig, ScoringConfig};
use crate::models::assessment::Adjustment;
use crate::models::subject::{RelatedEntity, Subject};
use crate::signals::aggregation::SeriesStats;
use tracing::debug;

pub const MOMENTUM_RULE: &str = "negative_momentum";
pub const VOLATILITY_RULE: &str = "high_volatility";
pub const EARLY_STAGE_RULE: &str = "early_stage";
pub const ESTABLISHED_RULE: &str = "established_business";
pub const INDUSTRY_RULE: &str = "high_risk_industry";
pub const HEALTHY_CASH_RULE: &str = "healthy_cash";
pub const CRITICAL_CASH_RULE: &str = "critical_cash";
pub const CONTAGION_RULE: &str = "contagion";
pub const GEO_COST_RULE: &str = "geo_high_cost";
pub const GEO_CLIMATE_RULE: &str = "geo_climate";

pub const FALLBACK_REASON: &str = "Overall negative market sentiment.";

/// Headquarters classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoZone {
    HighOperationalCost,
    ClimateInsurance,
    Neutral,
}

impl GeoZone {
    /// High-cost zones take precedence over climate zones.
    pub fn classify(headquarters: &str, lexicons: &LexiconConfig) -> Self {
        if lexicons.high_cost_zones.matches(headquarters) {
            GeoZone::HighOperationalCost
        } else if lexicons.climate_zones.matches(headquarters) {
            GeoZone::ClimateInsurance
        } else {
            GeoZone::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeoZone::HighOperationalCost => "High Operational Cost Zone",
            GeoZone::ClimateInsurance => "Climate/Insurance Risk Zone",
            GeoZone::Neutral => crate::models::subject::NEUTRAL_GEO_LABEL,
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub subject: &'a Subject,
    pub stats: &'a SeriesStats,
    pub geo_zone: GeoZone,
    pub config: &'a EngineConfig,
}

impl RuleContext<'_> {
    fn scoring(&self) -> &ScoringConfig {
        &self.config.scoring
    }
}

pub type Predicate = fn(&RuleContext<'_>) -> bool;
pub type EntityPredicate = fn(&RelatedEntity, &RuleContext<'_>) -> bool;
pub type Delta = fn(&ScoringConfig) -> f64;
pub type ReasonTemplate = fn(&RuleContext<'_>) -> Option<String>;
pub type EntityReasonTemplate = fn(&RelatedEntity) -> String;

#[derive(Clone, Copy)]
pub enum RuleScope {
    /// Fires at most once for the subject.
    Subject {
        predicate: Predicate,
        reason: ReasonTemplate,
    },
    /// Fires once per qualifying related entity.
    EachRelatedEntity {
        predicate: EntityPredicate,
        reason: EntityReasonTemplate,
    },
}

#[derive(Clone, Copy)]
pub struct ScoreRule {
    pub id: &'static str,
    pub delta: Delta,
    pub scope: RuleScope,
}

impl ScoreRule {
    pub fn apply(&self, ctx: &RuleContext<'_>) -> Vec<Adjustment> {
        let delta = (self.delta)(ctx.scoring());
        match self.scope {
            RuleScope::Subject { predicate, reason } => {
                if !predicate(ctx) {
                    return Vec::new();
                }
                vec![Adjustment {
                    rule: self.id,
                    delta,
                    reason: reason(ctx),
                }]
            }
            RuleScope::EachRelatedEntity { predicate, reason } => ctx
                .subject
                .related_entities
                .iter()
                .filter(|entity| predicate(entity, ctx))
                .map(|entity| Adjustment {
                    rule: self.id,
                    delta,
                    reason: Some(reason(entity)),
                })
                .collect(),
        }
    }
}

impl std::fmt::Debug for ScoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreRule").field("id", &self.id).finish()
    }
}

/// The standard rule list, in evaluation order.
pub fn default_rules() -> Vec<ScoreRule> {
    vec![
        ScoreRule {
            id: MOMENTUM_RULE,
            delta: |c| -c.momentum_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| ctx.stats.momentum < ctx.scoring().momentum_threshold,
                reason: |ctx| {
                    Some(format!(
                        "Negative market sentiment trend detected (momentum {:.2}).",
                        ctx.stats.momentum
                    ))
                },
            },
        },
        ScoreRule {
            id: VOLATILITY_RULE,
            delta: |c| -c.volatility_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| ctx.stats.volatility > ctx.scoring().volatility_threshold,
                reason: |_| Some("High volatility in market news signals instability.".to_string()),
            },
        },
        ScoreRule {
            id: EARLY_STAGE_RULE,
            delta: |c| -c.startup_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| {
                    let age = ctx.subject.business_age;
                    age > 0 && age < ctx.scoring().startup_max_age
                },
                reason: |ctx| {
                    Some(format!(
                        "High Risk: Early-stage startup (< {} years operating history).",
                        ctx.scoring().startup_max_age
                    ))
                },
            },
        },
        ScoreRule {
            id: ESTABLISHED_RULE,
            delta: |c| c.established_bonus,
            scope: RuleScope::Subject {
                predicate: |ctx| ctx.subject.business_age > ctx.scoring().established_min_age,
                reason: |_| None,
            },
        },
        ScoreRule {
            id: INDUSTRY_RULE,
            delta: |c| -c.industry_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| {
                    ctx.config
                        .lexicons
                        .high_risk_industries
                        .matches(&ctx.subject.industry)
                },
                reason: |ctx| {
                    Some(format!(
                        "High-risk industry sector identified: {}.",
                        ctx.subject.industry
                    ))
                },
            },
        },
        ScoreRule {
            id: HEALTHY_CASH_RULE,
            delta: |c| c.healthy_cash_bonus,
            scope: RuleScope::Subject {
                predicate: |ctx| {
                    ctx.subject.has_verified_financials
                        && ctx.subject.cash_balance > ctx.scoring().healthy_cash
                },
                reason: |_| None,
            },
        },
        ScoreRule {
            id: CRITICAL_CASH_RULE,
            delta: |c| -c.critical_cash_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| {
                    ctx.subject.has_verified_financials
                        && ctx.subject.cash_balance < ctx.scoring().critical_cash
                },
                reason: |ctx| {
                    Some(format!(
                        "CRITICAL: Insufficient cash reserves verified (< {}).",
                        format_dollars(ctx.scoring().critical_cash)
                    ))
                },
            },
        },
        ScoreRule {
            id: CONTAGION_RULE,
            delta: |c| -c.contagion_penalty,
            scope: RuleScope::EachRelatedEntity {
                predicate: |entity, ctx| entity.risk_score < ctx.scoring().distressed_entity_score,
                reason: |entity| {
                    format!(
                        "Contagion Risk: Sister company '{}' is distressed.",
                        entity.name
                    )
                },
            },
        },
        ScoreRule {
            id: GEO_COST_RULE,
            delta: |c| -c.geo_cost_penalty,
            scope: RuleScope::Subject {
                predicate: |ctx| {
                    ctx.geo_zone == GeoZone::HighOperationalCost
                        && ctx.subject.business_age < ctx.scoring().geo_early_stage_age
                },
                reason: |ctx| {
                    Some(format!(
                        "Geo-Risk: High burn-rate location ({}) for early-stage co.",
                        ctx.subject.headquarters
                    ))
                },
            },
        },
        ScoreRule {
            id: GEO_CLIMATE_RULE,
            delta: |_| 0.0,
            scope: RuleScope::Subject {
                predicate: |ctx| ctx.geo_zone == GeoZone::ClimateInsurance,
                reason: |ctx| {
                    Some(format!(
                        "Geo-Risk: Location flags high insurance premiums ({}).",
                        ctx.subject.headquarters
                    ))
                },
            },
        },
    ]
}

/// Output of the composer, before the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub baseline: f64,
    /// Baseline plus all deltas. Not clamped.
    pub score: f64,
    pub adjustments: Vec<Adjustment>,
    pub reasons: Vec<String>,
    pub contagion_penalty: f64,
    pub geo_zone: GeoZone,
    pub geo_risk_score: f64,
}

pub fn baseline(mean_polarity: f64, scoring: &ScoringConfig) -> f64 {
    scoring.neutral_score + mean_polarity * scoring.sentiment_scale
}

pub fn compose(
    subject: &Subject,
    stats: &SeriesStats,
    config: &EngineConfig,
    rules: &[ScoreRule],
) -> Composition {
    let geo_zone = GeoZone::classify(&subject.headquarters, &config.lexicons);
    let ctx = RuleContext {
        subject,
        stats,
        geo_zone,
        config,
    };

    let base = baseline(stats.mean, &config.scoring);
    let adjustments: Vec<Adjustment> = rules.iter().flat_map(|rule| rule.apply(&ctx)).collect();
    for adj in &adjustments {
        debug!(subject = %subject.name, rule = adj.rule, delta = adj.delta, "Rule adjustment");
    }

    let score = base + adjustments.iter().map(|a| a.delta).sum::<f64>();
    let penalty_for = |ids: &[&str]| -> f64 {
        adjustments
            .iter()
            .filter(|a| ids.contains(&a.rule))
            .fold(0.0, |acc, a| acc - a.delta)
    };
    let contagion_penalty = penalty_for(&[CONTAGION_RULE]);
    let geo_risk_score = penalty_for(&[GEO_COST_RULE, GEO_CLIMATE_RULE]);

    let mut reasons: Vec<String> = adjustments.iter().filter_map(|a| a.reason.clone()).collect();
    if score < config.scoring.neutral_score && reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    Composition {
        baseline: base,
        score,
        adjustments,
        reasons,
        contagion_penalty,
        geo_zone,
        geo_risk_score,
    }
}

/// `$1,000`-style rendering for whole-dollar amounts.
fn format_dollars(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount.round() < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
