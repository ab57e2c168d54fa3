//! Executive summary of an evaluated subject.

use crate::models::assessment::{Decision, RiskAssessment};
use crate::models::subject::{RelatedEntity, Subject, UNKNOWN};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const UNVERIFIED: &str = "Unverified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Strictly positive mean polarity reads as positive; anything else,
    /// including a flat zero, reads as negative.
    pub fn from_score(sentiment_score: f64) -> Self {
        if sentiment_score > 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

/// One row of the market-intelligence table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    pub date: String,
    pub source: String,
    pub headline: String,
    pub sentiment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub name: String,
    pub headquarters: String,
    pub industry: String,
    pub business_age: u32,
    pub risk_score: f64,
    pub decision: Decision,
    pub sentiment_label: SentimentLabel,
    pub sentiment_momentum: f64,
    pub news_volume_volatility: f64,
    pub geo_risk_label: String,
    /// `None` when financials were never verified.
    pub verified_cash: Option<f64>,
    pub contagion_penalty: f64,
    pub key_person: String,
    pub risk_factors: Vec<String>,
    /// Signals in input order with their evaluated polarity.
    pub signals: Vec<SignalRow>,
    pub related_entities: Vec<RelatedEntity>,
    pub generated_at: DateTime<Utc>,
}

impl RiskReport {
    /// Build from a subject that has already been evaluated.
    pub fn new(subject: &Subject, assessment: &RiskAssessment) -> Self {
        Self::at(subject, assessment, Utc::now())
    }

    pub fn at(subject: &Subject, assessment: &RiskAssessment, generated_at: DateTime<Utc>) -> Self {
        let key_person = subject
            .key_people
            .first()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            name: subject.name.clone(),
            headquarters: subject.headquarters.clone(),
            industry: subject.industry.clone(),
            business_age: subject.business_age,
            risk_score: subject.risk_score,
            decision: assessment.decision,
            sentiment_label: SentimentLabel::from_score(subject.sentiment_score),
            sentiment_momentum: subject.sentiment_momentum,
            news_volume_volatility: subject.news_volume_volatility,
            geo_risk_label: subject.geo_risk_label.clone(),
            verified_cash: subject
                .has_verified_financials
                .then_some(subject.cash_balance),
            contagion_penalty: subject.contagion_penalty,
            key_person,
            risk_factors: subject.decision_reasons.clone(),
            signals: subject
                .signals
                .iter()
                .map(|s| SignalRow {
                    date: s.timestamp.clone(),
                    source: s.source.clone(),
                    headline: s.text.clone(),
                    sentiment: s.polarity,
                })
                .collect(),
            related_entities: subject.related_entities.clone(),
            generated_at,
        }
    }

    fn cash_display(&self) -> String {
        match self.verified_cash {
            Some(cash) => format!("${:.2}", cash),
            None => UNVERIFIED.to_string(),
        }
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Risk report: {}", self.name)?;
        writeln!(f, "  Headquarters:   {}", self.headquarters)?;
        writeln!(f, "  Industry:       {}", self.industry)?;
        writeln!(f, "  Business age:   {} years", self.business_age)?;
        writeln!(f, "  Risk score:     {:.2}", self.risk_score)?;
        writeln!(f, "  Decision:       {}", self.decision)?;
        writeln!(f, "  Sentiment:      {}", self.sentiment_label)?;
        writeln!(f, "  Momentum:       {:.2}", self.sentiment_momentum)?;
        writeln!(f, "  Volatility:     {:.2}", self.news_volume_volatility)?;
        writeln!(f, "  Geo zone:       {}", self.geo_risk_label)?;
        writeln!(f, "  Verified cash:  {}", self.cash_display())?;
        writeln!(f, "  Contagion:      -{:.0}", self.contagion_penalty)?;
        writeln!(f, "  Key person:     {}", self.key_person)?;
        if self.risk_factors.is_empty() {
            writeln!(f, "  Risk factors:   none")?;
        } else {
            writeln!(f, "  Risk factors:")?;
            for factor in &self.risk_factors {
                writeln!(f, "    - {}", factor)?;
            }
        }
        if !self.signals.is_empty() {
            writeln!(f, "  Market intel:")?;
            for row in &self.signals {
                writeln!(
                    f,
                    "    {} | {} | {:+.2} | {}",
                    row.date, row.source, row.sentiment, row.headline
                )?;
            }
        }
        if !self.related_entities.is_empty() {
            writeln!(f, "  Related entities:")?;
            for entity in &self.related_entities {
                writeln!(
                    f,
                    "    {} ({}) score {:.0}",
                    entity.name, entity.relation, entity.risk_score
                )?;
            }
        }
        write!(f, "  Generated at:   {}", self.generated_at.to_rfc3339())
    }
}
