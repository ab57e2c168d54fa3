//! The subject under evaluation and the records collaborators attach to it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const NEUTRAL_GEO_LABEL: &str = "Neutral Zone";
pub const UNKNOWN: &str = "Unknown";

/// One time-stamped text observation about a subject.
///
/// `polarity` is whatever the acquisition layer put there until an evaluation
/// overwrites it with the freshly extracted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub source: String,
    pub text: String,
    #[serde(default, alias = "rating")]
    pub polarity: f64,
    #[serde(alias = "date")]
    pub timestamp: String,
}

impl Signal {
    pub fn new(source: impl Into<String>, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            polarity: 0.0,
            timestamp: timestamp.into(),
        }
    }
}

/// A sister or owned entity carrying its own previously computed risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntity {
    pub name: String,
    pub risk_score: f64,
    #[serde(default)]
    pub relation: String,
}

/// Ownership/governance record. Reporting only; never scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPerson {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default = "unknown")]
    pub headquarters: String,
    #[serde(default = "unknown")]
    pub industry: String,
    /// Zero when unknown.
    #[serde(default)]
    pub founding_year: i32,
    /// Years of operating history. Zero when unknown, which disables age rules.
    #[serde(default)]
    pub business_age: u32,

    #[serde(default)]
    pub signals: Vec<Signal>,

    #[serde(default)]
    pub has_verified_financials: bool,
    #[serde(default)]
    pub cash_balance: f64,

    #[serde(default)]
    pub related_entities: Vec<RelatedEntity>,
    #[serde(default)]
    pub key_people: Vec<KeyPerson>,

    // Computed by the engine.
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub sentiment_momentum: f64,
    #[serde(default)]
    pub news_volume_volatility: f64,
    /// Sticky: once set by any evaluation it stays set for this subject.
    #[serde(default)]
    pub lawsuit_flag: bool,
    #[serde(default)]
    pub contagion_penalty: f64,
    #[serde(default)]
    pub geo_risk_score: f64,
    #[serde(default = "neutral_geo_label")]
    pub geo_risk_label: String,
    #[serde(default)]
    pub decision_reasons: Vec<String>,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn neutral_geo_label() -> String {
    NEUTRAL_GEO_LABEL.to_string()
}

fn age_since(founding_year: i32, as_of_year: i32) -> u32 {
    if founding_year > 0 {
        u32::try_from(as_of_year - founding_year).unwrap_or(0)
    } else {
        0
    }
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headquarters: unknown(),
            industry: unknown(),
            founding_year: 0,
            business_age: 0,
            signals: Vec::new(),
            has_verified_financials: false,
            cash_balance: 0.0,
            related_entities: Vec::new(),
            key_people: Vec::new(),
            sentiment_score: 0.0,
            risk_score: 0.0,
            sentiment_momentum: 0.0,
            news_volume_volatility: 0.0,
            lawsuit_flag: false,
            contagion_penalty: 0.0,
            geo_risk_score: 0.0,
            geo_risk_label: neutral_geo_label(),
            decision_reasons: Vec::new(),
        }
    }

    pub fn with_headquarters(mut self, headquarters: impl Into<String>) -> Self {
        self.headquarters = headquarters.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_business_age(mut self, years: u32) -> Self {
        self.business_age = years;
        self
    }

    /// Set the founding year and derive the age relative to `as_of_year`.
    ///
    /// A non-positive year is treated as unknown and leaves the age at zero.
    /// Years after `as_of_year` also yield zero.
    pub fn with_founding_year(mut self, year: i32, as_of_year: i32) -> Self {
        self.founding_year = year;
        self.business_age = age_since(year, as_of_year);
        self
    }

    /// Fill in `business_age` from `founding_year` when only the year is
    /// known. An explicit non-zero age is left alone.
    pub fn derive_age(&mut self, as_of_year: i32) {
        if self.business_age == 0 {
            self.business_age = age_since(self.founding_year, as_of_year);
        }
    }

    pub fn add_signal(
        &mut self,
        source: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) {
        self.signals.push(Signal::new(source, text, timestamp));
    }

    /// Record a verified cash balance supplied by a financial verifier.
    pub fn verify_financials(&mut self, cash_balance: f64) {
        self.cash_balance = cash_balance;
        self.has_verified_financials = true;
    }

    pub fn add_related_entity(
        &mut self,
        name: impl Into<String>,
        risk_score: f64,
        relation: impl Into<String>,
    ) {
        self.related_entities.push(RelatedEntity {
            name: name.into(),
            risk_score,
            relation: relation.into(),
        });
    }

    pub fn add_key_person(&mut self, name: impl Into<String>, role: impl Into<String>) {
        self.key_people.push(KeyPerson {
            name: name.into(),
            role: role.into(),
        });
    }

    /// Boundary checks for subjects arriving from outside the process.
    ///
    /// The engine tolerates anything; this exists so API callers get an
    /// explicit rejection instead of a silently skewed score.
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.cash_balance.is_finite() {
            return Err(ValidationError::NonFiniteCash(self.cash_balance));
        }
        if self.founding_year > current_year {
            return Err(ValidationError::FoundingYearInFuture {
                year: self.founding_year,
                current_year,
            });
        }
        for entity in &self.related_entities {
            if !(0.0..=100.0).contains(&entity.risk_score) {
                return Err(ValidationError::RelatedScoreOutOfRange {
                    name: entity.name.clone(),
                    score: entity.risk_score,
                });
            }
        }
        Ok(())
    }
}
