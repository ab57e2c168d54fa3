//! Headline and review polarity using VADER, boosted with small-business
//! vocabulary that the general-purpose lexicon under-weights.

use super::{bounded_polarity, SentimentExtractor};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Upbeat business phrases and their boost.
const POSITIVE_KEYWORDS: &[(&str, f64)] = &[
    ("beat expectations", 0.8),
    ("beat", 0.4),
    ("beats", 0.4),
    ("record", 0.3),
    ("growth", 0.3),
    ("profit", 0.3),
    ("rose", 0.3),
    ("surge", 0.4),
    ("soars", 0.5),
    ("expands", 0.3),
    ("expansion", 0.3),
    ("grand opening", 0.4),
    ("partnership", 0.2),
    ("award", 0.3),
    ("upgrade", 0.3),
    ("hiring", 0.2),
    ("funding", 0.2),
];

/// Distress phrases and their (negative) boost.
const NEGATIVE_KEYWORDS: &[(&str, f64)] = &[
    ("fell", -0.3),
    ("plunge", -0.5),
    ("crash", -0.5),
    ("layoffs", -0.4),
    ("closure", -0.4),
    ("shuts down", -0.5),
    ("recall", -0.4),
    ("health code", -0.4),
    ("violation", -0.4),
    ("eviction", -0.5),
    ("late payment", -0.4),
    ("debt", -0.2),
    ("downgrade", -0.3),
    ("breach", -0.4),
    ("scam", -0.6),
    ("lien", -0.4),
];

/// Weight of the keyword boost relative to VADER's compound score.
const BOOST_WEIGHT: f64 = 0.5;

/// VADER compound score plus weighted keyword boost, clamped to [-1, 1].
pub struct VaderSentiment {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderSentiment {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn keyword_boost(text: &str) -> f64 {
        let lower = text.to_lowercase();
        POSITIVE_KEYWORDS
            .iter()
            .chain(NEGATIVE_KEYWORDS)
            .filter(|(keyword, _)| lower.contains(keyword))
            .fold(0.0, |boost, (_, score)| boost + score)
    }
}

impl Default for VaderSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentExtractor for VaderSentiment {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        bounded_polarity(compound + Self::keyword_boost(text) * BOOST_WEIGHT)
    }
}
