//! Text polarity extraction and critical-term detection.
//!
//! The engine treats extraction as a black box behind [`SentimentExtractor`].
//! [`VaderSentiment`] is the default; closures work too, which keeps tests
//! deterministic.

pub mod critical;
pub mod vader;

pub use critical::CriticalTermDetector;
pub use vader::VaderSentiment;

/// Maps a unit of text to a polarity in [-1.0, 1.0].
pub trait SentimentExtractor: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> SentimentExtractor for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Returns the same polarity for every text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPolarity(pub f64);

impl SentimentExtractor for FixedPolarity {
    fn polarity(&self, _text: &str) -> f64 {
        self.0
    }
}

/// Clamp an extractor's output into [-1, 1], mapping NaN to neutral.
pub fn bounded_polarity(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(-1.0, 1.0)
    }
}
