//! Severe legal/compliance term detection.

use crate::config::Lexicon;

pub const FORCED_POLARITY: f64 = -1.0;

#[derive(Debug, Clone)]
pub struct CriticalTermDetector {
    lexicon: Lexicon,
}

impl CriticalTermDetector {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// The first critical term found in `text`, if any.
    pub fn detect<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.lexicon.find(text)
    }
}
