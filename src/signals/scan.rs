//! Per-signal pass: polarity extraction, critical-term forcing and
//! timestamp parsing, folded into a single accumulator.

use crate::models::subject::Signal;
use crate::sentiment::critical::FORCED_POLARITY;
use crate::sentiment::{bounded_polarity, CriticalTermDetector, SentimentExtractor};
use crate::signals::aggregation::parse_timestamp;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ScannedSignal {
    pub index: usize,
    pub polarity: f64,
    /// `None` when the raw timestamp could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub critical_term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalScan {
    pub signals: Vec<ScannedSignal>,
    pub lawsuit_flag: bool,
}

impl SignalScan {
    /// Start from the subject's existing flag so it stays sticky.
    pub fn seeded(lawsuit_flag: bool) -> Self {
        Self {
            signals: Vec::new(),
            lawsuit_flag,
        }
    }

    fn push(mut self, scanned: ScannedSignal) -> Self {
        self.lawsuit_flag |= scanned.critical_term.is_some();
        self.signals.push(scanned);
        self
    }

    pub fn polarities(&self) -> Vec<f64> {
        self.signals.iter().map(|s| s.polarity).collect()
    }

    pub fn critical_indices(&self) -> Vec<usize> {
        self.signals
            .iter()
            .filter(|s| s.critical_term.is_some())
            .map(|s| s.index)
            .collect()
    }

    pub fn undated_indices(&self) -> Vec<usize> {
        self.signals
            .iter()
            .filter(|s| s.timestamp.is_none())
            .map(|s| s.index)
            .collect()
    }
}

pub fn scan_signals(
    subject_name: &str,
    signals: &[Signal],
    extractor: &dyn SentimentExtractor,
    detector: &CriticalTermDetector,
    prior_lawsuit_flag: bool,
) -> SignalScan {
    signals
        .iter()
        .enumerate()
        .fold(SignalScan::seeded(prior_lawsuit_flag), |scan, (index, signal)| {
            scan.push(scan_one(subject_name, index, signal, extractor, detector))
        })
}

fn scan_one(
    subject_name: &str,
    index: usize,
    signal: &Signal,
    extractor: &dyn SentimentExtractor,
    detector: &CriticalTermDetector,
) -> ScannedSignal {
    let critical_term = detector.detect(&signal.text).map(str::to_string);
    let polarity = match &critical_term {
        Some(term) => {
            warn!(
                subject = %subject_name,
                signal_index = index,
                term = %term,
                "Critical term detected in signal"
            );
            FORCED_POLARITY
        }
        None => bounded_polarity(extractor.polarity(&signal.text)),
    };

    let timestamp = parse_timestamp(&signal.timestamp);
    if timestamp.is_none() {
        debug!(
            subject = %subject_name,
            signal_index = index,
            raw = %signal.timestamp,
            "Unparseable timestamp, excluding signal from series"
        );
    }

    ScannedSignal {
        index,
        polarity,
        timestamp,
        critical_term,
    }
}
