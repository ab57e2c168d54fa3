//! Chronological polarity series and its second-order statistics.

use crate::common::math;
use crate::signals::scan::SignalScan;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse the timestamp formats acquisition feeds produce: RFC 3339, RFC 2822
/// (RSS `pubDate`), and common naive date/time layouts, which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub index: usize,
    pub at: DateTime<Utc>,
    pub polarity: f64,
}

/// Date-ascending series of dated observations. Ties keep insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub len: usize,
    pub mean: f64,
    pub momentum: f64,
    pub volatility: f64,
}

impl TimeSeries {
    pub fn from_scan(scan: &SignalScan) -> Self {
        let mut observations: Vec<Observation> = scan
            .signals
            .iter()
            .filter_map(|s| {
                s.timestamp.map(|at| Observation {
                    index: s.index,
                    at,
                    polarity: s.polarity,
                })
            })
            .collect();
        observations.sort_by_key(|o| o.at);
        Self { observations }
    }

    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.at);
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.polarity).collect()
    }

    /// Mean of the last `window` observations minus the mean of everything
    /// before them. With exactly `window` observations the historical mean is
    /// taken as 0.0; with fewer, there is no trend and the result is 0.0.
    pub fn momentum(&self, window: usize) -> f64 {
        let values = self.values();
        if window == 0 || values.len() < window {
            return 0.0;
        }
        let split = values.len() - window;
        let recent = math::mean(&values[split..]).unwrap_or(0.0);
        let historical = math::mean(&values[..split]).unwrap_or(0.0);
        math::finite_or(recent - historical, 0.0)
    }

    /// Sample standard deviation of the series; 0.0 when undefined.
    pub fn volatility(&self) -> f64 {
        math::sample_std_dev(&self.values())
            .map(|v| math::finite_or(v, 0.0))
            .unwrap_or(0.0)
    }

    /// `None` for an empty series.
    pub fn stats(&self, momentum_window: usize) -> Option<SeriesStats> {
        let mean = math::mean(&self.values())?;
        Some(SeriesStats {
            len: self.len(),
            mean: math::finite_or(mean, 0.0),
            momentum: self.momentum(momentum_window),
            volatility: self.volatility(),
        })
    }
}
