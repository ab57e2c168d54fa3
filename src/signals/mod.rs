//! Risk evaluation pipeline: scan, aggregate, compose, gate.

pub mod aggregation;
pub mod decision;
pub mod engine;
pub mod scan;
pub mod scoring;

pub use aggregation::{parse_timestamp, Observation, SeriesStats, TimeSeries};
pub use decision::{apply_gate, GateOutcome, HARD_STOP_REASON};
pub use engine::RiskEngine;
pub use scan::{scan_signals, ScannedSignal, SignalScan};
pub use scoring::{compose, default_rules, Composition, GeoZone, RuleContext, ScoreRule};
