//! Prometheus metrics for the HTTP surface and the evaluation engine.

use crate::models::assessment::RiskAssessment;
use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
    pub risk_evaluations_total: IntCounterVec,
    pub risk_hard_stops_total: IntCounter,
}

impl Metrics {
    /// Build a fresh registry. Each instance owns its own registry so tests
    /// and multiple servers in one process never collide.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = Gauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let risk_evaluations_total = IntCounterVec::new(
            Opts::new("risk_evaluations_total", "Risk evaluations by decision"),
            &["decision"],
        )?;
        let risk_hard_stops_total = IntCounter::new(
            "risk_hard_stops_total",
            "Evaluations capped by the legal hard stop",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(risk_evaluations_total.clone()))?;
        registry.register(Box::new(risk_hard_stops_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            risk_evaluations_total,
            risk_hard_stops_total,
        })
    }

    pub fn record_evaluation(&self, assessment: &RiskAssessment) {
        self.risk_evaluations_total
            .with_label_values(&[assessment.decision.as_str()])
            .inc();
        if assessment.hard_stop_applied {
            self.risk_hard_stops_total.inc();
        }
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
