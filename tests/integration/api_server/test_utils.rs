//! Test utilities for API server integration tests

use altscore::config::EngineConfig;
use altscore::core::http::{create_router, AppState, HealthStatus};
use altscore::metrics::Metrics;
use altscore::sentiment::FixedPolarity;
use altscore::signals::RiskEngine;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    /// Server backed by the default lexicon extractor.
    pub async fn new() -> Self {
        Self::with_engine(RiskEngine::default())
    }

    /// Server whose extractor returns `polarity` for every signal.
    pub async fn with_polarity(polarity: f64) -> Self {
        Self::with_engine(RiskEngine::with_extractor(
            EngineConfig::default(),
            Arc::new(FixedPolarity(polarity)),
        ))
    }

    fn with_engine(engine: RiskEngine) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            engine: Arc::new(engine),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
