//! AltScore risk evaluation engine.
//!
//! Turns unstructured public signals about a small business into a bounded
//! risk score, a categorical decision and a list of human-readable reasons.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod sentiment;
pub mod services;
pub mod signals;
