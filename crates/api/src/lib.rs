//! HTTP API: anomaly prediction endpoint and its runtime configuration.

pub mod app;
pub mod config;
