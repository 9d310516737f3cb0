// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Builds routers over fresh server resources and exposes the Axum request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;

use axum::Router;
use smart_alarm_server::config::ServerConfig;
use smart_alarm_server::server::{build_router, ServerResources};
use std::sync::Arc;

/// Router over default configuration with entropy-backed planning
#[allow(dead_code)]
pub fn test_app() -> Router {
    app_with_config(ServerConfig::default())
}

/// Router whose planner replays the stream of `seed`
#[allow(dead_code)]
pub fn seeded_app(seed: u64) -> Router {
    let mut config = ServerConfig::default();
    config.random.seed = Some(seed);
    app_with_config(config)
}

/// Router over an explicit configuration
pub fn app_with_config(config: ServerConfig) -> Router {
    build_router(Arc::new(ServerResources::new(config)))
}
