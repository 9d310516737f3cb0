// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints for load balancers and orchestrators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Health check routes for service monitoring
//!
//! `/health` is a cheap liveness probe; `/ready` runs a generator self-test
//! and answers 503 when it fails.

use crate::constants::endpoints;
use crate::health::HealthStatus;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::HEALTH, get(Self::handle_health))
            .route(endpoints::READY, get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        (StatusCode::OK, Json(resources.health.basic_health())).into_response()
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        let readiness = resources.health.readiness();
        let status = match readiness.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(readiness)).into_response()
    }
}
