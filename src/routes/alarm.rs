// ABOUTME: Alarm planning route handler
// ABOUTME: Validates the wake window, plans a target and sleep series, and renders the JSON response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Alarm routes
//!
//! `POST /alarm` takes `{ "soft": <date>, "hard": <date> }` and answers with
//! a random wake target inside the window plus a synthetic sleep-stage series
//! covering the time from `soft` to that target.

use crate::constants::endpoints;
use crate::errors::AppError;
use crate::models::AlarmResponse;
use crate::server::ServerResources;
use crate::validation::{reject_body, AlarmRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

/// Alarm planning routes
pub struct AlarmRoutes;

impl AlarmRoutes {
    /// Create all alarm routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::ALARM, post(Self::handle_plan_alarm))
            .with_state(resources)
    }

    /// Handle alarm planning
    async fn handle_plan_alarm(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<AlarmRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload.map_err(|rejection| reject_body(&rejection))?;
        let interval = request.into_interval()?;

        // Generation is O(n) in the window length; keep it off the async workers
        let planner = Arc::clone(&resources);
        let plan = tokio::task::spawn_blocking(move || planner.plan_alarm(interval))
            .await
            .map_err(|e| AppError::internal("Alarm planning task failed").with_source(e))??;

        let response = AlarmResponse::from(&plan);
        info!(
            soft = %response.metadata.soft_limit.utc,
            hard = %response.metadata.hard_limit.utc,
            target = %response.target.utc,
            elapsed_seconds = response.metadata.elapsed_seconds,
            array_size = response.metadata.array_size,
            light = response.metadata.stage_counts.light,
            deep = response.metadata.stage_counts.deep,
            rem = response.metadata.stage_counts.rem,
            "Alarm planned"
        );

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
