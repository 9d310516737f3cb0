// ABOUTME: API description route listing the service's endpoints
// ABOUTME: Serves a static catalogue with the alarm request example and stage-code legend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

use crate::constants::{endpoints, service_names};
use crate::models::{stage_labels, ApiDescription, EndpointInfo};
use crate::validation::example_request;
use axum::{routing::get, Json, Router};

/// API description routes
pub struct ApiInfoRoutes;

impl ApiInfoRoutes {
    /// Create the `GET /` route
    pub fn routes() -> Router {
        Router::new().route(endpoints::ROOT, get(Self::handle_describe))
    }

    async fn handle_describe() -> Json<ApiDescription> {
        Json(api_description())
    }
}

/// The static endpoint catalogue
#[must_use]
pub fn api_description() -> ApiDescription {
    let endpoint = |method: &str, path: &str, description: &str| EndpointInfo {
        method: method.to_owned(),
        path: path.to_owned(),
        description: description.to_owned(),
        example: None,
    };

    ApiDescription {
        service: service_names::SMART_ALARM_SERVER.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        description: "Picks a random wake-up time inside a window and synthesizes \
                      the sleep stages leading up to it"
            .to_owned(),
        endpoints: vec![
            endpoint("GET", endpoints::ROOT, "This API description"),
            endpoint(
                "GET",
                endpoints::HEALTH,
                "Liveness probe with uptime and the current time in UTC and IST",
            ),
            endpoint(
                "GET",
                endpoints::READY,
                "Readiness probe running a sleep-pattern generator self-test",
            ),
            EndpointInfo {
                example: Some(example_request()),
                ..endpoint(
                    "POST",
                    endpoints::ALARM,
                    "Plan a wake target between 'soft' and 'hard' with a sleep-stage series \
                     sampled every two seconds",
                )
            },
        ],
        stage_labels: stage_labels(),
    }
}
