// ABOUTME: HTTP middleware stack for the alarm API
// ABOUTME: Assembles request IDs, tracing, CORS, body limits, and timeouts around the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! HTTP middleware
//!
//! Layer order, outermost first: request ID assignment, request ID
//! propagation, tracing, CORS, timeout, body limit.

/// CORS configuration
pub mod cors;
/// Request ID generation and request spans
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_request_span, new_request_id, record_response, PrefixedRequestId};

use crate::config::ServerConfig;
use crate::constants::headers;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::HeaderName;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Wrap `router` in the standard middleware stack
pub fn apply_http_layers(router: Router, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static(headers::REQUEST_ID);

    router
        .layer(DefaultBodyLimit::max(config.http.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    PrefixedRequestId,
                ))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(create_request_span)
                        .on_response(record_response),
                )
                .layer(setup_cors(&config.cors))
                .layer(TimeoutLayer::new(config.http.request_timeout())),
        )
}
