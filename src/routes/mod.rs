// ABOUTME: Route module organization for the smart alarm HTTP endpoints
// ABOUTME: Groups route definitions by domain and provides the not-found fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Route module for the smart alarm server
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to validation, the planner, and the health checker.

/// Alarm planning routes
pub mod alarm;
/// Health check and readiness routes
pub mod health;
/// API description route
pub mod root;

pub use alarm::AlarmRoutes;
pub use health::HealthRoutes;
pub use root::ApiInfoRoutes;

use crate::errors::AppError;
use axum::http::{Method, Uri};

/// Answer unknown routes with a `RESOURCE_NOT_FOUND` error body
pub async fn fallback_handler(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("Route {method} {}", uri.path()))
}
