// ABOUTME: Main library entry point for the smart alarm HTTP server
// ABOUTME: Exposes configuration, routing, middleware, and server assembly over the core planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

#![deny(unsafe_code)]

//! # Smart Alarm Server
//!
//! An HTTP service that, given a soft and a hard wake-up bound, picks a
//! random target instant inside the window and returns a synthetic
//! sleep-stage series (light, deep, REM) covering the time from the soft
//! bound to that target, sampled once every two seconds.
//!
//! ## Architecture
//!
//! - **`smart_alarm_core`**: Sampler, generator, planner, and error types
//! - **config**: Environment-driven `ServerConfig`
//! - **validation**: Request parsing and ordering checks
//! - **routes**: `POST /alarm`, `GET /health`, `GET /ready`, `GET /`
//! - **middleware**: Request IDs, tracing, CORS, body limit, timeout
//! - **server**: Shared resources, router assembly, graceful shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use smart_alarm_server::config::ServerConfig;
//! use smart_alarm_server::server::{AlarmServer, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::new(config));
//!     AlarmServer::new(resources).run().await
//! }
//! ```

/// Environment and server configuration
pub mod config;

/// Server-level constants
pub mod constants;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// UTC and IST timestamp rendering
pub mod formatters;

/// Liveness and readiness reporting
pub mod health;

/// Structured logging setup
pub mod logging;

/// HTTP middleware stack
pub mod middleware;

/// Response wire models
pub mod models;

/// HTTP route groups
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Alarm request validation
pub mod validation;
