// ABOUTME: Server-level constants for environment keys, defaults, endpoints, and service names
// ABOUTME: Domain constants for the sleep pattern live in smart_alarm_core::constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Constants module
//!
//! Server constants grouped by domain. Distribution and sampling constants are
//! re-exported from the core crate.

pub use smart_alarm_core::constants::{sampling, sleep_pattern, timezone};

/// Environment variable names read at startup
pub mod env_keys {
    /// Listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Listen port fallback used by most PaaS platforms
    pub const PORT: &str = "PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Log level / filter directive
    pub const RUST_LOG: &str = "RUST_LOG";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Comma-separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Seed for reproducible random planning
    pub const ALARM_RNG_SEED: &str = "ALARM_RNG_SEED";
    /// Maximum accepted request body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: &str = "MAX_REQUEST_BODY_BYTES";
    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Most sleep samples a single plan may generate
    pub const MAX_SEQUENCE_LEN: &str = "MAX_SEQUENCE_LEN";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default log level
    pub const LOG_LEVEL: &str = "info";
    /// Default CORS origins (any)
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Default request body limit (16 KiB is ample for two timestamps)
    pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;
    /// Default request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Default sample cap per plan (24 hours of samples)
    pub const MAX_SEQUENCE_LEN: usize = super::sampling::MAX_SEQUENCE_LEN;
}

/// API endpoints
pub mod endpoints {
    /// API description
    pub const ROOT: &str = "/";
    /// Liveness check
    pub const HEALTH: &str = "/health";
    /// Readiness check
    pub const READY: &str = "/ready";
    /// Alarm planning
    pub const ALARM: &str = "/alarm";
}

/// Service names for structured logging and health reports
pub mod service_names {
    /// This server
    pub const SMART_ALARM_SERVER: &str = "smart-alarm-server";
}

/// HTTP header names
pub mod headers {
    /// Request correlation header
    pub const REQUEST_ID: &str = "x-request-id";
}
