// ABOUTME: Unified error types, error codes, and HTTP error body formatting
// ABOUTME: Maps validation, degenerate-window, and internal failures to consistent API responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! # Unified Error Handling System
//!
//! Every failure surfaced by the alarm service is an [`AppError`] carrying an
//! [`ErrorCode`]. The code decides the HTTP status and the category title that
//! goes into the `error` field of the response body; the message goes into
//! `message`. Validation errors for missing fields also carry an example
//! payload so callers can see the expected request shape.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// The request is well formed but semantically invalid (e.g. soft >= hard)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required request field is absent or null
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A value could not be parsed (bad date string, malformed JSON)
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// The wake window is too narrow to hold a single sleep sample
    #[serde(rename = "WINDOW_TOO_SMALL")]
    WindowTooSmall = 3004,
    /// The request body exceeded the configured limit
    #[serde(rename = "PAYLOAD_TOO_LARGE")]
    PayloadTooLarge = 3005,
    /// The wake window would need more sleep samples than the planner allows
    #[serde(rename = "WINDOW_TOO_LARGE")]
    WindowTooLarge = 3006,

    // Resource Management (4000-4999)
    /// No route matched the request
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Configuration (6000-6999)
    /// Configuration values are out of range
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected failure while serving a request
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::WindowTooSmall
            | Self::WindowTooLarge => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 413 Payload Too Large
            Self::PayloadTooLarge => 413,

            // 500 Internal Server Error
            Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Short category title rendered in the `error` field of response bodies
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => {
                "Validation Error"
            }
            Self::WindowTooSmall => "Time Window Too Small",
            Self::WindowTooLarge => "Time Window Too Large",
            Self::PayloadTooLarge => "Payload Too Large",
            Self::ResourceNotFound => "Not Found",
            Self::ConfigInvalid => "Configuration Error",
            Self::InternalError => "Internal Server Error",
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The data format is invalid",
            Self::WindowTooSmall => "The time difference is too small to generate sleep data",
            Self::WindowTooLarge => "The time window is too large to generate sleep data",
            Self::PayloadTooLarge => "The request body is too large",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Wire name of the code, identical to its serde representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::WindowTooSmall => "WINDOW_TOO_SMALL",
            Self::WindowTooLarge => "WINDOW_TOO_LARGE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Example request payload shown to the caller
    pub example: Option<serde_json::Value>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            example: None,
            source: None,
        }
    }

    /// Attach an example payload to the error body
    #[must_use]
    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether this error indicates a fault on the server side
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.code.http_status() >= 500
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
///
/// `error` and `message` are always present; `example` only accompanies
/// missing-field validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Category title of the failure
    pub error: String,
    /// Detailed, caller-facing description
    pub message: String,
    /// Stable machine-readable code
    pub code: ErrorCode,
    /// Example of a valid request payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: error.code.title().to_owned(),
            message: error.message,
            code: error.code,
            example: error.example,
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Required request fields are absent
    pub fn missing_fields(fields: &[&str], example: serde_json::Value) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field(s): {}", fields.join(", ")),
        )
        .with_example(example)
    }

    /// A value could not be parsed
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Wake window too narrow to produce a non-empty sequence
    pub fn window_too_small(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WindowTooSmall, message)
    }

    /// Wake window wider than the planner's sample limit
    pub fn window_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WindowTooLarge, message)
    }

    /// Request body over the configured limit
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(format!("{error:#}"))
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;
    use tracing::{error, warn};

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            if self.is_server_error() {
                error!(
                    error.code = %self.code,
                    error.message = %self.message,
                    error.source = ?self.source,
                    "Request failed with internal error"
                );
            } else {
                warn!(
                    error.code = %self.code,
                    error.message = %self.message,
                    "Request rejected"
                );
            }

            (status, Json(ErrorResponse::from(self))).into_response()
        }
    }
}
