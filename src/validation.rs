// ABOUTME: Request payload validation for the alarm endpoint
// ABOUTME: Checks presence, date format, and ordering of the soft/hard bounds before planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Alarm request validation
//!
//! Failures are reported in a fixed order: missing fields first, then
//! unparseable dates (`soft` before `hard`), then out-of-order bounds. Body
//! extraction failures are folded into the same error taxonomy.

use crate::errors::{AppError, AppResult};
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use smart_alarm_core::TimeInterval;

/// Field name of the earliest acceptable wake time
pub const SOFT_FIELD: &str = "soft";
/// Field name of the latest acceptable wake time
pub const HARD_FIELD: &str = "hard";

/// Raw `POST /alarm` body
///
/// Fields stay untyped so that a wrong JSON type is reported as a format
/// error on that field rather than as an opaque body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlarmRequest {
    /// Earliest acceptable wake time
    #[serde(default)]
    pub soft: Option<Value>,
    /// Latest acceptable wake time
    #[serde(default)]
    pub hard: Option<Value>,
}

impl AlarmRequest {
    /// Validate the bounds and build the wake window
    ///
    /// # Errors
    ///
    /// - `MISSING_REQUIRED_FIELD` when `soft` or `hard` is absent or null
    /// - `INVALID_FORMAT` when either is not a parseable date string
    /// - `INVALID_INPUT` when `soft` is not strictly before `hard`
    pub fn into_interval(self) -> AppResult<TimeInterval> {
        let (soft, hard) = match (self.soft, self.hard) {
            (Some(soft), Some(hard)) => (soft, hard),
            (soft, hard) => {
                let missing: Vec<&str> = [
                    (SOFT_FIELD, soft.is_none()),
                    (HARD_FIELD, hard.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(AppError::missing_fields(&missing, example_request()));
            }
        };

        let soft = parse_timestamp_field(SOFT_FIELD, &soft)?;
        let hard = parse_timestamp_field(HARD_FIELD, &hard)?;

        TimeInterval::new(soft, hard)
    }
}

/// A valid request body, returned alongside missing-field errors
#[must_use]
pub fn example_request() -> Value {
    json!({
        "soft": "2024-01-15T06:00:00.000Z",
        "hard": "2024-01-15T06:30:00.000Z"
    })
}

/// Map a JSON extraction failure onto the API error taxonomy
#[must_use]
pub fn reject_body(rejection: &JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::payload_too_large("Request body exceeds the configured size limit");
    }
    AppError::invalid_format(format!("Invalid JSON body: {}", rejection.body_text()))
}

/// Parse a JSON value that must hold a date string
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when the value is not a string or not a date
pub fn parse_timestamp_field(field: &str, value: &Value) -> AppResult<DateTime<Utc>> {
    let Value::String(raw) = value else {
        return Err(AppError::invalid_format(format!(
            "Field '{field}' must be an ISO 8601 date string"
        )));
    };
    parse_timestamp(raw).ok_or_else(|| {
        AppError::invalid_format(format!(
            "Invalid date format for '{field}': '{raw}'. Expected ISO 8601, \
             e.g. '2024-01-15T06:00:00.000Z'"
        ))
    })
}

/// Flexible ISO 8601 parsing
///
/// Accepts RFC 3339 with an offset or `Z`, a date-time without offset
/// (taken as UTC, optional fractional seconds), or a bare date (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}
