// ABOUTME: Re-export of the unified error system from the core crate
// ABOUTME: Gives server modules a single `crate::errors` path for AppError and friends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! # Unified Error Handling System
//!
//! Error types live in `smart_alarm_core::errors` so the planner and the HTTP
//! layer share one taxonomy. With the core crate's `http-response` feature
//! enabled, [`AppError`] converts straight into an axum response.

pub use smart_alarm_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
