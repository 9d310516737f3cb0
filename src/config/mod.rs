// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its sub-configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Configuration module for the smart alarm server
//!
//! All settings come from environment variables (see [`environment`]); the
//! binary applies command-line overrides on top.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ConfigError, CorsConfig, Environment, HttpConfig, PlanningConfig, RandomConfig, ServerConfig,
};
