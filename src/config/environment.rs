// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses listen address, CORS, HTTP limits, and random source mode from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_keys};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration loading and validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse
    #[error("Invalid {key} value '{value}': {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value found in the environment
        value: String,
        /// Parser message
        reason: String,
    },
    /// A parsed value is outside its allowed range
    #[error("{key} {reason}")]
    OutOfRange {
        /// Variable name
        key: &'static str,
        /// What the constraint is
        reason: &'static str,
    },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

/// HTTP transport limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl HttpConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: defaults::MAX_REQUEST_BODY_BYTES,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Random source settings for alarm planning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RandomConfig {
    /// When set, all requests draw from one generator seeded with this value
    pub seed: Option<u64>,
}

/// Alarm planning limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanningConfig {
    /// Most sleep samples a single plan may generate
    pub max_sequence_len: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: defaults::MAX_SEQUENCE_LEN,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// CORS settings
    pub cors: CorsConfig,
    /// Body size and timeout limits
    pub http: HttpConfig,
    /// Random source settings
    pub random: RandomConfig,
    /// Sequence size limits
    pub planning: PlanningConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            cors: CorsConfig::default(),
            http: HttpConfig::default(),
            random: RandomConfig::default(),
            planning: PlanningConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or a limit is zero
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment variables");

        let http_port = match env::var(env_keys::HTTP_PORT) {
            Ok(value) => parse_value(env_keys::HTTP_PORT, &value)?,
            Err(_) => parse_env_or(env_keys::PORT, defaults::HTTP_PORT)?,
        };

        let seed = match env::var(env_keys::ALARM_RNG_SEED) {
            Ok(value) if !value.trim().is_empty() => {
                Some(parse_value(env_keys::ALARM_RNG_SEED, &value)?)
            }
            _ => None,
        };

        let config = Self {
            http_port,
            host: env_var_or(env_keys::HOST, defaults::HOST),
            environment: Environment::from_str_or_default(&env_var_or(
                env_keys::ENVIRONMENT,
                "development",
            )),
            cors: CorsConfig {
                allowed_origins: env_var_or(
                    env_keys::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                ),
            },
            http: HttpConfig {
                max_body_bytes: parse_env_or(
                    env_keys::MAX_REQUEST_BODY_BYTES,
                    defaults::MAX_REQUEST_BODY_BYTES,
                )?,
                request_timeout_secs: parse_env_or(
                    env_keys::REQUEST_TIMEOUT_SECS,
                    defaults::REQUEST_TIMEOUT_SECS,
                )?,
            },
            random: RandomConfig { seed },
            planning: PlanningConfig {
                max_sequence_len: parse_env_or(
                    env_keys::MAX_SEQUENCE_LEN,
                    defaults::MAX_SEQUENCE_LEN,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or a limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                key: env_keys::HOST,
                reason: "must not be empty",
            });
        }
        if self.http.max_body_bytes == 0 {
            return Err(ConfigError::OutOfRange {
                key: env_keys::MAX_REQUEST_BODY_BYTES,
                reason: "must be greater than zero",
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::OutOfRange {
                key: env_keys::REQUEST_TIMEOUT_SECS,
                reason: "must be greater than zero",
            });
        }
        if self.planning.max_sequence_len == 0 {
            return Err(ConfigError::OutOfRange {
                key: env_keys::MAX_SEQUENCE_LEN,
                reason: "must be greater than zero",
            });
        }

        if self.environment.is_production() && self.cors.allowed_origins.trim() == "*" {
            warn!("CORS allows any origin in production; set CORS_ALLOWED_ORIGINS to restrict it");
        }
        if self.environment.is_production() && self.random.seed.is_some() {
            warn!("ALARM_RNG_SEED is set in production; alarm targets are predictable");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Smart Alarm Server Configuration:\n\
             - Listen Address: {}:{}\n\
             - Environment: {}\n\
             - CORS Origins: {}\n\
             - Max Body Bytes: {}\n\
             - Request Timeout: {}s\n\
             - Random Source: {}\n\
             - Max Sequence Length: {}",
            self.host,
            self.http_port,
            self.environment,
            self.cors.allowed_origins,
            self.http.max_body_bytes,
            self.http.request_timeout_secs,
            self.random
                .seed
                .map_or_else(|| "entropy".to_owned(), |seed| format!("seeded ({seed})")),
            self.planning.max_sequence_len,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    env::var(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason: e.to_string(),
        })
}
