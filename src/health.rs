// ABOUTME: Server health monitoring and readiness checks for operational visibility
// ABOUTME: Reports uptime and current time, and self-tests the sleep-pattern generator for readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Health check endpoints and monitoring utilities

use crate::config::Environment;
use crate::constants::service_names;
use crate::formatters::DualTimestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use smart_alarm_core::{AlarmPlanner, ScriptedSource, SleepStage};
use std::time::Instant;
use tracing::warn;

/// Sequence length used by the readiness self-test
const SELF_TEST_SAMPLES: usize = 64;

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Fully operational
    Healthy,
    /// Not able to serve requests
    Unhealthy,
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Deployment environment
    pub environment: Environment,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Current time in UTC and IST
    pub time: DualTimestamp,
}

/// Individual component health status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Status description
    pub message: String,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// `GET /ready` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    /// Worst status across all checks
    pub status: HealthStatus,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
    /// Total time spent on checks
    pub response_time_ms: u64,
}

/// Health checker for the smart alarm server
#[derive(Debug, Clone)]
pub struct HealthChecker {
    start_time: Instant,
    environment: Environment,
    planner: AlarmPlanner,
}

impl HealthChecker {
    /// Create a checker; uptime counts from this call
    #[must_use]
    pub fn new(environment: Environment, planner: AlarmPlanner) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            planner,
        }
    }

    /// Seconds since the checker was created
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Perform a basic health check (fast, suitable for load balancer probes)
    #[must_use]
    pub fn basic_health(&self) -> HealthResponse {
        HealthResponse {
            status: HealthStatus::Healthy,
            service: service_names::SMART_ALARM_SERVER.into(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: self.environment,
            uptime_seconds: self.uptime_seconds(),
            time: DualTimestamp::from_utc(Utc::now()),
        }
    }

    /// Run component checks
    #[must_use]
    pub fn readiness(&self) -> ReadinessResponse {
        let start = Instant::now();
        let checks = vec![self.check_generator()];

        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        ReadinessResponse {
            status,
            checks,
            response_time_ms: elapsed_ms(start),
        }
    }

    /// Generate a fixed-size sequence from a scripted source and check its shape
    fn check_generator(&self) -> ComponentHealth {
        let start = Instant::now();
        let generator = self.planner.generator();
        let expected_tail = generator.profile().layout(SELF_TEST_SAMPLES).light_tail;
        let mut source = ScriptedSource::new([0.13, 0.57, 0.91, 0.28, 0.76]);

        let (status, message) = match generator.generate(SELF_TEST_SAMPLES, &mut source) {
            Ok(sequence)
                if sequence.len() == SELF_TEST_SAMPLES
                    && sequence.counts().total() == SELF_TEST_SAMPLES
                    && sequence.light_tail_len() == expected_tail
                    && sequence.tail().iter().all(|s| *s == SleepStage::Light)
                    && sequence.middle().iter().all(|s| *s != SleepStage::Light) =>
            {
                (
                    HealthStatus::Healthy,
                    format!(
                        "Generated {SELF_TEST_SAMPLES} samples with a \
                         {expected_tail}-sample light tail"
                    ),
                )
            }
            Ok(sequence) => (
                HealthStatus::Unhealthy,
                format!(
                    "Generated sequence has unexpected shape: len {}, light tail {}",
                    sequence.len(),
                    sequence.light_tail_len()
                ),
            ),
            Err(error) => (HealthStatus::Unhealthy, error.to_string()),
        };

        if status != HealthStatus::Healthy {
            warn!(component = "sleep_pattern_generator", %message, "Readiness check failed");
        }

        ComponentHealth {
            name: "sleep_pattern_generator".into(),
            status,
            message,
            duration_ms: elapsed_ms(start),
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_health_reports_service() {
        let checker = HealthChecker::new(Environment::Testing, AlarmPlanner::default());
        let health = checker.basic_health();

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.service, "smart-alarm-server");
        assert_eq!(health.environment, Environment::Testing);
        assert!(health.time.utc.ends_with('Z'));
        assert!(health.time.ist.ends_with("+05:30"));
    }

    #[test]
    fn test_readiness_passes_with_default_profile() {
        let checker = HealthChecker::new(Environment::Development, AlarmPlanner::default());
        let readiness = checker.readiness();

        assert_eq!(readiness.status, HealthStatus::Healthy);
        assert_eq!(readiness.checks.len(), 1);
        assert_eq!(readiness.checks[0].name, "sleep_pattern_generator");
    }

    #[test]
    fn test_health_serializes_camel_case() {
        let checker = HealthChecker::new(Environment::Production, AlarmPlanner::default());
        let value = serde_json::to_value(checker.basic_health()).unwrap();

        assert_eq!(value["status"], "healthy");
        assert_eq!(value["environment"], "production");
        assert!(value["uptimeSeconds"].is_u64());
    }
}
