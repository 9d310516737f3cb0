// ABOUTME: Smart alarm HTTP server assembly, shared resources, and lifecycle
// ABOUTME: Builds the axum router, owns the random source mode, and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Server assembly
//!
//! [`ServerResources`] is the shared state handed to every route group.
//! [`build_router`] is what tests drive through `tower::ServiceExt::oneshot`;
//! [`AlarmServer::run`] binds it to a socket.

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::health::HealthChecker;
use crate::middleware::apply_http_layers;
use crate::routes::{fallback_handler, AlarmRoutes, ApiInfoRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::Router;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smart_alarm_core::{AlarmPlan, AlarmPlanner, TimeInterval};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Where alarm planning draws its randomness from
#[derive(Debug)]
pub enum RandomSourceMode {
    /// Fresh thread-local entropy for every request
    Entropy,
    /// One shared generator; identical request sequences give identical plans
    Seeded(Mutex<ChaCha8Rng>),
}

impl RandomSourceMode {
    /// Choose the mode from an optional seed
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, |seed| {
            Self::Seeded(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
        })
    }

    /// Whether plans are reproducible
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    fn plan(&self, planner: &AlarmPlanner, interval: TimeInterval) -> AppResult<AlarmPlan> {
        match self {
            Self::Entropy => planner.plan(interval, &mut rand::thread_rng()),
            Self::Seeded(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| AppError::internal("Seeded random source lock poisoned"))?;
                planner.plan(interval, &mut *rng)
            }
        }
    }
}

/// Shared state for all route handlers
#[derive(Debug)]
pub struct ServerResources {
    /// Active configuration
    pub config: ServerConfig,
    /// Target sampler and sleep-pattern generator
    pub planner: AlarmPlanner,
    /// Randomness for planning
    pub random: RandomSourceMode,
    /// Liveness and readiness reporting
    pub health: HealthChecker,
}

impl ServerResources {
    /// Build resources from configuration with the default sleep profile
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let planner = AlarmPlanner::default().with_max_samples(config.planning.max_sequence_len);
        Self {
            random: RandomSourceMode::from_seed(config.random.seed),
            health: HealthChecker::new(config.environment, planner),
            planner,
            config,
        }
    }

    /// Plan an alarm for `interval` using the configured random source
    ///
    /// # Errors
    ///
    /// Returns `WindowTooSmall` or `WindowTooLarge` for windows outside the
    /// planner's range, or an internal error if the seeded generator's lock is
    /// poisoned
    pub fn plan_alarm(&self, interval: TimeInterval) -> AppResult<AlarmPlan> {
        self.random.plan(&self.planner, interval)
    }
}

/// Assemble every route group behind the standard middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let router = Router::new()
        .merge(ApiInfoRoutes::routes())
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AlarmRoutes::routes(Arc::clone(&resources)))
        .fallback(fallback_handler);

    apply_http_layers(router, &resources.config)
}

/// The smart alarm HTTP server
pub struct AlarmServer {
    resources: Arc<ServerResources>,
}

impl AlarmServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind and serve until Ctrl-C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails
    pub async fn run(self) -> Result<()> {
        let config = &self.resources.config;
        let addr = format!("{}:{}", config.host, config.http_port);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!(
            address = %addr,
            seeded = self.resources.random.is_seeded(),
            "Smart alarm server listening"
        );

        let app = build_router(Arc::clone(&self.resources));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolve when the process is asked to stop
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        () = terminate => warn!("Received terminate signal, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn interval() -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 6, 30, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_random_mode_from_seed() {
        assert!(!RandomSourceMode::from_seed(None).is_seeded());
        assert!(RandomSourceMode::from_seed(Some(1)).is_seeded());
    }

    #[test]
    fn test_seeded_resources_replay_the_same_stream() {
        let mut config = ServerConfig::default();
        config.random.seed = Some(2024);

        let first = ServerResources::new(config.clone());
        let second = ServerResources::new(config);

        for _ in 0..5 {
            assert_eq!(
                first.plan_alarm(interval()).map_err(|e| e.code),
                second.plan_alarm(interval()).map_err(|e| e.code)
            );
        }
    }

    #[test]
    fn test_entropy_mode_plans_inside_window() {
        let resources = ServerResources::new(ServerConfig::default());
        for _ in 0..20 {
            match resources.plan_alarm(interval()) {
                Ok(plan) => assert!(interval().contains(plan.target())),
                // Targets in the first two seconds have no samples
                Err(e) => assert_eq!(e.code, smart_alarm_core::ErrorCode::WindowTooSmall),
            }
        }
    }

    #[test]
    fn test_configured_sequence_limit_reaches_planner() {
        let mut config = ServerConfig::default();
        config.planning.max_sequence_len = 600;
        let resources = ServerResources::new(config);

        assert_eq!(resources.planner.max_samples(), 600);
        // 30 minute window allows up to 900 samples
        let err = resources.plan_alarm(interval()).unwrap_err();
        assert_eq!(err.code, smart_alarm_core::ErrorCode::WindowTooLarge);
    }

    #[test]
    #[allow(clippy::panic)]
    fn test_poisoned_lock_is_internal_error() {
        let mut config = ServerConfig::default();
        config.random.seed = Some(9);
        let resources = Arc::new(ServerResources::new(config));

        let poisoner = Arc::clone(&resources);
        let _ = std::thread::spawn(move || {
            if let RandomSourceMode::Seeded(rng) = &poisoner.random {
                let _guard = rng.lock().unwrap();
                panic!("poison the lock");
            }
        })
        .join();

        let err = resources.plan_alarm(interval()).unwrap_err();
        assert_eq!(err.code, smart_alarm_core::ErrorCode::InternalError);
    }
}
