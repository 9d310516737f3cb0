// ABOUTME: Server binary for the smart alarm HTTP API
// ABOUTME: Loads configuration, applies CLI overrides, initializes logging, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! # Smart Alarm Server Binary
//!
//! Starts the HTTP API that plans wake-up targets and synthetic sleep-stage
//! series. Configuration comes from the environment; flags override it.

use anyhow::Result;
use clap::Parser;
use smart_alarm_server::{
    config::ServerConfig,
    constants::endpoints,
    logging,
    server::{AlarmServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "smart-alarm-server")]
#[command(about = "Smart alarm API - random wake targets with synthetic sleep-stage series")]
#[command(version)]
pub struct Args {
    /// Override HTTP port (`HTTP_PORT` / `PORT`)
    #[arg(long)]
    port: Option<u16>,

    /// Override bind address (`HOST`)
    #[arg(long)]
    host: Option<String>,

    /// Seed the random source for reproducible plans (`ALARM_RNG_SEED`)
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.http_port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(seed) = self.seed {
            config.random.seed = Some(seed);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    info!("Starting Smart Alarm Server");
    info!("{}", config.summary());

    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(config));
    if let Err(e) = AlarmServer::new(resources).run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   API Description: GET  http://{host}:{port}{}", endpoints::ROOT);
    info!("   Health:          GET  http://{host}:{port}{}", endpoints::HEALTH);
    info!("   Readiness:       GET  http://{host}:{port}{}", endpoints::READY);
    info!("   Plan Alarm:      POST http://{host}:{port}{}", endpoints::ALARM);
    info!("=== End of Endpoint List ===");
}
