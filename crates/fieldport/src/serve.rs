// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fieldport serve` command implementation.
//!
//! Picks the job directory backend from configuration -- the ServiceM8
//! API when credentials are present, compiled-in fixture data otherwise
//! -- then hands it to the gateway and serves until interrupted.

use std::sync::Arc;

use tracing::{info, warn};

use fieldport_config::FieldportConfig;
use fieldport_core::{FieldportError, JobDirectory};
use fieldport_fixture::{DEMO_EMAIL, DEMO_PHONE, FixtureDirectory};
use fieldport_gateway::{GatewayState, ServerConfig, start_server};
use fieldport_servicem8::ServiceM8Directory;

/// Runs the `fieldport serve` command.
pub async fn run_serve(config: FieldportConfig) -> Result<(), FieldportError> {
    init_tracing(&config.server.log_level);

    info!("starting fieldport serve");

    let configured = config.servicem8.is_configured();
    let directory = select_directory(&config)?;
    info!(backend = directory.name(), mode = config.mode(), "job directory selected");
    if !configured {
        warn!(
            email = DEMO_EMAIL,
            phone = DEMO_PHONE,
            "no ServiceM8 credentials; serving fixture data (demo login shown)"
        );
    }

    let state = GatewayState::new(directory, configured, config.mode());
    let server = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    tokio::select! {
        result = start_server(server, state) => result,
        _ = shutdown_signal() => {
            info!("shutdown signal received");
            Ok(())
        }
    }
}

fn select_directory(config: &FieldportConfig) -> Result<Arc<dyn JobDirectory>, FieldportError> {
    if config.servicem8.is_configured() {
        // Validation guarantees both credentials are present here.
        let api_key = config.servicem8.api_key.clone().unwrap_or_default();
        let api_secret = config.servicem8.api_secret.clone().unwrap_or_default();
        let directory =
            ServiceM8Directory::new(api_key, api_secret, config.servicem8.base_url.clone())?;
        Ok(Arc::new(directory))
    } else {
        Ok(Arc::new(FixtureDirectory::new()))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fieldport={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
