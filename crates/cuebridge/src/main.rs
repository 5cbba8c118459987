//! CueBridge - receives show-control strings from a lighting console over
//! UDP and triggers the matching functions on a video mixer's HTTP API.
//!
//! Usage: `cuebridge <mixer-ip>` or `VMIX_IP=<mixer-ip> cuebridge`.
//! `CUEBRIDGE_CONFIG=<file.toml>` loads further settings.

#![warn(missing_docs)]

mod logging_setup;

use anyhow::{Context, Result};
use cuebridge_control::{
    config::{CONFIG_ENV_VAR, HOST_ENV_VAR},
    Bridge, BridgeConfig, BridgeError, HttpApiClient, UdpCommandListener,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "cuebridge".to_string());
    let args: Vec<String> = args.collect();

    let config_file = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let env_host = std::env::var(HOST_ENV_VAR).ok();

    let config = match BridgeConfig::resolve(config_file.as_deref(), env_host, &args) {
        Ok(config) => config,
        Err(BridgeError::Config(reason)) => {
            eprintln!("{}", reason);
            eprintln!("Enter mixer IP in the format: {} x.x.x.x", program);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };

    let _log_guard = logging_setup::init(&config)?;

    let client = HttpApiClient::new(Duration::from_millis(config.request_timeout_ms))
        .context("Failed to create HTTP client")?;
    let mut bridge = Bridge::from_config(client, &config)?;
    info!(
        "Registered scripts: {}",
        bridge.registry().names().collect::<Vec<_>>().join(", ")
    );

    let listener = UdpCommandListener::bind(config.listen_port)
        .await
        .with_context(|| format!("Error opening the socket on port {}", config.listen_port))?;

    tokio::select! {
        _ = listener.run(&mut bridge) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            info!("Shutting down");
        }
    }

    Ok(())
}
