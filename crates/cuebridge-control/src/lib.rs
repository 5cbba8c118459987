//! CueBridge Control - lighting console to video mixer bridge
//!
//! This crate turns short UDP text commands from a lighting console into
//! HTTP function calls against a video mixer:
//! - **Parser**: `SCN,{n}` scene commands and registered plain script names
//! - **Cooldown**: a global gate that drops commands arriving too quickly
//! - **Dispatcher**: the outbound call sequence for each command
//! - **Listener**: the UDP receive loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cuebridge_control::{Bridge, BridgeConfig, HttpApiClient, UdpCommandListener};
//! use std::time::Duration;
//!
//! # async fn run() -> cuebridge_control::Result<()> {
//! let config = BridgeConfig::default().with_host("192.168.1.20");
//! let client = HttpApiClient::new(Duration::from_millis(config.request_timeout_ms))?;
//! let mut bridge = Bridge::from_config(client, &config)?;
//! let listener = UdpCommandListener::bind(config.listen_port).await?;
//! listener.run(&mut bridge).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`command`] - Datagram parser
//! - [`cooldown`] - Cooldown gate
//! - [`registry`] - Pass-through script names
//! - [`dispatch`] - Command dispatch context
//! - [`target`] - API calls and URL construction
//! - [`client`] - HTTP client adapter
//! - [`listener`] - UDP listener
//! - [`config`] - Startup configuration
//! - [`logging`] - Log configuration
//! - [`error`] - Error types

#![allow(missing_docs)]

// Core modules
/// Datagram parser
pub mod command;
/// Cooldown gate
pub mod cooldown;
/// Command dispatch
pub mod dispatch;
/// Error types
pub mod error;
/// Script registry
pub mod registry;
/// API call definitions
pub mod target;

// Plumbing
/// HTTP client adapter
pub mod client;
/// Startup configuration
pub mod config;
/// UDP listener
pub mod listener;
/// Log configuration
pub mod logging;

// Re-exports
pub use client::{ApiClient, HttpApiClient};
pub use command::{parse_command, ParsedCommand};
pub use config::BridgeConfig;
pub use cooldown::CooldownGate;
pub use dispatch::{Bridge, Outcome};
pub use error::{BridgeError, InvalidReason, Result};
pub use listener::UdpCommandListener;
pub use logging::LogConfig;
pub use registry::ScriptRegistry;
pub use target::{ApiCall, DispatchTarget};
