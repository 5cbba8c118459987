//! Bridge configuration
//!
//! Resolved once at startup from defaults, an optional TOML file, the
//! `VMIX_IP` environment variable and the command line.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{error::BridgeError, logging::LogConfig, target::DispatchTarget, Result};

/// Environment variable holding the mixer host
pub const HOST_ENV_VAR: &str = "VMIX_IP";
/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV_VAR: &str = "CUEBRIDGE_CONFIG";

pub const DEFAULT_LISTEN_PORT: u16 = 5000;
pub const DEFAULT_API_PORT: u16 = 8088;
pub const DEFAULT_API_PATH: &str = "/api/";
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 6;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 250;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_DATA_SOURCE: &str = "Scenes";
pub const DEFAULT_SCENE_SCRIPT: &str = "GFXSCENE";

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Host of the video mixer (IP or name)
    pub target_host: Option<String>,
    /// UDP port the console sends to
    pub listen_port: u16,
    /// Port of the mixer HTTP API
    pub api_port: u16,
    /// Path of the mixer HTTP API
    pub api_path: String,
    /// Global cooldown between accepted events
    pub cooldown_seconds: u64,
    /// Pause between row select and scene script
    pub settle_delay_ms: u64,
    /// Per-request timeout for outbound calls
    pub request_timeout_ms: u64,
    /// Data source scene rows live in
    pub data_source: String,
    /// Script triggered after a row select
    pub scene_script: String,
    /// Extra pass-through scripts besides the built-ins
    pub scripts: Vec<String>,
    pub log: LogConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            target_host: None,
            listen_port: DEFAULT_LISTEN_PORT,
            api_port: DEFAULT_API_PORT,
            api_path: DEFAULT_API_PATH.to_string(),
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            scene_script: DEFAULT_SCENE_SCRIPT.to_string(),
            scripts: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Resolve the startup configuration.
    ///
    /// `config_file` and `env_host` are the values of [`CONFIG_ENV_VAR`] and
    /// [`HOST_ENV_VAR`]; `args` are the command line arguments without the
    /// program name. A non-empty `env_host` wins over a single positional
    /// argument, which wins over the file.
    pub fn resolve(
        config_file: Option<&Path>,
        env_host: Option<String>,
        args: &[String],
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(host) = env_host.filter(|h| !h.is_empty()) {
            config.target_host = Some(host);
        } else if let [host] = args {
            config.target_host = Some(host.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the mixer host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.target_host = Some(host.into());
        self
    }

    /// Set the UDP listen port
    pub fn with_listen_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    /// Set the API port
    pub fn with_api_port(mut self, port: u16) -> Self {
        self.api_port = port;
        self
    }

    /// Set the cooldown
    pub fn with_cooldown(mut self, seconds: u64) -> Self {
        self.cooldown_seconds = seconds;
        self
    }

    /// Add a pass-through script
    pub fn with_script(mut self, name: impl Into<String>) -> Self {
        self.scripts.push(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.target_host.as_deref() {
            None | Some("") => {
                return Err(BridgeError::Config("No target host configured".to_string()))
            }
            Some(_) => {}
        }
        if self.listen_port == 0 {
            return Err(BridgeError::Config("Listen port must not be 0".to_string()));
        }
        if self.api_port == 0 {
            return Err(BridgeError::Config("API port must not be 0".to_string()));
        }
        if !self.api_path.starts_with('/') {
            return Err(BridgeError::Config(format!(
                "API path must start with '/': {}",
                self.api_path
            )));
        }
        check_api_name("Data source", &self.data_source)?;
        check_api_name("Scene script", &self.scene_script)?;
        for script in &self.scripts {
            check_api_name("Script", script)?;
        }
        self.dispatch_target()?;
        Ok(())
    }

    /// Mixer API target, e.g. `http://10.0.0.5:8088/api/`
    pub fn dispatch_target(&self) -> Result<DispatchTarget> {
        let host = self
            .target_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| BridgeError::Config("No target host configured".to_string()))?;
        DispatchTarget::from_parts(host, self.api_port, &self.api_path)
    }
}

/// Characters that would break the `?Function=..&Value=..` query
const RESERVED_QUERY_CHARS: &[char] = &['&', '#', '?', '=', '%', '+', ','];

/// Names end up verbatim in the query string, so only plain tokens are allowed
fn check_api_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BridgeError::Config(format!("{} must not be empty", kind)));
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || RESERVED_QUERY_CHARS.contains(&c))
    {
        return Err(BridgeError::Config(format!(
            "{} {:?} contains characters not allowed in an API call",
            kind, name
        )));
    }
    Ok(())
}
