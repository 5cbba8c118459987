//! Action dispatcher
//!
//! [`Bridge`] is the whole per-datagram pipeline: decode, cooldown gate,
//! parse, then the outbound call sequence for the command. It owns every
//! piece of mutable state, so one `Bridge` is one independent bridge.

use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::{
    client::ApiClient,
    command::{parse_command, ParsedCommand, SEPARATOR},
    config::BridgeConfig,
    cooldown::CooldownGate,
    error::InvalidReason,
    registry::ScriptRegistry,
    target::{ApiCall, DispatchTarget},
    Result,
};

/// What happened to one datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dropped because the cooldown window had not passed
    CooledDown,
    /// Dropped because it was not a usable command
    Ignored(InvalidReason),
    /// Outbound calls were attempted
    Dispatched { calls: usize, failures: usize },
}

/// Command dispatch context
pub struct Bridge<C: ApiClient> {
    client: C,
    target: DispatchTarget,
    registry: ScriptRegistry,
    gate: CooldownGate,
    settle_delay: Duration,
    data_source: String,
    scene_script: String,
}

impl<C: ApiClient> Bridge<C> {
    /// Create a bridge with the built-in scripts and default scene settings
    pub fn new(client: C, target: DispatchTarget, cooldown_seconds: u64) -> Self {
        Self {
            client,
            target,
            registry: ScriptRegistry::with_builtins(),
            gate: CooldownGate::new(cooldown_seconds),
            settle_delay: Duration::from_millis(crate::config::DEFAULT_SETTLE_DELAY_MS),
            data_source: crate::config::DEFAULT_DATA_SOURCE.to_string(),
            scene_script: crate::config::DEFAULT_SCENE_SCRIPT.to_string(),
        }
    }

    /// Create a bridge from a validated configuration
    pub fn from_config(client: C, config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let target = config.dispatch_target()?;
        let mut bridge = Self::new(client, target, config.cooldown_seconds)
            .with_settle_delay(Duration::from_millis(config.settle_delay_ms))
            .with_data_source(config.data_source.clone())
            .with_scene_script(config.scene_script.clone());
        bridge.registry.extend(config.scripts.iter().cloned());
        Ok(bridge)
    }

    /// Set the pause between row select and scene script
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the data source scene rows are selected in
    pub fn with_data_source(mut self, source: String) -> Self {
        self.data_source = source;
        self
    }

    /// Set the script triggered after a row select
    pub fn with_scene_script(mut self, script: String) -> Self {
        self.scene_script = script;
        self
    }

    /// Register an additional pass-through script
    pub fn register_script(&mut self, name: impl Into<String>) {
        self.registry.register(name);
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    pub fn target(&self) -> &DispatchTarget {
        &self.target
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Handle one raw datagram received at unix time `now`
    pub async fn handle_datagram(&mut self, raw: &[u8], now: i64) -> Outcome {
        if !self.gate.allow(now) {
            info!("Cooldown not expired. Ignoring...");
            return Outcome::CooledDown;
        }

        let text = String::from_utf8_lossy(raw);
        if text.contains(SEPARATOR) {
            debug!("Caught a comma in {:?}", text);
        }
        let command = parse_command(&text, &self.registry);
        self.dispatch(command, now).await
    }

    /// Run the call sequence for an already parsed command
    pub async fn dispatch(&mut self, command: ParsedCommand, now: i64) -> Outcome {
        match command {
            ParsedCommand::IndexedScene { index } => self.run_indexed_scene(index, now).await,
            ParsedCommand::NamedScript { name } => self.run_named_script(&name, now).await,
            ParsedCommand::Invalid { reason } => {
                if reason.is_malformed() {
                    warn!("{}... skipping", reason);
                } else {
                    debug!("{}... ignoring", reason);
                }
                Outcome::Ignored(reason)
            }
        }
    }

    async fn run_indexed_scene(&mut self, index: u64, now: i64) -> Outcome {
        debug!("Scene number contained is: {}", index);
        info!(
            "Selecting row {} in data source {}",
            index, self.data_source
        );
        let mut failures = 0;

        let select = ApiCall::select_row(self.data_source.clone(), index);
        if !self.call(&select).await {
            error!("Could not issue GET request to API for scene {}", index);
            failures += 1;
        }
        self.gate.record(now);

        // Give the data source time to change before the script reads it
        tokio::time::sleep(self.settle_delay).await;

        let trigger = ApiCall::script(self.scene_script.clone());
        if !self.call(&trigger).await {
            error!(
                "Could not issue GET request to API for {} script",
                self.scene_script
            );
            failures += 1;
        }

        Outcome::Dispatched { calls: 2, failures }
    }

    async fn run_named_script(&mut self, name: &str, now: i64) -> Outcome {
        info!("Triggering script {}", name);
        let call = ApiCall::script(name);
        let ok = self.call(&call).await;
        self.gate.record(now);
        if !ok {
            error!("Could not issue GET request to API for script {}", name);
        }

        Outcome::Dispatched {
            calls: 1,
            failures: usize::from(!ok),
        }
    }

    async fn call(&self, call: &ApiCall) -> bool {
        let url = self.target.url(call);
        info!("API Call: {}", url);
        match self.client.get(&url).await {
            Ok(()) => true,
            Err(e) => {
                error!("{} failed: {}", call.function(), e);
                false
            }
        }
    }
}
