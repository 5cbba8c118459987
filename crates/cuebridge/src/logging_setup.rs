//! Operator-facing log output
//!
//! Status lines go to stdout and problems to stderr, so an operator can
//! watch the console traffic and still redirect errors separately.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use cuebridge_control::BridgeConfig;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{self, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

/// Install the subscriber and print the startup banner.
///
/// The returned guard flushes the log file when dropped and must live as
/// long as the process.
pub fn init(config: &BridgeConfig) -> Result<Option<WorkerGuard>> {
    let log = &config.log;
    // RUST_LOG overrides the configured level
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(log.parse_level().into())
            .from_env_lossy()
    };

    let console = log.console_output.then(|| {
        let writer = std::io::stderr
            .with_max_level(Level::WARN)
            .or_else(std::io::stdout);
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .compact()
            .with_filter(filter())
    });

    let mut guard = None;
    let file = if log.file_output {
        log.ensure_log_directory()
            .with_context(|| format!("Failed to create log directory {:?}", log.log_dir))?;
        match log.cleanup_old_logs() {
            Ok(0) => {}
            Ok(n) => eprintln!("Removed {} old log file(s)", n),
            Err(e) => eprintln!("Could not clean up old log files: {}", e),
        }

        let path = log.current_log_path();
        let file_name = path
            .file_name()
            .context("Log path has no file name")?
            .to_owned();
        let appender = tracing_appender::rolling::never(&log.log_dir, file_name);
        let (writer, worker) = tracing_appender::non_blocking(appender);
        guard = Some(worker);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter()),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("Failed to install log subscriber")?;

    for line in startup_lines(config, Local::now())? {
        tracing::info!("{}", line);
    }
    if log.file_output {
        tracing::info!("Writing log files to {:?}", log.log_dir);
    }

    Ok(guard)
}

/// Banner printed once the subscriber is up
fn startup_lines(config: &BridgeConfig, started: DateTime<Local>) -> Result<Vec<String>> {
    let target = config
        .dispatch_target()
        .context("Mixer API target is not usable")?;
    Ok(vec![
        format!("{} - Starting up", started.to_rfc3339()),
        format!("Mixer API is at: {}", target.base_url()),
        format!("Listening for console strings on UDP port {}", config.listen_port),
        format!(
            "Cooldown {}s between events, {}ms settle before {}",
            config.cooldown_seconds, config.settle_delay_ms, config.scene_script
        ),
    ])
}
