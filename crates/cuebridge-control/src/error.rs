//! Error types for the bridge
use thiserror::Error;

/// Bridge errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// HTTP transport error (connect, timeout, ...)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization error
    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// Invalid API target
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Why a datagram could not be turned into a command.
///
/// These are not failures of the bridge, just classifications of bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// `SCN,` with nothing after the comma
    #[error("No value after comma")]
    MissingValue,

    /// `SCN,<x>` where `x` is not a non-negative base-10 integer
    #[error("Value after comma is not an integer: {0:?}")]
    NonIntegerValue(String),

    /// Comma form with an unknown prefix
    #[error("Unknown comma command: {0:?}")]
    UnknownCommaForm(String),

    /// Plain text that is not a registered script
    #[error("Unrecognized command: {0:?}")]
    UnrecognizedCommand(String),
}

impl InvalidReason {
    /// Malformed input is worth a warning; unknown plain text is noise.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, InvalidReason::UnrecognizedCommand(_))
    }
}
