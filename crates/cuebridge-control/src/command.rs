//! Console command parser
//!
//! Turns the text of one datagram into a [`ParsedCommand`].
//!
//! Supported forms:
//! - `SCN,{n}` - select scene row `n` (zero based) and run the scene script
//! - `{NAME}` - run a registered script verbatim (e.g. `SCENE`, `TOP`)
//!
//! A trailing `\r\n`, `\n` or `\r` is ignored.

use crate::{error::InvalidReason, registry::ScriptRegistry};

/// Prefix of the indexed scene command
pub const SCENE_KEYWORD: &str = "SCN";
/// Separator between a command and its argument
pub const SEPARATOR: char = ',';

/// A classified console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `SCN,{index}`
    IndexedScene { index: u64 },
    /// A registered pass-through script
    NamedScript { name: String },
    /// Anything else
    Invalid { reason: InvalidReason },
}

impl ParsedCommand {
    fn invalid(reason: InvalidReason) -> Self {
        ParsedCommand::Invalid { reason }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, ParsedCommand::Invalid { .. })
    }
}

/// Remove one trailing line terminator, if present
pub fn strip_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text)
}

/// Classify a decoded datagram. Pure: no I/O, no side effects.
pub fn parse_command(text: &str, registry: &ScriptRegistry) -> ParsedCommand {
    let text = strip_terminator(text);

    match text.split_once(SEPARATOR) {
        Some((prefix, remainder)) => parse_comma_form(prefix, remainder),
        None => parse_plain(text, registry),
    }
}

fn parse_comma_form(prefix: &str, remainder: &str) -> ParsedCommand {
    if prefix != SCENE_KEYWORD {
        return ParsedCommand::invalid(InvalidReason::UnknownCommaForm(prefix.to_string()));
    }

    let value = strip_terminator(remainder);
    if value.is_empty() {
        return ParsedCommand::invalid(InvalidReason::MissingValue);
    }

    match value.parse::<u64>() {
        Ok(index) => ParsedCommand::IndexedScene { index },
        Err(_) => ParsedCommand::invalid(InvalidReason::NonIntegerValue(value.to_string())),
    }
}

fn parse_plain(text: &str, registry: &ScriptRegistry) -> ParsedCommand {
    if registry.contains(text) {
        ParsedCommand::NamedScript {
            name: text.to_string(),
        }
    } else {
        ParsedCommand::invalid(InvalidReason::UnrecognizedCommand(text.to_string()))
    }
}
