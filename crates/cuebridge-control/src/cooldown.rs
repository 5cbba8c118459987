//! Global cooldown gate
//!
//! At most one event is accepted per cooldown window. Timestamps are whole
//! unix seconds.

/// Tracks the last accepted event and decides whether a new one may pass.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    last_event_unix: i64,
    cooldown_seconds: i64,
}

impl CooldownGate {
    /// Create a gate that has never seen an event
    pub fn new(cooldown_seconds: u64) -> Self {
        Self {
            last_event_unix: 0,
            cooldown_seconds: i64::try_from(cooldown_seconds).unwrap_or(i64::MAX),
        }
    }

    /// An event at `now` is allowed only strictly after the window has passed.
    pub fn allow(&self, now: i64) -> bool {
        now > self.last_event_unix.saturating_add(self.cooldown_seconds)
    }

    /// Mark an event at `now` as accepted
    pub fn record(&mut self, now: i64) {
        self.last_event_unix = now;
    }

    pub fn last_event(&self) -> i64 {
        self.last_event_unix
    }
}
