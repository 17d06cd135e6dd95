//! Developer-guidance diagnostics.
//!
//! Non-critical warnings (misconfigured categories, missing event sink,
//! blocked compliance toggles) are routed through an explicit, resettable
//! registry instead of module-level "already logged" statics, so tests can
//! reset it deterministically between runs. Guidance is emitted at most once
//! per key and is disabled by default in release builds.

use std::collections::HashSet;

/// Warn-once registry for developer guidance.
pub struct DiagnosticsRegistry {
    seen: HashSet<String>,
    enabled: bool,
}

impl Default for DiagnosticsRegistry {
    fn default() -> Self {
        Self::new(cfg!(debug_assertions))
    }
}

impl DiagnosticsRegistry {
    pub fn new(enabled: bool) -> Self {
        Self {
            seen: HashSet::new(),
            enabled,
        }
    }

    /// Emit a guidance warning once per `key`. Returns `true` if emitted.
    pub fn warn_once(&mut self, key: &str, message: &str) -> bool {
        if !self.enabled || !self.seen.insert(key.to_string()) {
            return false;
        }
        tracing::warn!(key = %key, "{message}");
        true
    }

    /// Emit a low-severity note once per `key`. Returns `true` if emitted.
    pub fn note_once(&mut self, key: &str, message: &str) -> bool {
        if !self.enabled || !self.seen.insert(key.to_string()) {
            return false;
        }
        tracing::debug!(key = %key, "{message}");
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forget all emitted keys so guidance can fire again.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
