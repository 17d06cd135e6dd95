//! Consent-gated rendering and script loading.
//!
//! Small pure predicates over the current preference set: content tied to a
//! category runs only while that category is granted. No caching — the
//! preference map is tiny and changes rarely, so correctness wins over
//! micro-optimization.

use crate::state::record::ConsentPreferences;

/// Whether content gated on `category_id` may render or execute now.
/// Unknown categories are denied; `necessary` is always allowed.
pub fn is_category_allowed(preferences: &ConsentPreferences, category_id: &str) -> bool {
    preferences.is_allowed(category_id)
}

/// Run `f` only if `category_id` is currently granted.
pub fn gate<T>(
    preferences: &ConsentPreferences,
    category_id: &str,
    f: impl FnOnce() -> T,
) -> Option<T> {
    if preferences.is_allowed(category_id) {
        Some(f())
    } else {
        None
    }
}

/// A script whose injection is keyed to a consent category. The host asks
/// [`should_load`](Self::should_load) on every preference change and injects
/// `src` once it answers `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptGate {
    pub category_id: String,
    pub src: String,
}

impl ScriptGate {
    pub fn new(category_id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            src: src.into(),
        }
    }

    pub fn should_load(&self, preferences: &ConsentPreferences) -> bool {
        preferences.is_allowed(&self.category_id)
    }
}
