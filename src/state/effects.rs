use crate::events::ConsentEvent;
use crate::state::record::ConsentSource;
use crate::storage::audit::AuditEntry;

/// Cosmetic delay hint for user-facing decision callbacks, in milliseconds.
/// Lets a closing banner/modal finish its transition before the host reacts.
/// The engine invokes callbacks synchronously; hosts that want the delay
/// schedule it themselves from the hint.
pub const COSMETIC_CALLBACK_DELAY_MS: u32 = 150;

/// Old and new storage keys of a forced re-consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub old_key: String,
    pub new_key: String,
}

/// What the host's `on_consent_version_change` callback receives: the key
/// change plus a one-shot reset handle. The engine has already cleared both
/// cells and reset the state by the time the callback runs; a host that
/// restores or derives its own consent-adjacent state can arm the handle via
/// [`request_reset`](Self::request_reset) and the engine runs one more reset
/// cycle after the callback returns.
#[derive(Debug)]
pub struct VersionChangeNotice {
    pub change: VersionChange,
    reset_requested: bool,
}

impl VersionChangeNotice {
    pub fn new(change: VersionChange) -> Self {
        Self {
            change,
            reset_requested: false,
        }
    }

    /// Ask the engine for a further reset once the callback returns.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }
}

/// One entry in the post-transition effect queue.
///
/// The reducer is pure; everything observable outside the state value is an
/// `Effect` built by the engine after a transition is accepted and executed
/// immediately afterwards, in order. This keeps side effects inspectable and
/// decoupled from any UI framework's scheduling.
#[derive(Debug)]
pub enum Effect {
    /// Write the current state to the storage cell.
    Persist { source: ConsentSource },
    /// Delete the storage cell at `key`.
    RemoveStoredRecord { key: String },
    /// Push an event to the configured sink, if any.
    Emit(ConsentEvent),
    /// Hand an entry to the host's audit log callback.
    Audit(AuditEntry),
    /// One-time "the visitor has decided" notification.
    NotifyConsentGiven { delay_ms: u32 },
    /// The modal's save action completed.
    NotifyPreferencesSaved { delay_ms: u32 },
    /// Hydration finished (with or without a stored record).
    NotifyInit,
    /// Post-hydration preference delta for the host.
    NotifyConsentChange { changed: Vec<String> },
    /// Storage key rotated; a forced re-consent was performed.
    NotifyVersionChange(VersionChange),
}
