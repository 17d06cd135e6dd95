//! The consent engine: owns the in-memory state and orchestrates every side
//! effect around the pure reducer.
//!
//! Lifecycle: construction hydrates from the storage cell (unless an explicit
//! initial state is supplied), reconciles preferences against the current
//! config, forces the modal closed, and emits the one-time
//! `consent_initialized` event. Each `dispatch` then runs the reducer and an
//! explicit effect queue: persistence (only once `consented == true`),
//! event/audit emission for post-hydration preference changes, and host
//! callbacks. Rotating the storage key (namespace or consent-version bump)
//! is a forced re-consent: both cells are cleared, the state resets, and
//! persistence is suppressed for one cycle so no stale record is written.

use time::OffsetDateTime;

use crate::base::diagnostics::DiagnosticsRegistry;
use crate::categories::config::ProjectCategoriesConfig;
use crate::events::{ConsentEvent, EventOrigin, EventSink};
use crate::state::actions::ConsentAction;
use crate::state::effects::{
    Effect, VersionChange, VersionChangeNotice, COSMETIC_CALLBACK_DELAY_MS,
};
use crate::state::record::{ConsentPreferences, ConsentState};
use crate::state::reducer::reduce;
use crate::storage::audit::{build_audit_entry, AuditEntry, AuditMeta};
use crate::storage::cell::ConsentStorage;
use crate::storage::codec;
use crate::storage::key::{build_storage_key, DEFAULT_VERSION};
use crate::storage::options::ConsentCookieOptions;

/// Host callbacks, all optional. Invoked synchronously after the state
/// transition that triggered them has been committed.
#[derive(Default)]
pub struct ConsentCallbacks {
    /// Fired once per session when the visitor first decides. The second
    /// argument is the cosmetic delay hint in milliseconds: how long a host
    /// should wait before reacting, so a closing banner can finish its
    /// transition.
    pub on_consent_given: Option<Box<dyn FnMut(&ConsentState, u32)>>,
    /// Fired when the preferences modal's save action completes, with the
    /// same delay hint as `on_consent_given`.
    pub on_preferences_saved: Option<Box<dyn FnMut(&ConsentState, u32)>>,
    /// Fired once after hydration, decided or not.
    pub on_consent_init: Option<Box<dyn FnMut(&ConsentState)>>,
    /// Fired on every post-hydration preference change with the delta.
    pub on_consent_change: Option<Box<dyn FnMut(&ConsentState, &[String])>>,
    /// Fired when a storage-key rotation forced a re-consent. The notice
    /// carries the old/new keys and a one-shot reset handle the engine
    /// honors after the callback returns.
    pub on_consent_version_change: Option<Box<dyn FnMut(&mut VersionChangeNotice)>>,
    /// Receives every audit entry the engine builds.
    pub on_audit_log: Option<Box<dyn FnMut(&AuditEntry)>>,
}

/// Engine construction options.
pub struct EngineOptions {
    /// Storage-key namespace; defaults to the library name.
    pub namespace: Option<String>,
    /// Consent version; bumping it forces re-consent. Defaults to `"1"`.
    pub version: Option<String>,
    pub cookie: ConsentCookieOptions,
    /// Whether the page is served over HTTPS; drives the cell's Secure flag
    /// when the cookie options leave it on auto.
    pub secure_origin: bool,
    /// Explicit initial state; skips hydration from storage when set.
    pub initial_state: Option<ConsentState>,
    /// Overrides the default (debug builds only) diagnostics gating.
    pub diagnostics_enabled: Option<bool>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            version: None,
            cookie: ConsentCookieOptions::default(),
            secure_origin: true,
            initial_state: None,
            diagnostics_enabled: None,
        }
    }
}

/// The consent state machine plus its orchestration shell.
pub struct ConsentEngine {
    config: ProjectCategoriesConfig,
    options: EngineOptions,
    storage: Box<dyn ConsentStorage>,
    sink: Option<Box<dyn EventSink>>,
    callbacks: ConsentCallbacks,
    diagnostics: DiagnosticsRegistry,
    state: ConsentState,
    storage_key: String,
    hydrated: bool,
    consent_given_fired: bool,
    suppress_next_persist: bool,
    reset_requested: bool,
}

impl ConsentEngine {
    /// Build the engine and hydrate it. Configuration problems are surfaced
    /// as developer diagnostics; they never fail construction.
    pub fn new(
        config: ProjectCategoriesConfig,
        options: EngineOptions,
        storage: Box<dyn ConsentStorage>,
    ) -> Self {
        Self::with_parts(config, options, storage, None, ConsentCallbacks::default())
    }

    pub fn with_parts(
        config: ProjectCategoriesConfig,
        mut options: EngineOptions,
        storage: Box<dyn ConsentStorage>,
        sink: Option<Box<dyn EventSink>>,
        callbacks: ConsentCallbacks,
    ) -> Self {
        let diagnostics_enabled = options
            .diagnostics_enabled
            .unwrap_or(cfg!(debug_assertions));
        let mut diagnostics = DiagnosticsRegistry::new(diagnostics_enabled);
        for error in config.validate() {
            diagnostics.warn_once(&format!("config:{error}"), &error.to_string());
        }

        let storage_key =
            build_storage_key(options.namespace.as_deref(), options.version.as_deref());
        let now = OffsetDateTime::now_utc();
        let initial_override = options.initial_state.take();

        let mut engine = Self {
            state: ConsentState::undecided(&config, now),
            config,
            options,
            storage,
            sink,
            callbacks,
            diagnostics,
            storage_key,
            hydrated: false,
            consent_given_fired: false,
            suppress_next_persist: false,
            reset_requested: false,
        };
        engine.hydrate(initial_override, now);
        engine
    }

    /// Hydrate from the override or the storage cell; mark hydrated either
    /// way and announce the session.
    fn hydrate(&mut self, initial_override: Option<ConsentState>, now: OffsetDateTime) {
        let saved = initial_override
            .or_else(|| codec::decode(self.storage.read(&self.storage_key).as_deref()));

        if let Some(saved) = saved {
            self.state = reduce(&self.state, &ConsentAction::Hydrate(saved), &self.config, now);
        }
        self.hydrated = true;
        // A decision restored from storage was given in a past session; the
        // one-time callback only covers decisions made in this one.
        self.consent_given_fired = self.state.record.consented;

        let effects = vec![
            Effect::Emit(ConsentEvent::initialized(&self.state, now)),
            Effect::Audit(self.audit_entry("consent_initialized", None, now)),
            Effect::NotifyInit,
        ];
        self.run_effects(effects, now);
    }

    pub fn state(&self) -> &ConsentState {
        &self.state
    }

    pub fn preferences(&self) -> &ConsentPreferences {
        self.state.preferences()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn config(&self) -> &ProjectCategoriesConfig {
        &self.config
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticsRegistry {
        &mut self.diagnostics
    }

    /// Run one action through the reducer, then execute the resulting
    /// effect queue. No action fails; a rejected transition (for example a
    /// `necessary` toggle) simply produces no effects.
    pub fn dispatch(&mut self, action: ConsentAction) {
        let now = OffsetDateTime::now_utc();
        let prev = self.state.clone();
        let next = reduce(&prev, &action, &self.config, now);

        if next == prev && !matches!(action, ConsentAction::Reset) {
            if let ConsentAction::SetCategory { id, .. } = &action {
                self.diagnostics.warn_once(
                    &format!("blocked-toggle:{id}"),
                    "a UI control is wired to a non-togglable category; hide or disable it",
                );
            }
            return;
        }
        self.state = next;

        let effects = self.effects_for(&prev, &action, now);
        self.run_effects(effects, now);
    }

    /// Forget the stored decision and return to the undecided state.
    pub fn reset(&mut self) {
        self.dispatch(ConsentAction::Reset);
    }

    /// Re-key storage after a namespace or consent-version change. When the
    /// derived key actually changes this is a forced re-consent: both the old
    /// and new cells are removed, the state resets, persistence skips one
    /// cycle, and `on_consent_version_change` fires with both keys. Returns
    /// whether a rotation happened.
    pub fn rotate_storage_key(
        &mut self,
        namespace: Option<&str>,
        version: Option<&str>,
    ) -> bool {
        let new_key = build_storage_key(namespace, version);
        if new_key == self.storage_key {
            return false;
        }

        let change = VersionChange {
            old_key: std::mem::replace(&mut self.storage_key, new_key.clone()),
            new_key,
        };
        self.options.namespace = namespace.map(|s| s.to_string());
        self.options.version = version.map(|s| s.to_string());

        let now = OffsetDateTime::now_utc();
        let path = self.options.cookie.path.clone();
        let domain = self.options.cookie.domain.clone();
        self.storage.remove(&change.old_key, &path, domain.as_deref());
        self.storage.remove(&change.new_key, &path, domain.as_deref());

        self.suppress_next_persist = true;
        self.dispatch(ConsentAction::Reset);
        self.run_effects(vec![Effect::NotifyVersionChange(change)], now);
        true
    }

    /// Build the effect queue for an accepted transition.
    fn effects_for(
        &mut self,
        prev: &ConsentState,
        action: &ConsentAction,
        now: OffsetDateTime,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();

        if matches!(action, ConsentAction::Reset) {
            effects.push(Effect::RemoveStoredRecord {
                key: self.storage_key.clone(),
            });
        }

        if self.suppress_next_persist {
            self.suppress_next_persist = false;
        } else if self.state.record.consented {
            effects.push(Effect::Persist {
                source: self.state.record.source,
            });
        }

        let preferences_changed = prev.record.preferences != self.state.record.preferences;
        let post_hydration_change =
            preferences_changed && !matches!(action, ConsentAction::Hydrate(_));
        if post_hydration_change {
            let changed = prev.record.preferences.diff(&self.state.record.preferences);
            let origin = EventOrigin::from(self.state.record.source);
            effects.push(Effect::Emit(ConsentEvent::updated(
                &self.state,
                changed.clone(),
                origin,
                now,
            )));
            effects.push(Effect::Audit(self.audit_entry(
                "consent_updated",
                Some(origin),
                now,
            )));
            effects.push(Effect::NotifyConsentChange { changed });
        }

        if !prev.record.consented && self.state.record.consented && !self.consent_given_fired {
            self.consent_given_fired = true;
            effects.push(Effect::NotifyConsentGiven {
                delay_ms: COSMETIC_CALLBACK_DELAY_MS,
            });
        }

        if matches!(action, ConsentAction::SetPreferences(_)) {
            effects.push(Effect::NotifyPreferencesSaved {
                delay_ms: COSMETIC_CALLBACK_DELAY_MS,
            });
        }

        effects
    }

    /// Execute queued effects in order.
    fn run_effects(&mut self, effects: Vec<Effect>, now: OffsetDateTime) {
        for effect in effects {
            match effect {
                Effect::Persist { source } => {
                    let cookie = codec::encode(
                        &self.state,
                        &self.config,
                        &self.options.cookie,
                        source,
                        self.options.secure_origin,
                        now,
                        &self.storage_key,
                    );
                    self.storage.write(cookie);
                }
                Effect::RemoveStoredRecord { key } => {
                    let path = self.options.cookie.path.clone();
                    let domain = self.options.cookie.domain.clone();
                    self.storage.remove(&key, &path, domain.as_deref());
                }
                Effect::Emit(event) => match &mut self.sink {
                    Some(sink) => sink.push(&event),
                    None => {
                        self.diagnostics.note_once(
                            "missing-sink",
                            "no event sink configured; consent events are dropped",
                        );
                    }
                },
                Effect::Audit(entry) => {
                    if let Some(cb) = &mut self.callbacks.on_audit_log {
                        cb(&entry);
                    }
                }
                Effect::NotifyConsentGiven { delay_ms } => {
                    if let Some(cb) = &mut self.callbacks.on_consent_given {
                        cb(&self.state, delay_ms);
                    }
                }
                Effect::NotifyPreferencesSaved { delay_ms } => {
                    if let Some(cb) = &mut self.callbacks.on_preferences_saved {
                        cb(&self.state, delay_ms);
                    }
                }
                Effect::NotifyInit => {
                    if let Some(cb) = &mut self.callbacks.on_consent_init {
                        cb(&self.state);
                    }
                }
                Effect::NotifyConsentChange { changed } => {
                    if let Some(cb) = &mut self.callbacks.on_consent_change {
                        cb(&self.state, &changed);
                    }
                }
                Effect::NotifyVersionChange(change) => {
                    if let Some(cb) = &mut self.callbacks.on_consent_version_change {
                        let mut notice = VersionChangeNotice::new(change);
                        cb(&mut notice);
                        if notice.reset_requested() {
                            self.reset_requested = true;
                        }
                    }
                }
            }
        }

        // A reset handle armed inside a callback is honored only after the
        // whole queue has run, so the extra cycle observes a settled state.
        if self.reset_requested {
            self.reset_requested = false;
            self.dispatch(ConsentAction::Reset);
        }
    }

    fn audit_entry(
        &self,
        action: &str,
        origin: Option<EventOrigin>,
        now: OffsetDateTime,
    ) -> AuditEntry {
        let consent_version = self.options.version.as_deref().unwrap_or(DEFAULT_VERSION);
        build_audit_entry(
            &self.state,
            AuditMeta {
                action,
                storage_key: &self.storage_key,
                consent_version,
                origin,
            },
            now,
        )
    }
}
