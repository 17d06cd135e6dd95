//! # lgpd-consent
//!
//! A headless LGPD/ANPD cookie-consent state core for Rust.
//!
//! `lgpd-consent` implements the state-machine and data-integrity layer of a
//! cookie-consent manager: a versioned cookie codec with legacy migration,
//! category reconciliation against project configuration, a reducer-based
//! consent state machine with an explicit post-transition effect queue, and
//! structured audit/event emission. It renders nothing — the host application
//! (web framework, WASM shell, server-side renderer) drives it through a
//! typed API and owns the banner/modal presentation.
//!
//! ## Features
//!
//! - **Versioned persistence**: JSON consent record with a schema-version
//!   gate and migration of legacy unversioned records
//! - **Category reconciliation**: stale categories removed from the project
//!   configuration never leak back into active state
//! - **Compliance invariant**: the `necessary` category is `true` in every
//!   reachable state, enforced by every transition
//! - **Forced re-consent**: rotating the storage key (namespace/version bump)
//!   clears old state and restarts the decision flow
//! - **Headless environments**: all storage operations degrade to safe
//!   no-ops when no browser-like cookie jar is available
//!
//! ## Quick Start
//!
//! ```rust
//! use lgpd_consent::categories::config::ProjectCategoriesConfig;
//! use lgpd_consent::state::engine::{ConsentEngine, EngineOptions};
//! use lgpd_consent::state::actions::ConsentAction;
//! use lgpd_consent::storage::cell::MemoryCookieJar;
//!
//! let config = ProjectCategoriesConfig::with_enabled(&["analytics", "marketing"]);
//! let mut engine = ConsentEngine::new(
//!     config,
//!     EngineOptions::default(),
//!     Box::new(MemoryCookieJar::new()),
//! );
//!
//! engine.dispatch(ConsentAction::AcceptAll);
//! assert!(engine.state().record.consented);
//! assert!(engine.preferences().is_allowed("analytics"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and developer diagnostics
//! - [`categories`] - Built-in category table, project config, registry
//! - [`storage`] - Storage keys, cookie codec, storage-cell abstraction, audit
//! - [`state`] - Consent record, actions, reducer, effects, engine
//! - [`events`] - Initialized/updated event shapes and sinks
//! - [`gating`] - Consent-gated rendering and script-loading predicates
//!
//! ## Compliance
//!
//! This library enforces several LGPD-oriented behaviors:
//! - Attempts to disable the `necessary` category are corrected and signaled,
//!   never applied
//! - Schema-version mismatches invalidate stored consent rather than
//!   reinterpreting it
//! - Nothing in the decode path panics: malformed storage degrades to
//!   "no prior decision"

pub mod base;
pub mod categories;
pub mod events;
pub mod gating;
pub mod state;
pub mod storage;

/// Version tag stamped onto emitted events and audit entries.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
