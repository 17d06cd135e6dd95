//! The consent state machine.
//!
//! A small reducer over tagged actions, wrapped by an engine that owns the
//! in-memory state and orchestrates side effects (persistence, events,
//! callbacks) through an explicit post-transition effect queue.
//!
//! | Piece | Responsibility |
//! |-------|----------------|
//! | [`record`] | [`ConsentPreferences`](record::ConsentPreferences), [`ConsentRecord`](record::ConsentRecord), [`ConsentState`](record::ConsentState) |
//! | [`actions`] | Tagged [`ConsentAction`](actions::ConsentAction) set |
//! | [`reducer`] | Pure transition function enforcing the `necessary` invariant |
//! | [`effects`] | Post-transition effect queue entries |
//! | [`engine`] | Orchestrator: hydration, persistence gating, callbacks |

pub mod actions;
pub mod effects;
pub mod engine;
pub mod record;
pub mod reducer;
