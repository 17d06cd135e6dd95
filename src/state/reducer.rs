//! Pure consent transitions.
//!
//! `reduce` computes the next state from the current one and an action; it
//! performs no I/O (persistence and event emission are effects built by the
//! engine afterwards). Every branch upholds the compliance invariant that
//! `preferences.necessary == true`.

use time::OffsetDateTime;

use crate::categories::config::ProjectCategoriesConfig;
use crate::categories::definition::NECESSARY_ID;
use crate::categories::registry;
use crate::state::actions::ConsentAction;
use crate::state::record::{ConsentSource, ConsentState};

/// Apply `action` to `state` under `config`, stamped with `now`.
pub fn reduce(
    state: &ConsentState,
    action: &ConsentAction,
    config: &ProjectCategoriesConfig,
    now: OffsetDateTime,
) -> ConsentState {
    match action {
        ConsentAction::AcceptAll => {
            let mut next = state.clone();
            next.record.preferences = registry::build_initial_preferences(config, true);
            mark_decided(&mut next, ConsentSource::Banner, now);
            next.is_modal_open = false;
            next
        }
        ConsentAction::RejectAll => {
            let mut next = state.clone();
            next.record.preferences = registry::build_initial_preferences(config, false);
            mark_decided(&mut next, ConsentSource::Banner, now);
            next
        }
        ConsentAction::SetCategory { id, value } => {
            if id == NECESSARY_ID {
                tracing::warn!(
                    category = %id,
                    attempted = value,
                    "blocked attempt to toggle the necessary category; it is always granted"
                );
                return state.clone();
            }
            let mut next = state.clone();
            next.record.preferences.set(id, *value);
            next.record.last_update = now;
            next
        }
        ConsentAction::SetPreferences(prefs) => {
            let mut next = state.clone();
            next.record.preferences = registry::reconcile_preferences(prefs, config);
            mark_decided(&mut next, ConsentSource::Modal, now);
            next.is_modal_open = false;
            next
        }
        ConsentAction::OpenModal => {
            let mut next = state.clone();
            next.is_modal_open = true;
            next
        }
        ConsentAction::CloseModal => {
            let mut next = state.clone();
            next.record.source = ConsentSource::Modal;
            next.record.last_update = now;
            next.is_modal_open = false;
            next
        }
        ConsentAction::Reset => {
            let mut next = ConsentState::undecided(config, now);
            next.record.source = ConsentSource::Programmatic;
            next
        }
        ConsentAction::Hydrate(saved) => {
            let mut next = saved.clone();
            next.record.preferences =
                registry::reconcile_preferences(&saved.record.preferences, config);
            next.is_modal_open = false;
            next
        }
    }
}

/// Stamp a decision: `consented = true`, source and timestamps updated.
/// `consent_date` is set only by the first decision and preserved afterwards.
fn mark_decided(state: &mut ConsentState, source: ConsentSource, now: OffsetDateTime) {
    if !state.record.consented {
        state.record.consent_date = now;
    }
    state.record.consented = true;
    state.record.source = source;
    state.record.last_update = now;
}
