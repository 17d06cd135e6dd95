//! Consent event shapes and sinks.
//!
//! Two events describe the session to the outside world: `consent_initialized`
//! fires once after hydration with a full category snapshot, and
//! `consent_updated` fires on every later preference change with the snapshot
//! plus the list of changed categories and the origin of the change. Both
//! carry the library version and an RFC 3339 timestamp.
//!
//! Emission is best-effort: hosts push events into an ordered sink (a page
//! data layer, an analytics queue, a test buffer). A missing sink skips
//! emission; it never fails the state transition that produced the event.

use serde::Serialize;
use time::OffsetDateTime;

use crate::state::record::{ConsentPreferences, ConsentSource, ConsentState};

/// Where a preference change came from, as reported on `consent_updated`.
/// Programmatic changes surface as `reset` — the only programmatic
/// transition the engine performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrigin {
    Banner,
    Modal,
    Reset,
}

impl From<ConsentSource> for EventOrigin {
    fn from(source: ConsentSource) -> Self {
        match source {
            ConsentSource::Banner => EventOrigin::Banner,
            ConsentSource::Modal => EventOrigin::Modal,
            ConsentSource::Programmatic => EventOrigin::Reset,
        }
    }
}

/// A structured consent event, tagged on the wire by its `event` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum ConsentEvent {
    #[serde(rename = "consent_initialized")]
    Initialized {
        consented: bool,
        categories: ConsentPreferences,
        library_version: String,
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
    },
    #[serde(rename = "consent_updated")]
    Updated {
        consented: bool,
        categories: ConsentPreferences,
        changed_categories: Vec<String>,
        origin: EventOrigin,
        library_version: String,
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
    },
}

impl ConsentEvent {
    pub fn initialized(state: &ConsentState, now: OffsetDateTime) -> Self {
        ConsentEvent::Initialized {
            consented: state.record.consented,
            categories: state.record.preferences.clone(),
            library_version: crate::LIBRARY_VERSION.to_string(),
            timestamp: now,
        }
    }

    pub fn updated(
        state: &ConsentState,
        changed_categories: Vec<String>,
        origin: EventOrigin,
        now: OffsetDateTime,
    ) -> Self {
        ConsentEvent::Updated {
            consented: state.record.consented,
            categories: state.record.preferences.clone(),
            changed_categories,
            origin,
            library_version: crate::LIBRARY_VERSION.to_string(),
            timestamp: now,
        }
    }
}

/// An ordered, append-only destination for consent events.
pub trait EventSink {
    fn push(&mut self, event: &ConsentEvent);
}

/// Vec-backed sink for tests and in-process consumers.
#[derive(Debug, Default)]
pub struct BufferedSink {
    events: Vec<ConsentEvent>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ConsentEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for BufferedSink {
    fn push(&mut self, event: &ConsentEvent) {
        self.events.push(event.clone());
    }
}

// Shared handle so a host (or test) can keep inspecting a sink it handed to
// the engine.
impl<T: EventSink> EventSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn push(&mut self, event: &ConsentEvent) {
        self.borrow_mut().push(event);
    }
}
