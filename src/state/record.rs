use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::categories::config::ProjectCategoriesConfig;
use crate::categories::definition::NECESSARY_ID;

/// Which surface produced the current consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentSource {
    Banner,
    Modal,
    Programmatic,
}

/// Per-category consent decisions.
///
/// An ordered map from category id to granted/denied, with the compliance
/// invariant baked into the type: `necessary` is present and `true` in every
/// value constructed through this API, and [`set`](Self::set) refuses to
/// touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentPreferences {
    entries: BTreeMap<String, bool>,
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsentPreferences {
    /// The minimal valid preference set: `{necessary: true}`.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(NECESSARY_ID.to_string(), true);
        Self { entries }
    }

    /// Adopt a raw map, forcing `necessary = true` regardless of input.
    pub fn from_map(map: BTreeMap<String, bool>) -> Self {
        let mut entries = map;
        entries.insert(NECESSARY_ID.to_string(), true);
        Self { entries }
    }

    /// Set a category decision. Returns `false` (and changes nothing) when
    /// the caller tries to touch `necessary`; the caller is responsible for
    /// signaling the blocked attempt.
    pub fn set(&mut self, id: &str, value: bool) -> bool {
        if id == NECESSARY_ID {
            return false;
        }
        self.entries.insert(id.to_string(), value);
        true
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// Whether content gated on `id` may run. Absent categories are denied.
    pub fn is_allowed(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted ids whose decision differs between `self` and `other`,
    /// including categories present on only one side.
    pub fn diff(&self, other: &Self) -> Vec<String> {
        let mut changed = Vec::new();
        for (id, value) in &self.entries {
            if other.entries.get(id) != Some(value) {
                changed.push(id.clone());
            }
        }
        for id in other.entries.keys() {
            if !self.entries.contains_key(id) {
                changed.push(id.clone());
            }
        }
        changed.sort();
        changed.dedup();
        changed
    }

    /// Re-assert the invariant after deserialization of untrusted input.
    pub fn normalized(mut self) -> Self {
        self.entries.insert(NECESSARY_ID.to_string(), true);
        self
    }
}

/// The persisted consent snapshot. Field names match the JSON stored in the
/// cookie cell (camelCase, RFC 3339 timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub schema_version: String,
    pub consented: bool,
    pub preferences: ConsentPreferences,
    #[serde(with = "time::serde::rfc3339")]
    pub consent_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
    pub source: ConsentSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_config_snapshot: Option<ProjectCategoriesConfig>,
}

/// In-memory consent state: the record plus the transient modal flag.
/// `is_modal_open` is never persisted and is forced to `false` on hydration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentState {
    pub record: ConsentRecord,
    pub is_modal_open: bool,
}

impl ConsentState {
    /// Fresh undecided state with the skeleton preferences for `config`.
    pub fn undecided(config: &ProjectCategoriesConfig, now: OffsetDateTime) -> Self {
        let preferences = crate::categories::registry::build_initial_preferences(config, false);
        Self {
            record: ConsentRecord {
                schema_version: crate::storage::codec::SCHEMA_VERSION.to_string(),
                consented: false,
                preferences,
                consent_date: now,
                last_update: now,
                source: ConsentSource::Banner,
                project_config_snapshot: None,
            },
            is_modal_open: false,
        }
    }

    pub fn preferences(&self) -> &ConsentPreferences {
        &self.record.preferences
    }
}
