use serde::Serialize;
use time::OffsetDateTime;

use crate::events::EventOrigin;
use crate::state::record::{ConsentPreferences, ConsentSource, ConsentState};

/// Metadata describing why an audit entry is being written.
#[derive(Debug, Clone, Copy)]
pub struct AuditMeta<'a> {
    pub action: &'a str,
    pub storage_key: &'a str,
    pub consent_version: &'a str,
    pub origin: Option<EventOrigin>,
}

/// One flattened line for the host's audit log: the consent snapshot plus
/// the action metadata, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub action: String,
    pub storage_key: String,
    pub consent_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<EventOrigin>,
    pub consented: bool,
    pub preferences: ConsentPreferences,
    #[serde(with = "time::serde::rfc3339")]
    pub consent_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
    pub source: ConsentSource,
    pub library_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Flatten `state` and `meta` into one audit record. Total: works for the
/// minimal undecided state just as for a full decision.
pub fn build_audit_entry(
    state: &ConsentState,
    meta: AuditMeta<'_>,
    now: OffsetDateTime,
) -> AuditEntry {
    AuditEntry {
        action: meta.action.to_string(),
        storage_key: meta.storage_key.to_string(),
        consent_version: meta.consent_version.to_string(),
        origin: meta.origin,
        consented: state.record.consented,
        preferences: state.record.preferences.clone(),
        consent_date: state.record.consent_date,
        last_update: state.record.last_update,
        source: state.record.source,
        library_version: crate::LIBRARY_VERSION.to_string(),
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::config::ProjectCategoriesConfig;

    #[test]
    fn test_audit_entry_from_minimal_state() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let state = ConsentState::undecided(&ProjectCategoriesConfig::default(), now);
        let entry = build_audit_entry(
            &state,
            AuditMeta {
                action: "consent_reset",
                storage_key: "lgpd-consent__v1",
                consent_version: "1",
                origin: Some(EventOrigin::Reset),
            },
            now,
        );

        assert_eq!(entry.action, "consent_reset");
        assert!(!entry.consented);
        assert_eq!(entry.preferences, ConsentPreferences::new());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["storageKey"], "lgpd-consent__v1");
        assert_eq!(json["origin"], "reset");
        assert_eq!(json["libraryVersion"], crate::LIBRARY_VERSION);
    }
}
