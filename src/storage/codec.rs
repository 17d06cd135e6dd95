//! Versioned JSON codec for the persisted consent record.
//!
//! Decoding is deliberately unforgiving about versions: a record whose
//! `schemaVersion` differs from [`SCHEMA_VERSION`] — older *or* newer — is
//! invalidated, not upgraded. The single exception is a record with no
//! `schemaVersion` field at all, which predates versioning and is migrated
//! in place. Every failure degrades to `None` ("no prior consent"); nothing
//! in this module panics or propagates an error to the host.

use std::collections::BTreeMap;

use cookie::Cookie;
use serde_json::Value;
use time::OffsetDateTime;

use crate::base::error::ConsentError;
use crate::categories::config::ProjectCategoriesConfig;
use crate::state::record::{ConsentPreferences, ConsentRecord, ConsentSource, ConsentState};
use crate::storage::options::ConsentCookieOptions;

/// Schema version written by this build. Records carrying anything else are
/// rejected on decode.
pub const SCHEMA_VERSION: &str = "1.0";

/// Serialize `state` into the storage cell named `storage_key`.
///
/// Forces `necessary = true`, preserves the prior `consentDate`, stamps
/// `lastUpdate = now`, and embeds a snapshot of the category config so the
/// decision can later be inspected against what it was given for.
pub fn encode(
    state: &ConsentState,
    config: &ProjectCategoriesConfig,
    options: &ConsentCookieOptions,
    source: ConsentSource,
    secure_origin: bool,
    now: OffsetDateTime,
    storage_key: &str,
) -> Cookie<'static> {
    let record = ConsentRecord {
        schema_version: SCHEMA_VERSION.to_string(),
        consented: state.record.consented,
        preferences: state.record.preferences.clone().normalized(),
        consent_date: state.record.consent_date,
        last_update: now,
        source,
        project_config_snapshot: Some(config.clone()),
    };
    let value = serde_json::to_string(&record).unwrap_or_else(|e| {
        tracing::error!(error = %e, "consent record failed to serialize; storing empty object");
        "{}".to_string()
    });
    options.build_cookie(storage_key, value, secure_origin)
}

/// Deserialize a stored cell value. `None` means "no prior consent": the
/// value was missing, malformed, or carried a foreign schema version.
pub fn decode(raw: Option<&str>) -> Option<ConsentState> {
    match decode_strict(raw) {
        Ok(state) => Some(state),
        Err(err) => {
            if !matches!(err, ConsentError::MissingValue) {
                tracing::debug!(error = %err, "ignoring stored consent value");
            }
            None
        }
    }
}

/// Decode with the failure reason preserved, for logging and tests.
pub fn decode_strict(raw: Option<&str>) -> Result<ConsentState, ConsentError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(ConsentError::MissingValue),
    };

    let value: Value =
        serde_json::from_str(raw).map_err(|e| ConsentError::malformed_payload(e.to_string()))?;
    let object = value.as_object().ok_or(ConsentError::UnexpectedShape)?;

    match object.get("schemaVersion") {
        Some(Value::String(version)) if version == SCHEMA_VERSION => {
            let record: ConsentRecord = serde_json::from_value(value.clone())
                .map_err(|e| ConsentError::malformed_payload(e.to_string()))?;
            Ok(ConsentState {
                record: ConsentRecord {
                    preferences: record.preferences.normalized(),
                    ..record
                },
                is_modal_open: false,
            })
        }
        Some(version) => Err(ConsentError::SchemaVersionMismatch {
            found: match version {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            current: SCHEMA_VERSION.to_string(),
        }),
        None => Ok(migrate_legacy(object)),
    }
}

/// Upgrade a pre-versioning record: `consented` coerced to bool (anything
/// but a JSON bool reads as `false`), preferences defaulted to the minimal
/// set when absent or malformed, fresh timestamps, banner source. Total:
/// every malformed field has a defined fallback, so migration itself can
/// never fail.
fn migrate_legacy(object: &serde_json::Map<String, Value>) -> ConsentState {
    let consented = object
        .get("consented")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let preferences = object
        .get("preferences")
        .cloned()
        .and_then(|v| serde_json::from_value::<BTreeMap<String, bool>>(v).ok())
        .map(ConsentPreferences::from_map)
        .unwrap_or_default();

    let now = OffsetDateTime::now_utc();
    tracing::debug!(consented, "migrated legacy unversioned consent record");

    ConsentState {
        record: ConsentRecord {
            schema_version: SCHEMA_VERSION.to_string(),
            consented,
            preferences,
            consent_date: now,
            last_update: now,
            source: ConsentSource::Banner,
            project_config_snapshot: None,
        },
        is_modal_open: false,
    }
}
