use thiserror::Error;

/// Failure codes for consent decoding and project configuration.
///
/// Decode errors never reach the host as `Err` values: the public decode
/// surface degrades to `None` ("no prior consent") and the code is only
/// used for structured logging. Configuration errors are collected by
/// [`validate_config`](crate::categories::registry::validate_config) and
/// surfaced as a list, never thrown.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConsentError {
    // Decode errors
    #[error("stored consent value is missing")]
    MissingValue,
    #[error("stored consent value is not valid JSON: {reason}")]
    MalformedPayload { reason: String },
    #[error("stored consent value is not a JSON object")]
    UnexpectedShape,
    #[error("unsupported consent schema version {found:?} (current is {current:?})")]
    SchemaVersionMismatch { found: String, current: String },

    // Configuration errors
    #[error("unknown category {id:?} in enabledCategories (not a built-in category)")]
    UnknownEnabledCategory { id: String },
    #[error("category \"necessary\" must not be listed in enabledCategories (it is always included)")]
    NecessaryExplicitlyEnabled,
    #[error("duplicate category id {id:?} across enabled and custom categories")]
    DuplicateCategory { id: String },
    #[error("custom category with blank id is ignored")]
    BlankCustomCategoryId,
    #[error("custom category must not redeclare \"necessary\"; entry is ignored")]
    NecessaryRedeclared,
}

impl ConsentError {
    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        ConsentError::MalformedPayload {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings_are_human_readable() {
        let err = ConsentError::UnknownEnabledCategory {
            id: "telemetry".to_string(),
        };
        assert!(err.to_string().contains("telemetry"));

        let err = ConsentError::SchemaVersionMismatch {
            found: "0.9".to_string(),
            current: "1.0".to_string(),
        };
        assert!(err.to_string().contains("0.9"));
        assert!(err.to_string().contains("1.0"));
    }
}
