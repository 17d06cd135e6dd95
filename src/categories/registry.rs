//! Preference skeletons, reconciliation, listing, and config validation.
//!
//! Reconciliation is the data-integrity heart of the crate: a preference set
//! loaded from storage is filtered down to the categories the *current*
//! configuration declares, so a category removed from the project since the
//! visitor's last decision can never leak back into active state.

use std::collections::HashSet;

use crate::base::error::ConsentError;
use crate::categories::config::ProjectCategoriesConfig;
use crate::categories::definition::{BuiltinCategory, CategoryDefinition, NECESSARY_ID};
use crate::state::record::ConsentPreferences;

/// Build the preference skeleton for a config: `necessary = true` plus one
/// entry per recognized enabled built-in and per valid custom category, each
/// set to `default_value`.
pub fn build_initial_preferences(
    config: &ProjectCategoriesConfig,
    default_value: bool,
) -> ConsentPreferences {
    let mut prefs = ConsentPreferences::new();
    for id in &config.enabled_categories {
        if BuiltinCategory::from_id(id).is_some() {
            prefs.set(id, default_value);
        }
    }
    for custom in config.valid_custom_categories() {
        prefs.set(&custom.id, default_value);
    }
    prefs
}

/// Filter `saved` down to the categories `config` currently declares.
///
/// Starts from `{necessary: true}` and copies over only keys present in
/// `saved` *and* declared by `config`; everything else is dropped.
/// Idempotent: reconciling an already-reconciled set is a no-op.
pub fn reconcile_preferences(
    saved: &ConsentPreferences,
    config: &ProjectCategoriesConfig,
) -> ConsentPreferences {
    let mut prefs = ConsentPreferences::new();
    for (id, value) in saved.iter() {
        if id != NECESSARY_ID && config.declares(id) {
            prefs.set(id, value);
        }
    }
    prefs
}

/// All category definitions for a config: `necessary` first, then enabled
/// built-ins in config order (duplicates and unrecognized ids skipped), then
/// valid custom categories as supplied.
pub fn list_all_categories(config: &ProjectCategoriesConfig) -> Vec<CategoryDefinition> {
    let mut out = vec![CategoryDefinition::necessary()];
    let mut seen: HashSet<&str> = HashSet::new();
    for id in &config.enabled_categories {
        if let Some(builtin) = BuiltinCategory::from_id(id) {
            if seen.insert(builtin.id()) {
                out.push(builtin.definition());
            }
        }
    }
    for custom in config.valid_custom_categories() {
        if seen.insert(custom.id.as_str()) {
            out.push(custom.clone());
        }
    }
    out
}

/// Validate a config, returning every problem found. An empty vec means the
/// config is clean. None of these are fatal at runtime — the registry already
/// ignores invalid entries defensively — but hosts should surface them during
/// development.
pub fn validate_config(config: &ProjectCategoriesConfig) -> Vec<ConsentError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for id in &config.enabled_categories {
        if id == NECESSARY_ID {
            errors.push(ConsentError::NecessaryExplicitlyEnabled);
            continue;
        }
        if BuiltinCategory::from_id(id).is_none() {
            errors.push(ConsentError::UnknownEnabledCategory { id: id.clone() });
        }
        if !seen.insert(id.as_str()) {
            errors.push(ConsentError::DuplicateCategory { id: id.clone() });
        }
    }

    for custom in &config.custom_categories {
        if custom.id.trim().is_empty() {
            errors.push(ConsentError::BlankCustomCategoryId);
            continue;
        }
        if custom.id == NECESSARY_ID {
            errors.push(ConsentError::NecessaryRedeclared);
            continue;
        }
        if !seen.insert(custom.id.as_str()) {
            errors.push(ConsentError::DuplicateCategory {
                id: custom.id.clone(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(id: &str) -> CategoryDefinition {
        CategoryDefinition {
            id: id.to_string(),
            display_name: id.to_string(),
            description: String::new(),
            essential: false,
            cookie_patterns: vec![],
        }
    }

    #[test]
    fn test_initial_preferences_skeleton() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec!["analytics".to_string(), "marketing".to_string()],
            custom_categories: vec![custom("chat")],
        };
        let prefs = build_initial_preferences(&config, false);

        assert_eq!(prefs.get(NECESSARY_ID), Some(true));
        assert_eq!(prefs.get("analytics"), Some(false));
        assert_eq!(prefs.get("marketing"), Some(false));
        assert_eq!(prefs.get("chat"), Some(false));
        assert_eq!(prefs.len(), 4);
    }

    #[test]
    fn test_initial_preferences_skips_unknown_and_invalid() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec!["analytics".to_string(), "telemetry".to_string()],
            custom_categories: vec![custom(""), custom(NECESSARY_ID)],
        };
        let prefs = build_initial_preferences(&config, true);

        assert_eq!(prefs.get("analytics"), Some(true));
        assert_eq!(prefs.get("telemetry"), None);
        assert_eq!(prefs.len(), 2);
        // The skeleton never flips necessary, whatever the default.
        assert_eq!(prefs.get(NECESSARY_ID), Some(true));
    }

    #[test]
    fn test_reconcile_drops_stale_keys() {
        let config = ProjectCategoriesConfig::with_enabled(&["analytics"]);
        let mut saved = ConsentPreferences::new();
        saved.set("analytics", true);
        saved.set("ghost", true);

        let reconciled = reconcile_preferences(&saved, &config);
        assert_eq!(reconciled.get(NECESSARY_ID), Some(true));
        assert_eq!(reconciled.get("analytics"), Some(true));
        assert_eq!(reconciled.get("ghost"), None);
        assert_eq!(reconciled.len(), 2);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec!["analytics".to_string(), "social".to_string()],
            custom_categories: vec![custom("chat")],
        };
        let mut saved = ConsentPreferences::new();
        saved.set("analytics", true);
        saved.set("social", false);
        saved.set("chat", true);
        saved.set("stale", true);

        let once = reconcile_preferences(&saved, &config);
        let twice = reconcile_preferences(&once, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_list_all_categories_order_and_dedupe() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec![
                "marketing".to_string(),
                "analytics".to_string(),
                "marketing".to_string(),
            ],
            custom_categories: vec![custom("chat"), custom("analytics")],
        };
        let all = list_all_categories(&config);
        let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![NECESSARY_ID, "marketing", "analytics", "chat"]);
        assert!(all[0].essential);
    }

    #[test]
    fn test_validate_flags_unknown_necessary_and_duplicates() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec![
                "analytics".to_string(),
                "telemetry".to_string(),
                NECESSARY_ID.to_string(),
                "analytics".to_string(),
            ],
            custom_categories: vec![custom("analytics"), custom("")],
        };
        let errors = validate_config(&config);

        assert!(errors.contains(&ConsentError::UnknownEnabledCategory {
            id: "telemetry".to_string()
        }));
        assert!(errors.contains(&ConsentError::NecessaryExplicitlyEnabled));
        assert!(errors.contains(&ConsentError::DuplicateCategory {
            id: "analytics".to_string()
        }));
        assert!(errors.contains(&ConsentError::BlankCustomCategoryId));
    }

    #[test]
    fn test_validate_clean_config() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec!["analytics".to_string(), "functional".to_string()],
            custom_categories: vec![custom("chat")],
        };
        assert!(validate_config(&config).is_empty());
    }
}
