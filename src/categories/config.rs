use serde::{Deserialize, Serialize};

use crate::categories::definition::{BuiltinCategory, CategoryDefinition, NECESSARY_ID};

/// Project-supplied category configuration.
///
/// `enabled_categories` selects from the built-in set; `custom_categories`
/// adds host-defined purposes. `necessary` never appears here — it is
/// auto-included in every preference skeleton and listing. Validated once
/// at construction via [`validate`](Self::validate); the registry treats
/// invalid entries defensively (ignored, not fatal) at every access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCategoriesConfig {
    #[serde(default)]
    pub enabled_categories: Vec<String>,
    #[serde(default)]
    pub custom_categories: Vec<CategoryDefinition>,
}

impl ProjectCategoriesConfig {
    /// Config enabling the given built-in category ids, no custom entries.
    pub fn with_enabled(ids: &[&str]) -> Self {
        Self {
            enabled_categories: ids.iter().map(|s| s.to_string()).collect(),
            custom_categories: Vec::new(),
        }
    }

    /// Custom categories that actually participate: non-blank id, not a
    /// redeclaration of `necessary`.
    pub fn valid_custom_categories(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.custom_categories
            .iter()
            .filter(|c| !c.id.trim().is_empty() && c.id != NECESSARY_ID)
    }

    /// Whether `id` is declared by this config (recognized enabled built-in
    /// or valid custom category). `necessary` is always declared. Unrecognized
    /// entries in `enabled_categories` do not count — they are flagged by
    /// validation and never become active preferences.
    pub fn declares(&self, id: &str) -> bool {
        id == NECESSARY_ID
            || (BuiltinCategory::from_id(id).is_some()
                && self.enabled_categories.iter().any(|c| c == id))
            || self.valid_custom_categories().any(|c| c.id == id)
    }

    /// Validate this config, delegating to the registry's rules.
    pub fn validate(&self) -> Vec<crate::base::error::ConsentError> {
        crate::categories::registry::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_necessary_implicitly() {
        let config = ProjectCategoriesConfig::default();
        assert!(config.declares(NECESSARY_ID));
        assert!(!config.declares("analytics"));
    }

    #[test]
    fn test_blank_and_necessary_custom_ids_are_excluded() {
        let config = ProjectCategoriesConfig {
            enabled_categories: vec![],
            custom_categories: vec![
                CategoryDefinition {
                    id: "  ".to_string(),
                    display_name: "Blank".to_string(),
                    description: String::new(),
                    essential: false,
                    cookie_patterns: vec![],
                },
                CategoryDefinition {
                    id: NECESSARY_ID.to_string(),
                    display_name: "Sneaky".to_string(),
                    description: String::new(),
                    essential: false,
                    cookie_patterns: vec![],
                },
                CategoryDefinition {
                    id: "chat".to_string(),
                    display_name: "Chat".to_string(),
                    description: String::new(),
                    essential: false,
                    cookie_patterns: vec![],
                },
            ],
        };
        let valid: Vec<_> = config.valid_custom_categories().collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "chat");
        assert!(config.declares("chat"));
        assert!(!config.declares("  "));
    }
}
