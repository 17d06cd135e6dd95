use serde::{Deserialize, Serialize};

/// Category id that is always present and always consented.
pub const NECESSARY_ID: &str = "necessary";

/// A single consent category: id, user-facing text, and the cookie name
/// patterns it governs. Custom categories supplied by the host use this
/// shape directly; built-ins are resolved from a fixed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub id: String,
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub essential: bool,
    #[serde(default)]
    pub cookie_patterns: Vec<String>,
}

impl CategoryDefinition {
    /// Fixed definition for the `necessary` category.
    pub fn necessary() -> Self {
        Self {
            id: NECESSARY_ID.to_string(),
            display_name: "Strictly necessary".to_string(),
            description: "Cookies required for the site to function; cannot be disabled."
                .to_string(),
            essential: true,
            cookie_patterns: vec!["*_session".to_string(), "csrf_*".to_string()],
        }
    }
}

/// The closed set of optional built-in categories. `necessary` is not a
/// member — it is auto-included and handled separately everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinCategory {
    Analytics,
    Functional,
    Marketing,
    Social,
    Personalization,
}

impl BuiltinCategory {
    pub const ALL: [BuiltinCategory; 5] = [
        BuiltinCategory::Analytics,
        BuiltinCategory::Functional,
        BuiltinCategory::Marketing,
        BuiltinCategory::Social,
        BuiltinCategory::Personalization,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BuiltinCategory::Analytics => "analytics",
            BuiltinCategory::Functional => "functional",
            BuiltinCategory::Marketing => "marketing",
            BuiltinCategory::Social => "social",
            BuiltinCategory::Personalization => "personalization",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Resolve the fixed definition for this built-in.
    pub fn definition(&self) -> CategoryDefinition {
        let (display_name, description, patterns): (&str, &str, &[&str]) = match self {
            BuiltinCategory::Analytics => (
                "Analytics",
                "Anonymous usage measurement and audience statistics.",
                &["_ga", "_ga_*", "_gid", "_gat*"],
            ),
            BuiltinCategory::Functional => (
                "Functional",
                "Remembers choices such as language and region.",
                &["lang", "locale", "pref_*"],
            ),
            BuiltinCategory::Marketing => (
                "Marketing",
                "Advertising delivery and campaign measurement.",
                &["_fbp", "_gcl_*", "ads_*"],
            ),
            BuiltinCategory::Social => (
                "Social media",
                "Embedded social content and sharing widgets.",
                &["sb", "datr", "twitter_*"],
            ),
            BuiltinCategory::Personalization => (
                "Personalization",
                "Content recommendations tailored to the visitor.",
                &["reco_*", "persona_*"],
            ),
        };
        CategoryDefinition {
            id: self.id().to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            essential: false,
            cookie_patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}
