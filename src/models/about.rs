//! The "about" document: identity, hero block and summary stats.

use serde::{Deserialize, Serialize};

/// Initial shown when neither `initial` nor `name` is usable.
pub const FALLBACK_INITIAL: &str = "M";

/// Profile data for the hero, about card and footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub name: Option<String>,
    /// Explicit logo/avatar initial; derived from `name` when absent.
    pub initial: Option<String>,
    pub role: Option<String>,
    pub hero_role_line: Option<String>,
    pub tagline: Option<String>,
    pub bio_card: Option<String>,
    pub location: Option<String>,
    pub focus: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "super::text_or_number")]
    pub last_update: Option<String>,
    pub hero_tags: Option<Vec<String>>,
    pub about_paragraphs: Option<Vec<String>>,
    /// Summary statistics; only the first three are shown.
    pub stats: Option<Vec<String>>,
}

impl About {
    /// Derive the initial: a non-empty `initial`, else the first character
    /// of a non-empty `name`, else [`FALLBACK_INITIAL`].
    pub fn initial(&self) -> String {
        if let Some(initial) = self.initial.as_deref().filter(|s| !s.is_empty()) {
            return initial.to_string();
        }
        self.name
            .as_deref()
            .and_then(|name| name.chars().next())
            .map(String::from)
            .unwrap_or_else(|| FALLBACK_INITIAL.to_string())
    }

    /// Text for the "last update" pill.
    pub fn last_update_label(&self) -> Option<String> {
        self.last_update
            .as_ref()
            .map(|when| format!("Last update: {}", when))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_from_name() {
        let about = About {
            name: Some("Maria".to_string()),
            ..Default::default()
        };
        assert_eq!(about.initial(), "M");
    }

    #[test]
    fn test_initial_fallback_without_name() {
        assert_eq!(About::default().initial(), FALLBACK_INITIAL);

        let empty_name = About {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty_name.initial(), "M");
    }

    #[test]
    fn test_explicit_initial_wins() {
        let about = About {
            name: Some("Maria".to_string()),
            initial: Some("Q".to_string()),
            ..Default::default()
        };
        assert_eq!(about.initial(), "Q");
    }

    #[test]
    fn test_empty_initial_falls_through_to_name() {
        let about = About {
            name: Some("Émile".to_string()),
            initial: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(about.initial(), "É");
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let about: About = serde_json::from_str(
            r#"{
                "name": "Maria",
                "heroRoleLine": "Builds compilers",
                "bioCard": "Short bio",
                "lastUpdate": 2025,
                "heroTags": ["rust", "wasm"],
                "aboutParagraphs": ["one", "two"],
                "stats": ["5+ years"]
            }"#,
        )
        .unwrap();

        assert_eq!(about.hero_role_line.as_deref(), Some("Builds compilers"));
        assert_eq!(about.bio_card.as_deref(), Some("Short bio"));
        assert_eq!(about.last_update_label().as_deref(), Some("Last update: 2025"));
        assert_eq!(about.hero_tags.unwrap(), vec!["rust", "wasm"]);
        assert_eq!(about.about_paragraphs.unwrap().len(), 2);
        assert!(about.role.is_none());
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<About>("[1, 2]").is_err());
    }
}
