//! Skill cards.

use serde::{Deserialize, Serialize};

/// One skill card. Array order in the document is render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "super::lenient_tags")]
    pub tags: Option<Vec<String>>,
}

impl Skill {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_array_tags_read_as_absent() {
        let skills: Vec<Skill> = serde_json::from_str(
            r#"[
                {"title": "Rust", "tags": ["tokio", "serde"]},
                {"title": "Go", "tags": "not-a-list"},
                {"title": "C"}
            ]"#,
        )
        .unwrap();

        assert_eq!(skills[0].tags(), ["tokio", "serde"]);
        assert!(skills[1].tags().is_empty());
        assert!(skills[2].tags.is_none());
    }

    #[test]
    fn test_skills_document_must_be_array() {
        assert!(serde_json::from_str::<Vec<Skill>>(r#"{"title": "Rust"}"#).is_err());
    }

    #[test]
    fn test_object_tag_is_invalid() {
        let result = serde_json::from_str::<Vec<Skill>>(r#"[{"tags": [{"x": 1}]}]"#);
        assert!(result.is_err());
    }
}
