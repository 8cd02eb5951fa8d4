//! Project cards.

use serde::{Deserialize, Serialize};

/// Link target used when a project has no demo or code URL.
pub const PLACEHOLDER_HREF: &str = "#";

/// One project card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Written as either `"2024"` or `2024` in the data file.
    #[serde(deserialize_with = "super::text_or_number")]
    pub year: Option<String>,
    pub demo: Option<String>,
    pub code: Option<String>,
}

impl Project {
    pub fn demo_href(&self) -> &str {
        non_empty(&self.demo).unwrap_or(PLACEHOLDER_HREF)
    }

    pub fn code_href(&self) -> &str {
        non_empty(&self.code).unwrap_or(PLACEHOLDER_HREF)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
