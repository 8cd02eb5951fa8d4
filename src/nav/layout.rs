//! Section geometry used by the scroll spy.
//!
//! A prerendered page has no layout engine, so section offsets come from the
//! host (a browser measurement, or a hand-written layout file).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a layout file.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout {path}: {message}")]
    Parse { path: String, message: String },
}

/// Vertical placement of one section, in pixels from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

/// Geometry for every measured section, keyed by section id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub sections: HashMap<String, SectionBox>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, id: &str, top: f64, height: f64) -> Self {
        self.sections
            .insert(id.to_string(), SectionBox { top, height });
        self
    }

    pub fn get(&self, id: &str) -> Option<&SectionBox> {
        self.sections.get(id)
    }

    /// Load a layout file. Format follows the extension: TOML, YAML, or JSON.
    pub async fn load(path: &Path) -> Result<Self, LayoutError> {
        let display = path.display().to_string();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LayoutError::Io {
                path: display.clone(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let parsed = match ext {
            "json" => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            _ => toml::from_str(&contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| LayoutError::Parse {
            path: display,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_toml_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(
            &path,
            "[sections.about]\ntop = 0\nheight = 600\n\n[sections.skills]\ntop = 600.5\nheight = 400\n",
        )
        .unwrap();

        let layout = Layout::load(&path).await.unwrap();
        assert_eq!(layout.get("about"), Some(&SectionBox { top: 0.0, height: 600.0 }));
        assert_eq!(layout.get("skills").unwrap().top, 600.5);
    }

    #[tokio::test]
    async fn test_load_json_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{"sections": {"about": {"top": 10, "height": 20}}}"#).unwrap();

        let layout = Layout::load(&path).await.unwrap();
        assert_eq!(layout, Layout::new().with_section("about", 10.0, 20.0));
    }

    #[tokio::test]
    async fn test_load_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "[sections.about]\ntop = \"high\"\n").unwrap();
        assert!(matches!(Layout::load(&path).await, Err(LayoutError::Parse { .. })));
    }
}
