//! Configuration management for folio using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loader::{source_for_location, FailurePolicy, LoadError, ResourceSource};
use crate::nav::DEFAULT_NAV_OFFSET;

/// Default host template filename.
pub const DEFAULT_TEMPLATE: &str = "index.html";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the `data/*.json` documents live: a directory or a base URL.
    pub data: String,
    /// Host page the documents are bound into.
    pub template: PathBuf,
    /// Where rendered HTML is written (stdout when unset).
    pub output: Option<PathBuf>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Header clearance used by the scroll spy, in pixels.
    pub nav_offset: f64,
    /// Scroll spy frame interval in milliseconds.
    pub frame_ms: u64,
    /// Abort rendering when any document fails to load.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: ".".to_string(),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: None,
            request_timeout: 30,
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
            nav_offset: DEFAULT_NAV_OFFSET,
            frame_ms: 16,
            strict: false,
        }
    }
}

impl Settings {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    /// Create the document source for the configured data location.
    pub fn create_source(&self) -> Result<Box<dyn ResourceSource>, LoadError> {
        source_for_location(
            &self.data,
            Duration::from_secs(self.request_timeout),
            &self.user_agent,
        )
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory or base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Host template path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Output path for rendered HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Scroll spy header offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_offset: Option<f64>,
    /// Scroll spy frame interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ms: Option<u64>,
    /// Abort on any failed document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers folio config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("folio").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

        let mut config: Config = match ext {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data) = self.data {
            settings.data = if is_url(data) {
                data.clone()
            } else {
                self.resolve_path(data, base_dir).display().to_string()
            };
        }
        if let Some(ref template) = self.template {
            settings.template = self.resolve_path(template, base_dir);
        }
        if let Some(ref output) = self.output {
            settings.output = Some(self.resolve_path(output, base_dir));
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(offset) = self.nav_offset {
            settings.nav_offset = offset;
        }
        if let Some(frame_ms) = self.frame_ms {
            settings.frame_ms = frame_ms;
        }
        if let Some(strict) = self.strict {
            settings.strict = strict;
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Options for loading settings, usually from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Load config from an explicit path or by discovery.
async fn load_file_config(options: &LoadOptions) -> Config {
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }
    Config::load().await
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok().filter(|s| !s.is_empty())?;
    Some(value.eq_ignore_ascii_case("1") || value.eq_ignore_ascii_case("true"))
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = load_file_config(&options).await;
    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd
    } else {
        config.base_dir().unwrap_or(cwd)
    };

    config.apply_to_settings(&mut settings, &base_dir);

    // FOLIO_DATA environment variable takes precedence over config
    if let Some(data) = std::env::var("FOLIO_DATA").ok().filter(|s| !s.is_empty()) {
        tracing::debug!("Using FOLIO_DATA from environment: {}", data);
        settings.data = data;
    }

    if let Some(strict) = env_flag("FOLIO_STRICT") {
        settings.strict = strict;
    }

    (settings, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_toml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(
            &path,
            "data = \"site\"\ntemplate = \"site/index.html\"\nnav_offset = 64\nstrict = true\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.data.as_deref(), Some("site"));
        assert_eq!(config.nav_offset, Some(64.0));
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_load_json_and_yaml_config() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("folio.json");
        std::fs::write(&json, r#"{"frame_ms": 33}"#).unwrap();
        assert_eq!(Config::load_from_path(&json).await.unwrap().frame_ms, Some(33));

        let yaml = dir.path().join("folio.yaml");
        std::fs::write(&yaml, "request_timeout: 5\n").unwrap();
        assert_eq!(
            Config::load_from_path(&yaml).await.unwrap().request_timeout,
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_load_reports_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "strict = \"sometimes\"").unwrap();
        assert!(Config::load_from_path(&path).await.is_err());
    }

    #[test]
    fn test_apply_resolves_relative_paths() {
        let config = Config {
            data: Some("site".to_string()),
            template: Some("site/index.html".to_string()),
            output: Some("/tmp/out.html".to_string()),
            strict: Some(true),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/portfolio"));

        assert_eq!(settings.data, "/srv/portfolio/site");
        assert_eq!(settings.template, PathBuf::from("/srv/portfolio/site/index.html"));
        assert_eq!(settings.output, Some(PathBuf::from("/tmp/out.html")));
        assert_eq!(settings.failure_policy(), FailurePolicy::Strict);
    }

    #[test]
    fn test_apply_keeps_urls() {
        let config = Config {
            data: Some("https://example.com/me".to_string()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv"));
        assert_eq!(settings.data, "https://example.com/me");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.nav_offset, 80.0);
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));
        assert_eq!(settings.failure_policy(), FailurePolicy::Lenient);
        assert!(settings.user_agent.starts_with("folio/"));
    }
}
