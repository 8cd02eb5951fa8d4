//! File-system and in-memory sources.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{FetchResponse, LoadError, ResourceSource};

/// Serves documents from a directory, mapping missing files to 404.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` under the root, refusing anything that escapes it.
    fn resolve(&self, path: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(LoadError::InvalidLocation(format!(
                "{} is not inside {}",
                path,
                self.root.display()
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceSource for FsSource {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let full_path = self.resolve(path)?;
        match tokio::fs::read_to_string(&full_path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse::status(404)),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(FetchResponse::status(403)),
            Err(source) => Err(LoadError::Io {
                path: full_path.display().to_string(),
                source,
            }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Serves canned responses; unknown paths answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    responses: HashMap<String, FetchResponse>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: &str) -> Self {
        self.responses
            .insert(path.to_string(), FetchResponse::ok(body));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.responses
            .insert(path.to_string(), FetchResponse::status(status));
        self
    }
}

#[async_trait]
impl ResourceSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        Ok(self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| FetchResponse::status(404)))
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.responses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fs_source_reads_and_maps_missing() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/about.json"), r#"{"name": "Maria"}"#).unwrap();

        let source = FsSource::new(dir.path());
        let found = source.fetch("data/about.json").await.unwrap();
        assert!(found.is_success());
        assert!(found.body.contains("Maria"));

        let missing = source.fetch("data/skills.json").await.unwrap();
        assert_eq!(missing.status, 404);
        assert!(!missing.is_success());
    }

    #[tokio::test]
    async fn test_fs_source_rejects_escaping_paths() {
        let dir = tempdir().unwrap();
        let source = FsSource::new(dir.path());
        assert!(matches!(
            source.fetch("../secret.json").await,
            Err(LoadError::InvalidLocation(_))
        ));
        assert!(matches!(
            source.fetch("/etc/passwd").await,
            Err(LoadError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new()
            .with_json("a.json", "{}")
            .with_status("b.json", 500);
        assert_eq!(source.fetch("a.json").await.unwrap(), FetchResponse::ok("{}"));
        assert_eq!(source.fetch("b.json").await.unwrap().status, 500);
        assert_eq!(source.fetch("c.json").await.unwrap().status, 404);
    }
}
