//! Loading of the portfolio data documents.
//!
//! A [`ResourceSource`] answers fetches with a status and a body, the way an
//! HTTP server would. Non-success statuses are logged and surface as absent
//! documents; bodies that do not parse into their record type are errors.

mod http;
mod source;

pub use http::HttpSource;
pub use source::{FsSource, MemorySource};

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{About, Project, Skill};

pub const ABOUT_PATH: &str = "data/about.json";
pub const SKILLS_PATH: &str = "data/skills.json";
pub const PROJECTS_PATH: &str = "data/projects.json";

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid data location: {0}")]
    InvalidLocation(String),

    #[error("failed to load {path}: status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw answer to a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// Check if the response is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can serve data documents by relative path.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Pick a source for a data location: `http://` and `https://` locations are
/// fetched over the network, anything else is a directory on disk.
pub fn source_for_location(
    location: &str,
    timeout: Duration,
    user_agent: &str,
) -> Result<Box<dyn ResourceSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout, user_agent)?))
    } else if location.is_empty() {
        Err(LoadError::InvalidLocation("empty location".to_string()))
    } else {
        Ok(Box::new(FsSource::new(location)))
    }
}

/// How to treat documents that failed to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Each failed document only skips its own page section.
    #[default]
    Lenient,
    /// Any failed document aborts rendering before data is bound.
    Strict,
}

/// Result of loading one document.
#[derive(Debug)]
pub enum DocumentState<T> {
    Loaded(T),
    /// The source answered with a non-success status.
    Unavailable { status: u16 },
    /// Transport error or a body that does not fit the record type.
    Failed(LoadError),
}

impl<T> DocumentState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    fn failure(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    fn into_strict(self, path: &str) -> Result<Self, LoadError> {
        match self {
            Self::Unavailable { status } => Err(LoadError::Status {
                path: path.to_string(),
                status,
            }),
            Self::Failed(e) => Err(e),
            loaded => Ok(loaded),
        }
    }
}

/// The three data documents of a page.
#[derive(Debug)]
pub struct SiteData {
    pub about: DocumentState<About>,
    pub skills: DocumentState<Vec<Skill>>,
    pub projects: DocumentState<Vec<Project>>,
}

/// Fetch and parse one document, keeping every failure mode distinct.
pub async fn fetch_document<T: DeserializeOwned>(
    source: &dyn ResourceSource,
    path: &str,
) -> DocumentState<T> {
    let response = match source.fetch(path).await {
        Ok(response) => response,
        Err(e) => return DocumentState::Failed(e),
    };

    if !response.is_success() {
        error!(path, status = response.status, "Failed to load");
        return DocumentState::Unavailable {
            status: response.status,
        };
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => {
            debug!(path, bytes = response.body.len(), "Loaded document");
            DocumentState::Loaded(value)
        }
        Err(source) => DocumentState::Failed(LoadError::Parse {
            path: path.to_string(),
            source,
        }),
    }
}

/// Load one document. A non-success response is logged and yields
/// `Ok(None)`; transport and parse failures are returned as errors.
pub async fn load_json<T: DeserializeOwned>(
    source: &dyn ResourceSource,
    path: &str,
) -> Result<Option<T>, LoadError> {
    match fetch_document(source, path).await {
        DocumentState::Loaded(value) => Ok(Some(value)),
        DocumentState::Unavailable { .. } => Ok(None),
        DocumentState::Failed(e) => Err(e),
    }
}

/// Load about, skills and projects concurrently and wait for all three.
///
/// A failure in one document never cancels the others. Under
/// [`FailurePolicy::Strict`] the first failure (in about, skills, projects
/// order) is returned once all three have settled.
pub async fn load_site_data(
    source: &dyn ResourceSource,
    policy: FailurePolicy,
) -> Result<SiteData, LoadError> {
    debug!(source = %source.describe(), "Loading site data");

    let (about, skills, projects) = tokio::join!(
        fetch_document::<About>(source, ABOUT_PATH),
        fetch_document::<Vec<Skill>>(source, SKILLS_PATH),
        fetch_document::<Vec<Project>>(source, PROJECTS_PATH),
    );

    if policy == FailurePolicy::Strict {
        return Ok(SiteData {
            about: about.into_strict(ABOUT_PATH)?,
            skills: skills.into_strict(SKILLS_PATH)?,
            projects: projects.into_strict(PROJECTS_PATH)?,
        });
    }

    for failure in [about.failure(), skills.failure(), projects.failure()]
        .into_iter()
        .flatten()
    {
        error!("{}", failure);
    }

    Ok(SiteData {
        about,
        skills,
        projects,
    })
}
