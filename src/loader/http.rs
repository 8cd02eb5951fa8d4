//! Network source backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{FetchResponse, LoadError, ResourceSource};

/// Fetches documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// Create a source for `base`. A trailing slash is added so that
    /// relative document paths resolve beneath it.
    pub fn new(base: &str, timeout: Duration, user_agent: &str) -> Result<Self, LoadError> {
        let mut base =
            Url::parse(base).map_err(|e| LoadError::InvalidLocation(format!("{}: {}", base, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|source| LoadError::Http {
                path: base.to_string(),
                source,
            })?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a document path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base
            .join(path)
            .map_err(|e| LoadError::InvalidLocation(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let url = self.resolve(path)?;
        let http_error = |source: reqwest::Error| LoadError::Http {
            path: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(http_error)?;

        debug!(url = %url, status, "Fetched");
        Ok(FetchResponse { status, body })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
