//! URL-addressed text sources.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

/// Errors raised while loading a resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to load {url}: {status}")]
    Status { url: String, status: String },

    #[error("failed to load {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to load {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no resource registered for {url}")]
    NotFound { url: String },

    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
}

/// A place fragments and data payloads are fetched from.
///
/// URLs are site-relative (`/components/navbar.html`); each source decides
/// how to resolve them. Query strings are cache hints and never take part
/// in resolution.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch the resource at `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Fetches resources from a live site over HTTP.
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a client rooted at `base` (e.g. `https://example.com`).
    /// Requests time out after 15 seconds; a hung fragment load must not
    /// stall an assembly pass forever.
    pub fn new(base: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("lintel/0.1")
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            base: base.into(),
            client,
        })
    }
}

fn join_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let full = join_url(&self.base, url);
        let resp = self
            .client
            .get(&full)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: full.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: full,
                status: resp.status().to_string(),
            });
        }

        resp.text().await.map_err(|e| FetchError::Http {
            url: full,
            source: e,
        })
    }
}

/// Resolves site-relative URLs under a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Source for DirSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let rel = strip_query(url).trim_start_matches('/');
        let path = self.root.join(rel);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Io {
                url: url.to_string(),
                source: e,
            })
    }
}

/// In-memory source keyed by URL path, for tests and embedded fragments.
/// Entries registered with [`MemorySource::with_status`] simulate a
/// non-success HTTP response.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, String>,
    failures: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource body.
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.entries.insert(url.into(), body.into());
        self
    }

    /// Register a simulated HTTP failure status (e.g. `404 Not Found`).
    pub fn with_status(mut self, url: impl Into<String>, status: impl Into<String>) -> Self {
        self.failures.insert(url.into(), status.into());
        self
    }
}

#[async_trait]
impl Source for MemorySource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let key = strip_query(url);
        if let Some(status) = self.failures.get(key) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.clone(),
            });
        }
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
