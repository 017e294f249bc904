//! Where the catalog document comes from.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::CatalogFetchError;

/// A place the raw catalog JSON can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the whole document. One attempt; retries are the caller's job.
    async fn fetch_raw(&self) -> Result<String, CatalogFetchError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Pick a source from a location string: `http://` and `https://` are
/// fetched over the network, anything else is a file path.
pub fn source_for(location: &str) -> Result<Box<dyn CatalogSource>, CatalogFetchError> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Catalog stored in a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch_raw(&self) -> Result<String, CatalogFetchError> {
        debug!(path = %self.path.display(), "reading catalog file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogFetchError::Io(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogFetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogFetchError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch_raw(&self) -> Result<String, CatalogFetchError> {
        debug!(url = %self.url, "requesting catalog");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| classify(&self.url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogFetchError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        resp.text().await.map_err(|e| classify(&self.url, e))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn classify(url: &str, e: reqwest::Error) -> CatalogFetchError {
    if e.is_timeout() {
        CatalogFetchError::Timeout(format!("{}: {}", url, e))
    } else {
        CatalogFetchError::Connection(format!("{}: {}", url, e))
    }
}
