//! Catalog loader with automatic timeout and retry.

use std::time::Duration;

use storefront_commerce::catalog::{Catalog, Product};
use tracing::{info, warn};

use crate::retry::RetryPolicy;
use crate::source::{source_for, CatalogSource};
use crate::CatalogFetchError;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Limit on each attempt, not on the whole fetch.
    pub timeout: Duration,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

/// Loads and validates the product catalog.
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
    policy: FetchPolicy,
}

impl CatalogLoader {
    /// Create a loader for an explicit source.
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self {
            source,
            policy: FetchPolicy::default(),
        }
    }

    /// Create a loader from a file path or URL.
    pub fn from_location(location: &str) -> Result<Self, CatalogFetchError> {
        Ok(Self::new(source_for(location)?))
    }

    /// Set the fetch policy.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Where the catalog is loaded from.
    pub fn location(&self) -> String {
        self.source.describe()
    }

    /// Fetch, parse and validate the catalog.
    pub async fn fetch_catalog(&self) -> Result<Catalog, CatalogFetchError> {
        let raw = self.fetch_with_retry().await?;

        let products: Vec<Product> = serde_json::from_str(&raw)
            .map_err(|e| CatalogFetchError::Deserialization(e.to_string()))?;
        let catalog = Catalog::from_products(products)
            .map_err(|e| CatalogFetchError::Invalid(e.to_string()))?;

        info!(source = %self.source.describe(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Fetch the catalog, falling back to an empty one on failure.
    ///
    /// The error, if any, is logged and handed back so the caller can report it.
    pub async fn fetch_or_empty(&self) -> (Catalog, Option<CatalogFetchError>) {
        match self.fetch_catalog().await {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "catalog unavailable, using empty catalog"
                );
                (Catalog::empty(), Some(e))
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<String, CatalogFetchError> {
        let mut attempt = 0;
        loop {
            let fetch = self.source.fetch_raw();
            let result = match tokio::time::timeout(self.policy.timeout, fetch).await {
                Ok(result) => result,
                Err(_) => Err(CatalogFetchError::Timeout(format!(
                    "{} after {:?}",
                    self.source.describe(),
                    self.policy.timeout
                ))),
            };

            match result {
                Ok(raw) => return Ok(raw),
                Err(e) if self.policy.retry.should_retry(&e, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        attempt = attempt + 1,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "catalog fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
