//! Catalog loading with timeouts and retries.
//!
//! This crate provides:
//! - `CatalogLoader` - Fetches and validates the product catalog
//! - `CatalogSource` - Where the catalog document comes from (file or HTTP)
//! - `FetchPolicy` - Per-attempt timeout plus retry policy
//! - `RetryPolicy` - Retry strategies

mod error;
mod loader;
mod retry;
mod source;

pub use error::*;
pub use loader::*;
pub use retry::*;
pub use source::*;
