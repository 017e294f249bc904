//! Key-value storage layer for the storefront.
//!
//! Provides a small, local-storage shaped [`KvStore`] trait with in-memory and
//! file-backed implementations, plus a typed [`Cache`] wrapper that handles
//! JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, KvStore, MemoryStore};
//!
//! let mut cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//!
//! // Retrieve a value
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//!
//! // Delete a value
//! cache.delete("cart").unwrap();
//! assert!(!cache.store().exists("cart").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KvStore, MemoryStore, StorageError};
}
