//! Catalog module.
//!
//! Contains the read-only product list the storefront prices against.

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::Product;
