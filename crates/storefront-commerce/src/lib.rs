//! Cart, pricing and checkout logic for the storefront.
//!
//! - **Catalog**: products and lookup by id
//! - **Cart**: line items, quantities, persistence through a [`KvStore`](storefront_cache::KvStore)
//! - **Pricing**: subtotals and the promo-code whitelist
//! - **Checkout**: customer details and order confirmation
//!
//! [`Storefront`] ties them together into a single owned session.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::MemoryStore;
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new(7, "Desk Lamp", Money::from_decimal(10.0)),
//! ])?;
//!
//! let mut shop = Storefront::open(catalog, CartStorage::new(MemoryStore::new()));
//! shop.add(ProductId::Int(7), Quantity::parse_or_default("2"))?;
//! shop.apply_promo_code("OSTAD10")?;
//!
//! assert_eq!(shop.total().display(), "$20.00");
//! assert_eq!(shop.discounted_total().display(), "$18.00");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pricing;
pub mod storefront;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{Cart, CartStorage, CartStore, LineItem, Quantity};

    // Pricing
    pub use crate::pricing::{CartPricing, LineItemPricing, PricingEngine, PromoCode};

    // Checkout
    pub use crate::checkout::{CheckoutDetails, OrderConfirmation};

    pub use crate::storefront::Storefront;
}
