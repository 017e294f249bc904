//! Product type.

use crate::cart::Quantity;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Deserializes from the static catalog document:
/// `{"id": 1, "name": "...", "description": "...", "price": 19.99, "image": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description for listings.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Image resource reference.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a new product with no description or image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
        }
    }

    /// Price of `quantity` units.
    pub fn line_total(&self, quantity: Quantity) -> Money {
        self.price * i64::from(quantity.get())
    }
}
