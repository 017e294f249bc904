//! Cart and line item types.

use crate::cart::Quantity;
use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Persisted as `{"productId": .., "quantity": ..}`. Older data written as
/// `{"id": .., "quantity": ..}` is still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product being purchased.
    #[serde(alias = "id")]
    pub product_id: ProductId,
    /// Quantity.
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product_id: impl Into<ProductId>, quantity: Quantity) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A shopping cart: line items in insertion order, at most one per product.
///
/// Pure in-memory state. Persistence is layered on by
/// [`CartStore`](crate::cart::CartStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, merging repeated products.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item.product_id, item.quantity);
        }
        cart
    }

    /// Add `quantity` of a product, merging into an existing line.
    ///
    /// Returns the line's resulting quantity.
    pub fn add(&mut self, product_id: ProductId, quantity: Quantity) -> Quantity {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return existing.quantity;
        }

        self.items.push(LineItem::new(product_id, quantity));
        quantity
    }

    /// Remove a product's line.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|i| &i.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Overwrite a line's quantity. Returns `false` if the product is not in
    /// the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: Quantity) -> bool {
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over lines whose product is in the catalog.
    /// Lines with no matching product contribute nothing.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .find(&item.product_id)
                    .map(|product| product.line_total(item.quantity))
            })
            .sum()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by product.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Check if a product has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Get number of lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
