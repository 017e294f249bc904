//! The product list.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Read-only, validated list of purchasable products.
///
/// Ids are unique and prices are non-negative. Listing order is the order the
/// source supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// A catalog with no products. Every cart total against it is zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            if product.price.is_negative() {
                return Err(CommerceError::NegativePrice(product.id.to_string()));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a catalog document (a JSON array of products).
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate over products.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": 1, "name": "A", "description": "", "price": 1.5, "image": "a.png"},
                {"id": 2, "name": "B", "description": "", "price": 2, "image": "b.png"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.find(&ProductId::Int(1)).map(|p| p.price.amount_cents),
            Some(150)
        );
        assert!(catalog.find(&ProductId::Int(3)).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_products(vec![
            Product::new(1, "A", Money::new(100)),
            Product::new(1, "B", Money::new(200)),
        ]);
        assert!(matches!(result, Err(CommerceError::DuplicateProduct(id)) if id == "1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Catalog::from_products(vec![Product::new(1, "A", Money::new(-1))]);
        assert!(matches!(result, Err(CommerceError::NegativePrice(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = Catalog::from_json(r#"{"products": []}"#);
        assert!(matches!(result, Err(CommerceError::SerializationError(_))));
    }
}
