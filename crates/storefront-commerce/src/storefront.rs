//! The storefront session: catalog, cart and promo state owned together.

use storefront_cache::KvStore;
use tracing::info;

use crate::cart::{Cart, CartStorage, CartStore, Quantity};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutDetails, OrderConfirmation};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::pricing::{CartPricing, PricingEngine, PromoCode};

/// One shopper's session.
///
/// Created from a catalog and a storage backend, the cart is restored from
/// storage immediately. All mutation goes through `&mut self`.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    pricing: PricingEngine,
}

impl<S: KvStore> Storefront<S> {
    /// Open a session, restoring any cart saved in `storage`.
    pub fn open(catalog: Catalog, storage: CartStorage<S>) -> Self {
        let cart = CartStore::restore(storage);
        info!(
            products = catalog.len(),
            lines = cart.cart().unique_item_count(),
            "storefront opened"
        );
        Self {
            catalog,
            cart,
            pricing: PricingEngine::new(),
        }
    }

    /// Add `quantity` of a product and return the line's new quantity.
    pub fn add(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Quantity, CommerceError> {
        self.cart.add(product_id, quantity)
    }

    /// Remove a product's line; `false` if it was not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        self.cart.remove(product_id)
    }

    /// Overwrite a line's quantity; `false` if it was not in the cart.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<bool, CommerceError> {
        self.cart.set_quantity(product_id, quantity)
    }

    /// Empty the cart and erase the stored entry.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear()
    }

    /// Undiscounted cart total.
    pub fn total(&self) -> Money {
        self.cart.total(&self.catalog)
    }

    /// Cart total with the active promo applied.
    pub fn discounted_total(&self) -> Money {
        self.pricing.discounted_total(self.cart.cart(), &self.catalog)
    }

    /// Activate a promo code, replacing any active one.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<PromoCode, CommerceError> {
        self.pricing.apply_promo_code(code)
    }

    /// The active promo, if any.
    pub fn active_promo(&self) -> Option<PromoCode> {
        self.pricing.active_promo()
    }

    /// Full price breakdown for the current cart.
    pub fn quote(&self) -> CartPricing {
        self.pricing.quote(self.cart.cart(), &self.catalog)
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swap in a freshly loaded catalog. The cart is untouched.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Place the order.
    ///
    /// The quote is taken first, then the cart is cleared and the promo reset.
    /// Nothing changes if the cart is empty, the details are incomplete, or
    /// the stored cart cannot be erased.
    pub fn checkout(
        &mut self,
        details: CheckoutDetails,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.cart.cart().is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        details.validate()?;

        let pricing = self.quote();
        self.cart.clear()?;
        self.pricing.reset_promo();

        let order = OrderConfirmation::new(details, pricing);
        info!(
            order_id = %order.order_id,
            total = %order.total,
            promo = order.promo.map(|p| p.code()).unwrap_or("none"),
            "order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use storefront_cache::MemoryStore;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            Product::new(7, "Desk Lamp", Money::new(1000)),
            Product::new("tee", "T-Shirt", Money::new(1999)),
        ])
        .unwrap()
    }

    fn storefront() -> Storefront<MemoryStore> {
        Storefront::open(catalog(), CartStorage::new(MemoryStore::new()))
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails::new("Ada", "ada@example.com", "1 Main St")
    }

    #[test]
    fn test_total_after_add() {
        let mut shop = storefront();
        shop.add(ProductId::Int(7), qty(2)).unwrap();

        assert_eq!(shop.total().amount_cents, 2000);
    }

    #[test]
    fn test_add_merges_lines() {
        let mut shop = storefront();
        shop.add(ProductId::Int(7), qty(2)).unwrap();
        let merged = shop.add(ProductId::Int(7), qty(3)).unwrap();

        assert_eq!(merged.get(), 5);
        assert_eq!(shop.cart().unique_item_count(), 1);
    }

    #[test]
    fn test_unknown_product_contributes_nothing() {
        let mut shop = storefront();
        shop.add(ProductId::Int(404), qty(1)).unwrap();

        assert_eq!(shop.cart().unique_item_count(), 1);
        assert!(shop.total().is_zero());
    }

    #[test]
    fn test_promo_discount() {
        let mut shop = storefront();
        shop.add(ProductId::Int(7), qty(1)).unwrap();
        shop.apply_promo_code("OSTAD10").unwrap();

        assert_eq!(shop.discounted_total().amount_cents, 900);
        assert!(shop.apply_promo_code("ostad5").is_err());
        assert_eq!(shop.active_promo(), Some(PromoCode::Ostad10));
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut shop = storefront();
        shop.apply_promo_code("ostad5").unwrap();

        let err = shop.checkout(details()).unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
        assert_eq!(shop.active_promo(), Some(PromoCode::Ostad5));
    }

    #[test]
    fn test_checkout_incomplete_details() {
        let mut shop = storefront();
        shop.add(ProductId::Int(7), qty(1)).unwrap();

        let err = shop
            .checkout(CheckoutDetails::new("Ada", "not-an-email", ""))
            .unwrap_err();
        assert!(matches!(err, CommerceError::CheckoutIncomplete(_)));
        assert!(!shop.cart().is_empty());
    }

    #[test]
    fn test_checkout_clears_cart_and_promo() {
        let mut shop = storefront();
        shop.add(ProductId::Int(7), qty(2)).unwrap();
        shop.add(ProductId::new("tee"), qty(1)).unwrap();
        shop.apply_promo_code("ostad10").unwrap();

        let order = shop.checkout(details()).unwrap();

        assert_eq!(order.subtotal.amount_cents, 3999);
        assert_eq!(order.discount.amount_cents, 400);
        assert_eq!(order.total.amount_cents, 3599);
        assert_eq!(order.lines.len(), 2);

        assert!(shop.cart().is_empty());
        assert!(shop.active_promo().is_none());
        assert!(!shop.cart.storage().store().exists("cart").unwrap());
        assert!(shop.apply_promo_code("ostad5").is_ok());
    }

    #[test]
    fn test_restores_saved_cart() {
        let mut store = MemoryStore::new();
        store.set("cart", r#"[{"productId":"tee","quantity":2}]"#).unwrap();

        let shop = Storefront::open(catalog(), CartStorage::new(store));
        assert_eq!(shop.total().amount_cents, 3998);
    }

    #[test]
    fn test_replace_catalog_keeps_cart() {
        let mut shop = Storefront::open(Catalog::empty(), CartStorage::new(MemoryStore::new()));
        shop.add(ProductId::Int(7), qty(3)).unwrap();
        assert!(shop.total().is_zero());

        shop.replace_catalog(catalog());
        assert_eq!(shop.total().amount_cents, 3000);
    }
}
