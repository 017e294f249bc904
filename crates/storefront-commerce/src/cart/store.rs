//! The cart store: canonical cart state kept in sync with storage.

use storefront_cache::KvStore;
use tracing::{debug, error};

use crate::cart::{Cart, CartStorage, Quantity};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Owns the cart and persists it after every mutation.
///
/// Mutations are all-or-nothing: if the storage write fails, the in-memory
/// cart is put back the way it was and the error is returned.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: CartStorage<S>,
}

impl<S: KvStore> CartStore<S> {
    /// Restore the cart from `storage`, starting empty if nothing usable is
    /// stored.
    pub fn restore(storage: CartStorage<S>) -> Self {
        let cart = storage.load();
        Self { cart, storage }
    }

    /// Add `quantity` of a product. Returns the line's new quantity.
    pub fn add(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Quantity, CommerceError> {
        debug!(product_id = %product_id, quantity = quantity.get(), "adding to cart");
        self.commit(|cart| cart.add(product_id, quantity))
    }

    /// Remove a product's line. Returns `false` (and writes nothing) if the
    /// product was not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        if !self.cart.contains(product_id) {
            return Ok(false);
        }
        debug!(product_id = %product_id, "removing from cart");
        self.commit(|cart| cart.remove(product_id).is_some())
    }

    /// Set a line's quantity. Returns `false` (and writes nothing) if the
    /// product was not in the cart.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<bool, CommerceError> {
        if !self.cart.contains(product_id) {
            return Ok(false);
        }
        debug!(product_id = %product_id, quantity = quantity.get(), "setting quantity");
        self.commit(|cart| cart.set_quantity(product_id, quantity))
    }

    /// Empty the cart and erase the stored entry.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "failed to erase stored cart");
            return Err(e.into());
        }
        self.cart.clear();
        debug!("cart cleared");
        Ok(())
    }

    /// Cart total against `catalog`.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.cart.total(catalog)
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Borrow the storage adapter.
    pub fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Mutably borrow the storage adapter.
    pub fn storage_mut(&mut self) -> &mut CartStorage<S> {
        &mut self.storage
    }

    fn commit<R>(&mut self, mutate: impl FnOnce(&mut Cart) -> R) -> Result<R, CommerceError> {
        let snapshot = self.cart.clone();
        let out = mutate(&mut self.cart);

        if let Err(e) = self.storage.save(&self.cart) {
            error!(error = %e, "failed to persist cart, reverting");
            self.cart = snapshot;
            return Err(e.into());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::catalog::Product;
    use storefront_cache::{MemoryStore, StorageError};

    /// Store that accepts reads and refuses writes once `fail` is set.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: bool,
        writes: usize,
    }

    impl KvStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::StoreError("quota exceeded".to_string()));
            }
            self.writes += 1;
            self.inner.set(key, value)
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::StoreError("quota exceeded".to_string()));
            }
            self.writes += 1;
            self.inner.delete(key)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            self.inner.keys()
        }
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn store() -> CartStore<FlakyStore> {
        CartStore::restore(CartStorage::new(FlakyStore::default()))
    }

    #[test]
    fn test_add_persists() {
        let mut store = store();
        store.add(ProductId::Int(7), qty(2)).unwrap();

        let reloaded = store.storage().load();
        assert_eq!(reloaded.items(), &[LineItem::new(7, qty(2))]);
    }

    #[test]
    fn test_total() {
        let mut store = store();
        store.add(ProductId::Int(7), qty(2)).unwrap();
        let catalog =
            Catalog::from_products(vec![Product::new(7, "Lamp", Money::new(1000))]).unwrap();

        assert_eq!(store.total(&catalog).amount_cents, 2000);
    }

    #[test]
    fn test_large_quantity_is_not_capped() {
        let mut store = store();
        let added = store.add(ProductId::Int(7), Quantity::normalize(10000.0)).unwrap();
        let catalog =
            Catalog::from_products(vec![Product::new(7, "Lamp", Money::new(1000))]).unwrap();

        assert_eq!(added.get(), 10000);
        assert_eq!(store.total(&catalog).amount_cents, 10_000_000);
        assert_eq!(store.storage().load().items(), &[LineItem::new(7, qty(10000))]);

        assert!(store.set_quantity(&ProductId::Int(7), qty(25000)).unwrap());
        assert_eq!(store.cart().items(), &[LineItem::new(7, qty(25000))]);
    }

    #[test]
    fn test_remove_absent_writes_nothing() {
        let mut store = store();
        assert!(!store.remove(&ProductId::Int(1)).unwrap());
        assert!(!store.set_quantity(&ProductId::Int(1), qty(3)).unwrap());
        assert_eq!(store.storage().store().writes, 0);
    }

    #[test]
    fn test_remove_and_set_quantity_persist() {
        let mut store = store();
        store.add(ProductId::Int(1), qty(1)).unwrap();
        store.add(ProductId::Int(2), qty(1)).unwrap();

        assert!(store.set_quantity(&ProductId::Int(2), qty(6)).unwrap());
        assert!(store.remove(&ProductId::Int(1)).unwrap());

        assert_eq!(store.storage().load().items(), &[LineItem::new(2, qty(6))]);
    }

    #[test]
    fn test_clear_erases_key() {
        let mut store = store();
        store.add(ProductId::Int(1), qty(1)).unwrap();
        store.clear().unwrap();

        assert!(store.cart().is_empty());
        assert!(!store.storage().store().exists("cart").unwrap());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = store();
        store.add(ProductId::Int(1), qty(2)).unwrap();
        store.storage_mut().store_mut().fail = true;

        let result = store.add(ProductId::Int(1), qty(3));
        assert!(matches!(result, Err(CommerceError::Storage(_))));
        assert!(store.add(ProductId::Int(9), qty(1)).is_err());
        assert!(store.set_quantity(&ProductId::Int(1), qty(8)).is_err());
        assert!(store.remove(&ProductId::Int(1)).is_err());
        assert!(store.clear().is_err());

        assert_eq!(store.cart().items(), &[LineItem::new(1, qty(2))]);
    }

    #[test]
    fn test_restore_from_existing_storage() {
        let mut inner = MemoryStore::new();
        inner.set("cart", r#"[{"productId": 5, "quantity": 3}]"#).unwrap();
        let store = CartStore::restore(CartStorage::new(inner));

        assert_eq!(store.cart().items(), &[LineItem::new(5, qty(3))]);
    }
}
