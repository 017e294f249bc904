//! Cart persistence on top of the key-value store.

use storefront_cache::{Cache, KvStore, StorageError};
use tracing::{debug, warn};

use crate::cart::{Cart, LineItem};

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Saves and restores a [`Cart`] under a single key.
///
/// The stored value is a JSON array of `{"productId", "quantity"}` objects in
/// cart order.
#[derive(Debug)]
pub struct CartStorage<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KvStore> CartStorage<S> {
    /// Use `store` with the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Use `store` with a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// Overwrite the stored cart.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        self.cache.set(&self.key, cart.items())
    }

    /// Restore the stored cart.
    ///
    /// Best-effort: a missing key gives an empty cart, and so does a value
    /// that cannot be read or parsed (after logging why).
    pub fn load(&self) -> Cart {
        match self.cache.get::<Vec<LineItem>>(&self.key) {
            Ok(Some(items)) => {
                let cart = Cart::from_items(items);
                debug!(key = %self.key, lines = cart.unique_item_count(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable stored cart");
                Cart::new()
            }
        }
    }

    /// Remove the stored entry entirely.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cache.delete(&self.key)
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Mutably borrow the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        self.cache.store_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Quantity;
    use crate::ids::ProductId;
    use proptest::prelude::*;
    use storefront_cache::MemoryStore;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn storage_with(raw: &str) -> CartStorage<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(CART_STORAGE_KEY, raw).unwrap();
        CartStorage::new(store)
    }

    #[test]
    fn test_save_layout() {
        let mut storage = CartStorage::new(MemoryStore::new());
        let cart = Cart::from_items(vec![LineItem::new(7, qty(2)), LineItem::new("tee", qty(1))]);

        storage.save(&cart).unwrap();

        assert_eq!(
            storage.store().get("cart").unwrap().as_deref(),
            Some(r#"[{"productId":7,"quantity":2},{"productId":"tee","quantity":1}]"#)
        );
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = CartStorage::new(MemoryStore::new());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_garbage_is_empty() {
        assert!(storage_with("not json at all").load().is_empty());
        assert!(storage_with(r#"{"productId": 1}"#).load().is_empty());
        assert!(storage_with(r#"[{"productId": 1, "quantity": 0}]"#).load().is_empty());
        assert!(storage_with(r#"[{"productId": 1, "quantity": "two"}]"#).load().is_empty());
    }

    #[test]
    fn test_load_large_quantities() {
        let cart = storage_with(
            r#"[{"productId":1,"quantity":2},{"productId":7,"quantity":10000}]"#,
        )
        .load();
        assert_eq!(
            cart.items(),
            &[LineItem::new(1, qty(2)), LineItem::new(7, qty(10000))]
        );
    }

    /// Store whose reads always fail.
    #[derive(Debug, Default)]
    struct UnreadableStore;

    impl KvStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::StoreError("permission denied".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn delete(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_load_read_error_is_empty() {
        let storage = CartStorage::new(UnreadableStore);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_legacy_shape() {
        let cart = storage_with(r#"[{"id": 3, "quantity": 4}]"#).load();
        assert_eq!(cart.get(&ProductId::Int(3)).map(|i| i.quantity.get()), Some(4));
    }

    #[test]
    fn test_load_merges_duplicates() {
        let cart = storage_with(
            r#"[{"productId": 3, "quantity": 1}, {"productId": 3, "quantity": 2}]"#,
        )
        .load();
        assert_eq!(cart.items(), &[LineItem::new(3, qty(3))]);
    }

    #[test]
    fn test_clear_removes_key() {
        let mut storage = CartStorage::new(MemoryStore::new());
        storage.save(&Cart::new()).unwrap();
        assert!(storage.store().exists("cart").unwrap());

        storage.clear().unwrap();
        assert!(!storage.store().exists("cart").unwrap());
    }

    #[test]
    fn test_custom_key() {
        let mut storage = CartStorage::with_key(MemoryStore::new(), "shop:cart");
        storage.save(&Cart::from_items(vec![LineItem::new(1, qty(1))])).unwrap();

        assert_eq!(storage.key(), "shop:cart");
        assert!(storage.store().exists("shop:cart").unwrap());
        assert!(!storage.store().exists("cart").unwrap());
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(
            lines in prop::collection::vec((-50i64..50, 1u32..=50_000), 0..20),
        ) {
            let cart = Cart::from_items(lines.into_iter().map(|(id, n)| LineItem::new(id, qty(n))));
            let mut storage = CartStorage::new(MemoryStore::new());

            storage.save(&cart).unwrap();
            prop_assert_eq!(storage.load(), cart);
        }
    }
}
