//! End-to-end session against a file-backed store.

use std::fs;

use storefront_cache::FileStore;
use storefront_commerce::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": 7, "name": "Desk Lamp", "price": 10.00, "description": "Warm", "image": "lamp.png"},
    {"id": "tee", "name": "T-Shirt", "price": 19.99},
    {"id": 3, "name": "Sticker", "description": "", "price": 0.5, "image": ""}
]"#;

fn open(dir: &TempDir) -> Storefront<FileStore> {
    let store = FileStore::open(dir.path().join("storage.json"));
    Storefront::open(Catalog::from_json(CATALOG).unwrap(), CartStorage::new(store))
}

#[test]
fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut shop = open(&dir);
        shop.add(ProductId::Int(7), Quantity::parse_or_default("2")).unwrap();
        shop.add(ProductId::new("tee"), Quantity::parse_or_default("abc")).unwrap();
        shop.add(ProductId::Int(7), Quantity::normalize(3.7)).unwrap();
    }

    let raw = fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        stored["cart"].as_str().unwrap(),
        r#"[{"productId":7,"quantity":5},{"productId":"tee","quantity":1}]"#
    );

    let shop = open(&dir);
    assert_eq!(shop.cart().item_count(), 6);
    assert_eq!(shop.total().amount_cents, 5 * 1000 + 1999);
}

#[test]
fn test_checkout_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut shop = open(&dir);

    shop.add(ProductId::Int(3), Quantity::parse_or_default("4")).unwrap();
    shop.add(ProductId::new("tee"), Quantity::ONE).unwrap();
    shop.apply_promo_code(" ostad5 ").unwrap();

    let err = shop.apply_promo_code("OSTAD10").unwrap_err();
    assert!(matches!(err, CommerceError::PromoAlreadyApplied(_)));

    let order = shop
        .checkout(CheckoutDetails::new("Grace Hopper", "grace@navy.mil", "Arlington, VA"))
        .unwrap();

    assert_eq!(order.subtotal.amount_cents, 200 + 1999);
    assert_eq!(order.discount.amount_cents, 110);
    assert_eq!(order.total.amount_cents, 2089);
    assert_eq!(order.promo, Some(PromoCode::Ostad5));

    let reopened = open(&dir);
    assert!(reopened.cart().is_empty());
    assert!(reopened.active_promo().is_none());
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("storage.json"), r#"{"cart": "[{\"productId\": 1"}"#).unwrap();

    let mut shop = open(&dir);
    assert!(shop.cart().is_empty());

    shop.add(ProductId::Int(7), Quantity::ONE).unwrap();
    assert_eq!(open(&dir).total().amount_cents, 1000);
}

#[test]
fn test_unreadable_storage_starts_empty() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("storage.json")).unwrap();

    let mut shop = open(&dir);
    assert!(shop.cart().is_empty());

    let err = shop.add(ProductId::Int(7), Quantity::ONE).unwrap_err();
    assert!(matches!(err, CommerceError::Storage(_)));
    assert!(shop.cart().is_empty());
}

#[test]
fn test_empty_catalog_zero_totals() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("storage.json"));
    let mut shop = Storefront::open(Catalog::empty(), CartStorage::new(store));

    shop.add(ProductId::Int(7), Quantity::ONE).unwrap();
    shop.apply_promo_code("ostad10").unwrap();

    assert!(shop.total().is_zero());
    assert!(shop.discounted_total().is_zero());
}
