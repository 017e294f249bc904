//! Loading catalog documents from disk.

use std::fs;

use storefront_commerce::ProductId;
use storefront_data::{CatalogFetchError, CatalogLoader};

#[tokio::test]
async fn test_sample_catalog_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/products.json");
    let catalog = CatalogLoader::from_location(path)
        .unwrap()
        .fetch_catalog()
        .await
        .unwrap();

    assert!(!catalog.is_empty());
    let ids: Vec<&ProductId> = catalog.iter().map(|p| &p.id).collect();
    assert!(ids.iter().all(|id| matches!(id, ProductId::Int(_))));
    assert!(catalog.iter().all(|p| !p.price.is_negative()));
}

#[tokio::test]
async fn test_listing_order_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    fs::write(
        &path,
        r#"[{"id": "z", "name": "Zed", "price": 1}, {"id": "a", "name": "Ay", "price": 2}]"#,
    )
    .unwrap();

    let catalog = CatalogLoader::from_location(path.to_str().unwrap())
        .unwrap()
        .fetch_catalog()
        .await
        .unwrap();
    let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Ay"]);
}

#[tokio::test]
async fn test_bad_document_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    fs::write(&path, "<html>not found</html>").unwrap();

    let loader = CatalogLoader::from_location(path.to_str().unwrap()).unwrap();
    let (catalog, err) = loader.fetch_or_empty().await;

    assert!(catalog.is_empty());
    assert!(matches!(err, Some(CatalogFetchError::Deserialization(_))));
}
