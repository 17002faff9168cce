//! File-system tests for `DailyStore`, each against its own `TempDir`.

use chrono::NaiveDate;
use harvest_core::{DailyCatalog, EnrichedProduct, ProductDetail, ProductSummary};
use harvest_store::{DailyStore, StoreError};
use serde_json::json;
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn store_in(dir: &TempDir) -> DailyStore {
    DailyStore::with_clock(dir.path(), day)
}

fn product(id: i64) -> EnrichedProduct {
    let summary = ProductSummary::from_value(&json!({
        "id": id,
        "title": format!("Product {id}"),
        "permalink": format!("product-{id}"),
        "available": true,
        "availableUnits": 2,
        "lineOfProduct": "FURNITURE",
        "vertical": "RENT",
        "pricing": {
            "discount": { "displayValue": "₹0", "value": 0 },
            "discountPercentage": { "displayValue": "0%", "value": 0 },
            "monthlyRental": { "displayValue": "₹499", "value": 499 },
            "strikePrice": { "displayValue": "₹499", "value": 499 }
        },
        "thumbnail": { "aspectRatio": 1.0, "url": "https://cdn.example.com/t.jpg" },
        "heroes": []
    }))
    .unwrap();
    EnrichedProduct {
        summary,
        detail: ProductDetail {
            description: Some(format!("Description {id}")),
            ..ProductDetail::default()
        },
    }
}

async fn read_raw(store: &DailyStore) -> serde_json::Value {
    let bytes = tokio::fs::read(store.path_for(day())).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn append_creates_file_with_one_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let total = store.append(product(1)).await.unwrap();

    assert_eq!(total, 1);
    let raw = read_raw(&store).await;
    assert_eq!(raw["totalProducts"], 1);
    assert_eq!(raw["products"][0]["id"], 1);
    assert_eq!(raw["products"][0]["description"], "Description 1");
    assert!(raw["products"][0]["specifications"].is_null());
}

#[tokio::test]
async fn append_grows_by_exactly_one_and_keeps_count_in_sync() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for id in 1..=3 {
        let before = store
            .load(day())
            .await
            .unwrap()
            .map_or(0, |c| c.products.len());
        let total = store.append(product(id)).await.unwrap();
        let after: DailyCatalog = store.load(day()).await.unwrap().unwrap();

        assert_eq!(after.products.len(), before + 1);
        assert_eq!(after.total_products, after.products.len());
        assert_eq!(total, after.total_products);
        assert_eq!(after.products.last().unwrap(), &product(id));
    }
}

#[tokio::test]
async fn append_does_not_deduplicate_ids() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(product(7)).await.unwrap();
    store.append(product(7)).await.unwrap();

    let catalog = store.load(day()).await.unwrap().unwrap();
    assert_eq!(catalog.total_products, 2);
    assert_eq!(catalog.distinct_ids(), 1);
}

#[tokio::test]
async fn corrupt_file_is_replaced_with_single_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    tokio::fs::write(store.path_for(day()), b"{\"totalProducts\": 4, \"products\": [")
        .await
        .unwrap();

    let total = store.append(product(9)).await.unwrap();

    assert_eq!(total, 1);
    let catalog = store.load(day()).await.unwrap().unwrap();
    assert_eq!(catalog.total_products, 1);
    assert_eq!(catalog.products[0].id(), 9);
}

#[tokio::test]
async fn wrong_shape_file_is_replaced_with_single_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    tokio::fs::write(store.path_for(day()), b"[1, 2, 3]")
        .await
        .unwrap();

    assert_eq!(store.append(product(2)).await.unwrap(), 1);
}

#[tokio::test]
async fn stale_total_is_recomputed_on_append() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.append(product(1)).await.unwrap();

    let mut raw = read_raw(&store).await;
    raw["totalProducts"] = json!(40);
    tokio::fs::write(store.path_for(day()), raw.to_string())
        .await
        .unwrap();

    assert_eq!(store.append(product(2)).await.unwrap(), 2);
    assert_eq!(read_raw(&store).await["totalProducts"], 2);
}

#[tokio::test]
async fn append_creates_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let store = DailyStore::with_clock(dir.path().join("nested").join("data"), day);

    store.append(product(1)).await.unwrap();

    assert!(store.path_for(day()).exists());
}

#[tokio::test]
async fn append_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(product(1)).await.unwrap();

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec!["products_20250131.json".to_string()]);
}

#[tokio::test]
async fn file_is_indented_json() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(product(1)).await.unwrap();

    let text = tokio::fs::read_to_string(store.path_for(day()))
        .await
        .unwrap();
    assert!(text.starts_with("{\n  \"totalProducts\": 1,"));
}

#[tokio::test]
async fn load_missing_day_is_none() {
    let dir = TempDir::new().unwrap();
    assert!(store_in(&dir).load(day()).await.unwrap().is_none());
}

#[tokio::test]
async fn load_corrupt_day_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    tokio::fs::write(store.path_for(day()), b"not json")
        .await
        .unwrap();

    let err = store.load(day()).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Parse { .. }),
        "expected Parse, got: {err:?}"
    );
}

#[tokio::test]
async fn days_are_partitioned() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let next_day = day().succ_opt().unwrap();

    store.append(product(1)).await.unwrap();
    store.append_on(next_day, product(2)).await.unwrap();

    assert_eq!(store.load(day()).await.unwrap().unwrap().total_products, 1);
    let next = store.load(next_day).await.unwrap().unwrap();
    assert_eq!(next.products[0].id(), 2);
    assert!(store
        .path_for(next_day)
        .ends_with("products_20250201.json"));
}

#[tokio::test]
async fn records_of_unknown_shape_are_carried_over() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    tokio::fs::write(
        store.path_for(day()),
        br#"{"totalProducts":2,"products":[{"id":1,"title":"legacy"},{"id":2}]}"#,
    )
    .await
    .unwrap();

    let total = store.append(product(3)).await.unwrap();

    assert_eq!(total, 3);
    let raw = read_raw(&store).await;
    assert_eq!(raw["totalProducts"], 3);
    assert_eq!(raw["products"][0], json!({ "id": 1, "title": "legacy" }));
    assert_eq!(raw["products"][1], json!({ "id": 2 }));
    assert_eq!(raw["products"][2]["id"], 3);
    assert_eq!(raw["products"][2]["description"], "Description 3");
}

#[tokio::test]
async fn appended_record_keeps_field_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.append(product(1)).await.unwrap();

    let raw = read_raw(&store).await;
    let keys: Vec<&str> = raw["products"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .take(3)
        .collect();
    assert_eq!(keys, vec!["id", "title", "permalink"]);
}

#[tokio::test]
async fn failed_rename_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let target = store.path_for(day());
    tokio::fs::create_dir_all(target.join("occupied"))
        .await
        .unwrap();

    let err = store.append(product(1)).await.unwrap_err();

    assert!(
        matches!(err, StoreError::Io { .. }),
        "expected Io, got: {err:?}"
    );
    assert!(!target.with_extension("json.tmp").exists());
    assert!(target.is_dir());
}
