//! Database integration tests with DuckDB
//!
//! Uses a database file in a temporary directory, so the data outlives the
//! connection that wrote it.

use pagewise::database::DatabaseEngine;
use pagewise::query::FetchPhase;
use pagewise::{
    query_to_async_page, query_to_page, MetadataExt, PageRequest, PagedListMetadata,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Create a database file holding an `orders` table with `rows` rows
fn seeded_database(dir: &tempfile::TempDir, rows: usize) -> String {
    let path = dir.path().join("orders.duckdb");
    let location = path.to_str().unwrap().to_string();

    let engine = DatabaseEngine::open(&location).unwrap();
    engine
        .execute_batch(&format!(
            "CREATE TABLE orders AS
             SELECT range AS id, 'order-' || CAST(range AS VARCHAR) AS label
             FROM range(1, {});",
            rows + 1
        ))
        .unwrap();

    location
}

#[tokio::test]
async fn test_page_through_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let location = seeded_database(&dir, 23);
    let engine = DatabaseEngine::open(&location).unwrap();

    let mut ids = Vec::new();
    for page_number in 1..=3 {
        let page = query_to_page(
            engine.query("SELECT id FROM orders ORDER BY id"),
            PageRequest::new(page_number, 10),
        )
        .await
        .unwrap();

        assert_eq!(page.total_item_count(), 23);
        assert_eq!(page.page_count(), 3);
        ids.extend(page.iter().map(|row| row["id"].as_i64().unwrap()));
    }

    assert_eq!(ids, (1..=23).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_last_page_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let location = seeded_database(&dir, 23);
    let engine = DatabaseEngine::open(&location).unwrap();

    let page = query_to_page(
        engine.query("SELECT id, label FROM orders ORDER BY id;"),
        PageRequest::new(50, 10),
    )
    .await
    .unwrap();

    assert_eq!(page.page_number().unwrap(), 3);
    assert_eq!(page.len(), 3);
    assert!(page.is_last_page());
    assert_eq!(page.items()[0], json!({"id": 21, "label": "order-21"}));
}

#[tokio::test]
async fn test_filtered_query_with_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let location = seeded_database(&dir, 5);
    let engine = DatabaseEngine::open(&location).unwrap();

    let page = query_to_page(
        engine.query("SELECT id FROM orders WHERE id > 100"),
        PageRequest::new(1, 10),
    )
    .await
    .unwrap();

    assert!(page.is_empty_set());
    assert!(!page.has_previous_page());
}

#[tokio::test]
async fn test_async_page_over_database() {
    let dir = tempfile::tempdir().unwrap();
    let location = seeded_database(&dir, 12);
    let engine = DatabaseEngine::open(&location).unwrap();
    let cancel = CancellationToken::new();

    let mut page = query_to_async_page(
        engine.query("SELECT id FROM orders ORDER BY id DESC"),
        PageRequest::new(2, 5),
        true,
    )
    .await
    .unwrap();

    assert_eq!(page.item_count_on_page().unwrap(), 5);
    let list = page.as_paged_list_mut().unwrap();
    assert_eq!(list.phase(), FetchPhase::Idle);

    let first = list.collect(&cancel).await.unwrap();
    let ids: Vec<i64> = first.iter().map(|row| row["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    assert_eq!(list.phase(), FetchPhase::Cached);

    let second = list.collect(&cancel).await.unwrap();
    assert_eq!(first, second);
}
