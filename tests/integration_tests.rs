//! Integration tests through the public API
//!
//! Tests the full flow for every kind of source: slicing, partition,
//! deferred queries over in-memory data, and configuration.

use pagewise::config::PagingConfig;
use pagewise::query::MemoryQuery;
use pagewise::{
    partition, query_to_async_page, query_to_page, to_bounded_query, Error, MetadataExt, Page,
    PageRequest, PagedListMetadata, QuerySource, SinglePass, ToPage, TotalCount,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

fn letters() -> Vec<char> {
    ('a'..='i').collect()
}

// ============================================================================
// Slicing Integration Tests
// ============================================================================

#[test]
fn test_every_source_agrees_on_each_page() {
    let items = letters();

    for page_number in 1..=5 {
        let request = PageRequest::new(page_number, 4);
        let random = items.as_slice().to_page_with(request).unwrap();
        let single = SinglePass::new(items.iter().copied())
            .to_page_with(request)
            .unwrap();

        assert_eq!(random, single, "page {page_number}");
    }
}

#[test]
fn test_walk_pages_with_navigation_helpers() {
    let items = letters();
    let mut page_number = 1;
    let mut seen = Vec::new();

    loop {
        let page = items.as_slice().to_page(page_number, 2).unwrap();
        seen.extend_from_slice(page.items());

        if !page.has_next_page() {
            assert!(page.is_last_page());
            break;
        }
        page_number += 1;
    }

    assert_eq!(page_number, 5);
    assert_eq!(seen, items);
}

#[test]
fn test_past_the_end_without_adjust_keeps_metadata() {
    let page = letters()
        .as_slice()
        .to_page_with(PageRequest::new(7, 4).with_adjust(false))
        .unwrap();

    assert!(page.is_empty());
    assert!(!page.is_empty_set());
    assert_eq!(page.page_number().unwrap(), 3);
    assert_eq!(page.total_item_count(), 9);
    assert_eq!(page.page_count(), 3);
}

#[test]
fn test_empty_superset_yields_sentinel() {
    let items: Vec<char> = Vec::new();
    let page = items.as_slice().to_page(1, 4).unwrap();

    assert!(page.is_empty_set());
    assert!(matches!(page.page_number(), Err(Error::NoPages)));
    assert!(!page.is_first_page());
    assert!(!page.has_next_page());
    assert_eq!(page.page_size(), 4);
}

#[test]
fn test_page_serializes_items_and_metadata() {
    let page = letters().as_slice().to_page(3, 4).unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["items"], serde_json::json!(["i"]));
    assert_eq!(json["page_number"], 3);
    assert_eq!(json["item_count_on_page"], 1);
}

// ============================================================================
// Partition Integration Tests
// ============================================================================

#[test]
fn test_partition_matches_individual_pages() {
    let items = letters();
    let pages = partition(items.iter().copied(), 4).unwrap();

    assert_eq!(pages.len(), 3);
    for page in pages {
        let single = items.as_slice().to_page(page.page_number(), 4).unwrap();
        assert_eq!(Page::from(page), single);
    }
}

// ============================================================================
// Deferred Query Integration Tests
// ============================================================================

#[tokio::test]
async fn test_memory_query_matches_slicing() {
    let items = letters();

    for page_number in 1..=4 {
        let request = PageRequest::new(page_number, 4);
        let deferred = query_to_page(MemoryQuery::from(items.clone()), request)
            .await
            .unwrap();
        let local = items.as_slice().to_page_with(request).unwrap();

        assert_eq!(deferred, local, "page {page_number}");
    }
}

#[tokio::test]
async fn test_bounded_query_then_fetch() {
    let query = MemoryQuery::from(letters());
    let bounded = to_bounded_query(query, 2, 4, TotalCount::Known(9), true)
        .await
        .unwrap();

    assert_eq!(bounded.page_number, 2);
    assert_eq!(bounded.item_count_on_page, 4);
    assert_eq!(bounded.query.fetch().await.unwrap(), vec!['e', 'f', 'g', 'h']);
}

#[tokio::test]
async fn test_async_page_streams_then_materializes() {
    let cancel = CancellationToken::new();
    let query = MemoryQuery::from(letters());
    let mut page = query_to_async_page(query, PageRequest::new(9, 4), true)
        .await
        .unwrap();

    assert_eq!(page.page_number().unwrap(), 3);
    assert_eq!(page.item_count_on_page().unwrap(), 1);

    let list = page.as_paged_list_mut().unwrap();
    assert_eq!(list.next(&cancel).await.unwrap(), Some('i'));
    assert_eq!(list.next(&cancel).await.unwrap(), None);

    let page = page.materialize(&cancel).await.unwrap();
    assert_eq!(page.items(), &['i']);
}

#[tokio::test]
async fn test_cancelled_async_page() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let query = MemoryQuery::from(letters());
    let mut page = query_to_async_page(query, PageRequest::new(1, 4), false)
        .await
        .unwrap();
    let list = page.as_paged_list_mut().unwrap();

    assert!(matches!(list.next(&cancel).await, Err(Error::Cancelled)));
}

// ============================================================================
// Configuration Integration Tests
// ============================================================================

#[test]
fn test_config_drives_requests() {
    let config = PagingConfig::from_yaml_str(
        r"
default_page_size: 4
adjust_last_page_when_exceeding: false
",
    )
    .unwrap();

    let page = letters().as_slice().to_page_with(config.request(10)).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.page_size(), 4);
}
