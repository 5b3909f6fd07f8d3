//! Tests for metadata module

use super::*;
use test_case::test_case;

fn stub(page_number: usize, page_count: usize) -> PageMetadata {
    PageMetadata {
        page_number,
        page_count,
        ..Default::default()
    }
}

// ============================================================================
// Navigation Helper Tests
// ============================================================================

#[test_case(1, 5 => true)]
#[test_case(2, 5 => false)]
#[test_case(5, 5 => false)]
#[test_case(0, 5 => false)]
#[test_case(1, 1 => true)]
#[test_case(0, 0 => false)]
fn test_is_first_page(page_number: usize, page_count: usize) -> bool {
    stub(page_number, page_count).is_first_page()
}

#[test_case(1, 5 => false)]
#[test_case(2, 5 => false)]
#[test_case(5, 5 => true)]
#[test_case(0, 5 => false)]
#[test_case(1, 1 => true)]
#[test_case(0, 0 => false)]
fn test_is_last_page(page_number: usize, page_count: usize) -> bool {
    stub(page_number, page_count).is_last_page()
}

#[test_case(1, 5 => true)]
#[test_case(2, 5 => true)]
#[test_case(5, 5 => false)]
#[test_case(0, 5 => true)]
#[test_case(1, 1 => false)]
#[test_case(0, 0 => false)]
fn test_has_next_page(page_number: usize, page_count: usize) -> bool {
    stub(page_number, page_count).has_next_page()
}

#[test_case(1, 5 => false)]
#[test_case(2, 5 => true)]
#[test_case(5, 5 => true)]
#[test_case(0, 5 => false)]
#[test_case(1, 1 => false)]
#[test_case(0, 0 => false)]
#[test_case(9, 5 => true)]
#[test_case(9, 0 => false)]
fn test_has_previous_page(page_number: usize, page_count: usize) -> bool {
    stub(page_number, page_count).has_previous_page()
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[test]
fn test_metadata_snapshot_round_trips_fields() {
    let metadata = PageMetadata {
        page_number: 2,
        page_size: 10,
        total_item_count: 15,
        page_count: 2,
        item_count_on_page: 5,
    };

    assert_eq!(metadata.metadata().unwrap(), metadata);
}

#[test]
fn test_metadata_serializes_snake_case() {
    let metadata = PageMetadata {
        page_number: 1,
        page_size: 4,
        total_item_count: 9,
        page_count: 3,
        item_count_on_page: 4,
    };

    let json = serde_json::to_value(metadata).unwrap();
    assert_eq!(json["page_count"], 3);
    assert_eq!(json["item_count_on_page"], 4);
}
