//! Slicing strategy implementations
//!
//! Each strategy handles one source capability. All of them report the same
//! page number, items and total for the same superset and request.

use super::types::{PageRequest, Slice};
use crate::error::Result;
use crate::math::{self, PageRange};

// ============================================================================
// Random Access
// ============================================================================

/// Random access slicing
///
/// The length is known up front, so the window is computed directly and
/// `copy` reads only the items inside it.
pub(crate) fn random_access<T, F>(len: usize, request: &PageRequest, copy: F) -> Result<Slice<T>>
where
    F: FnOnce(PageRange) -> Vec<T>,
{
    let (page_number, range) = math::resolve(
        request.page_number,
        request.page_size,
        len,
        request.adjust_last_page_when_exceeding,
    )?;

    let items = if range.is_empty() {
        Vec::new()
    } else {
        copy(range)
    };

    Ok(Slice {
        items,
        page_number,
        total_item_count: len,
    })
}

// ============================================================================
// Single Pass
// ============================================================================

/// Single pass slicing that lands on the last page when the requested one
/// does not exist.
///
/// The buffer always holds the page currently being filled. It only rolls
/// over to the next page once it is full, another item arrives, and the
/// requested page has not been reached yet.
pub(crate) fn single_pass_clamped<I: Iterator>(items: I, request: &PageRequest) -> Slice<I::Item> {
    let page_size = request.page_size;
    let mut buffer = Vec::new();
    let mut current_page = 1;
    let mut total_item_count = 0;

    for item in items {
        total_item_count += 1;

        if buffer.len() < page_size {
            buffer.push(item);
        } else if current_page < request.page_number {
            buffer.clear();
            current_page += 1;
            buffer.push(item);
        }
    }

    Slice {
        items: buffer,
        page_number: current_page,
        total_item_count,
    }
}

/// Single pass slicing with fixed skip/take counters.
///
/// Items after the window are only counted.
pub(crate) fn single_pass_unclamped<I: Iterator>(
    items: I,
    request: &PageRequest,
) -> Slice<I::Item> {
    let page_size = request.page_size;
    let mut skip = (request.page_number - 1).saturating_mul(page_size);
    let mut buffer = Vec::new();
    let mut total_item_count = 0;

    for item in items {
        total_item_count += 1;

        if skip > 0 {
            skip -= 1;
        } else if buffer.len() < page_size {
            buffer.push(item);
        }
    }

    Slice {
        items: buffer,
        page_number: request.page_number,
        total_item_count,
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Group a sequence into consecutive buckets of `page_size` items in one
/// traversal, returning the buckets and the grand total.
pub(crate) fn group_pages<I: Iterator>(items: I, page_size: usize) -> (Vec<Vec<I::Item>>, usize) {
    let mut pages: Vec<Vec<I::Item>> = Vec::new();
    let mut total_item_count = 0;

    for item in items {
        match pages.last_mut() {
            Some(page) if page.len() < page_size => page.push(item),
            _ => {
                let mut page = Vec::new();
                page.push(item);
                pages.push(page);
            }
        }
        total_item_count += 1;
    }

    (pages, total_item_count)
}
