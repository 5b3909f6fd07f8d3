//! Partition module
//!
//! Splits a whole superset into every one of its pages.
//!
//! # Overview
//!
//! The superset is traversed exactly once, so any one-pass sequence can be
//! partitioned. The grand total is only known once the traversal ends, after
//! which every bucket is wrapped as a page carrying that total and its own
//! one-based position.

use crate::error::Result;
use crate::math;
use crate::page::PagedList;
use crate::slicing::group_pages;

/// Split `superset` into consecutive pages of `page_size` items.
///
/// The last page may be shorter. An empty superset yields no pages at all.
pub fn partition<I>(superset: I, page_size: usize) -> Result<Vec<PagedList<I::Item>>>
where
    I: IntoIterator,
{
    math::validate_page_size(page_size)?;

    let (buckets, total_item_count) = group_pages(superset.into_iter(), page_size);
    tracing::debug!(
        page_size,
        total_item_count,
        page_count = buckets.len(),
        "Partitioned superset"
    );

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, items)| PagedList::new(items, index + 1, page_size, total_item_count))
        .collect()
}
