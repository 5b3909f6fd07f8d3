//! Page metadata types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Plain record of a page's position within its superset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// One-based number of the page
    pub page_number: usize,
    /// Maximum number of items per page
    pub page_size: usize,
    /// Number of items in the whole superset
    pub total_item_count: usize,
    /// Number of pages in the superset
    pub page_count: usize,
    /// Number of items actually on this page
    pub item_count_on_page: usize,
}

/// Anything exposing the five page metadata fields.
///
/// `page_number` and `item_count_on_page` are fallible because a superset
/// with zero items has no page to report on.
pub trait PagedListMetadata {
    /// One-based number of the page
    fn page_number(&self) -> Result<usize>;

    /// Maximum number of items per page
    fn page_size(&self) -> usize;

    /// Number of items in the whole superset
    fn total_item_count(&self) -> usize;

    /// Number of pages in the superset
    fn page_count(&self) -> usize;

    /// Number of items actually on this page
    fn item_count_on_page(&self) -> Result<usize>;

    /// Snapshot all five fields
    fn metadata(&self) -> Result<PageMetadata> {
        Ok(PageMetadata {
            page_number: self.page_number()?,
            page_size: self.page_size(),
            total_item_count: self.total_item_count(),
            page_count: self.page_count(),
            item_count_on_page: self.item_count_on_page()?,
        })
    }
}

impl PagedListMetadata for PageMetadata {
    fn page_number(&self) -> Result<usize> {
        Ok(self.page_number)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn total_item_count(&self) -> usize {
        self.total_item_count
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn item_count_on_page(&self) -> Result<usize> {
        Ok(self.item_count_on_page)
    }
}

/// Navigation helpers for any [`PagedListMetadata`].
///
/// All of them answer `false` when there are no pages.
pub trait MetadataExt: PagedListMetadata {
    /// The page is the first one
    fn is_first_page(&self) -> bool {
        self.page_number().is_ok_and(|number| number == 1)
    }

    /// The page is the last one
    fn is_last_page(&self) -> bool {
        let pages = self.page_count();
        pages > 0 && self.page_number().is_ok_and(|number| number == pages)
    }

    /// There is a page before this one
    fn has_previous_page(&self) -> bool {
        self.page_count() > 0 && self.page_number().is_ok_and(|number| number > 1)
    }

    /// There is a page after this one
    fn has_next_page(&self) -> bool {
        let pages = self.page_count();
        self.page_number().is_ok_and(|number| number < pages)
    }
}

impl<M: PagedListMetadata + ?Sized> MetadataExt for M {}
