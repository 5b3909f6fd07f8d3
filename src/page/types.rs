//! Page container types

use crate::error::{Error, Result};
use crate::math;
use crate::metadata::PagedListMetadata;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::marker::PhantomData;

// ============================================================================
// Populated Page
// ============================================================================

/// A materialized page of a superset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_number: usize,
    page_size: usize,
    total_item_count: usize,
    page_count: usize,
}

impl<T> PagedList<T> {
    /// Create a page from an already sliced subset.
    ///
    /// The reported page number is clamped to the page count, so an
    /// out-of-range number passed alongside a correct slice never leaks
    /// into the metadata.
    pub fn new(
        items: Vec<T>,
        page_number: usize,
        page_size: usize,
        total_item_count: usize,
    ) -> Result<Self> {
        math::validate_page_number(page_number)?;
        math::validate_page_size(page_size)?;

        if items.len() > page_size {
            return Err(Error::invariant(format!(
                "The subset's size ({}) cannot be larger than the page size ({page_size}).",
                items.len()
            )));
        }
        if items.len() > total_item_count {
            return Err(Error::invariant(format!(
                "The subset's size ({}) cannot be larger than the total item count ({total_item_count}).",
                items.len()
            )));
        }

        let page_count = math::page_count(total_item_count, page_size)?;

        Ok(Self {
            items,
            page_number: page_number.min(page_count.max(1)),
            page_size,
            total_item_count,
            page_count,
        })
    }

    /// One-based number of the page
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Maximum number of items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items in the whole superset
    pub fn total_item_count(&self) -> usize {
        self.total_item_count
    }

    /// Number of pages in the superset
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of items on this page
    pub fn item_count_on_page(&self) -> usize {
        self.items.len()
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, failing outside the page
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or_else(|| Error::out_of_bounds(index, self.items.len()))
    }

    /// The page's items in superset order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Take ownership of the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> PagedListMetadata for PagedList<T> {
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
        Ok(self.items.len())
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for PagedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_page(
            serializer,
            Some(self.page_number),
            self.page_size,
            self.total_item_count,
            self.page_count,
            &self.items,
        )
    }
}

// ============================================================================
// Empty Sentinel
// ============================================================================

/// The page of a superset with zero items.
///
/// There is no "page 1 of 0": asking for the page number or the item count
/// on the page is an error rather than a misleading zero.
pub struct EmptyPagedList<T> {
    page_size: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyPagedList<T> {
    /// Create the sentinel, keeping the requested page size
    pub fn new(page_size: usize) -> Result<Self> {
        math::validate_page_size(page_size)?;
        Ok(Self {
            page_size,
            _marker: PhantomData,
        })
    }

    /// Always fails: there are no pages
    pub fn page_number(&self) -> Result<usize> {
        Err(Error::NoPages)
    }

    /// Page size kept from the request
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always zero
    pub fn total_item_count(&self) -> usize {
        0
    }

    /// Always zero
    pub fn page_count(&self) -> usize {
        0
    }

    /// Always fails: there are no pages
    pub fn item_count_on_page(&self) -> Result<usize> {
        Err(Error::NoPages)
    }

    /// Always zero
    pub fn len(&self) -> usize {
        0
    }

    /// Always true
    pub fn is_empty(&self) -> bool {
        true
    }

    /// Always fails with a bounds error
    pub fn get(&self, index: usize) -> Result<&T> {
        Err(Error::out_of_bounds(index, 0))
    }

    /// Iterate over no items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        <&[T]>::default().iter()
    }
}

impl<T> PagedListMetadata for EmptyPagedList<T> {
    fn page_number(&self) -> Result<usize> {
        Err(Error::NoPages)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn total_item_count(&self) -> usize {
        0
    }

    fn page_count(&self) -> usize {
        0
    }

    fn item_count_on_page(&self) -> Result<usize> {
        Err(Error::NoPages)
    }
}

impl<T> fmt::Debug for EmptyPagedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmptyPagedList")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl<T> Clone for EmptyPagedList<T> {
    fn clone(&self) -> Self {
        Self {
            page_size: self.page_size,
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for EmptyPagedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.page_size == other.page_size
    }
}

impl<T> Eq for EmptyPagedList<T> {}

impl<T> Serialize for EmptyPagedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_page::<S, ()>(serializer, None, self.page_size, 0, 0, &[])
    }
}

// ============================================================================
// Page
// ============================================================================

/// Result of slicing a superset: a populated page or the empty sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<T> {
    /// The superset has at least one item
    Items(PagedList<T>),
    /// The superset has no items
    Empty(EmptyPagedList<T>),
}

impl<T> Page<T> {
    /// Whether this is the zero-item sentinel
    pub fn is_empty_set(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// The populated page, if any
    pub fn as_paged_list(&self) -> Option<&PagedList<T>> {
        match self {
            Self::Items(list) => Some(list),
            Self::Empty(_) => None,
        }
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        match self {
            Self::Items(list) => list.len(),
            Self::Empty(_) => 0,
        }
    }

    /// The page holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`, failing outside the page
    pub fn get(&self, index: usize) -> Result<&T> {
        match self {
            Self::Items(list) => list.get(index),
            Self::Empty(empty) => empty.get(index),
        }
    }

    /// The page's items in superset order
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(list) => list.items(),
            Self::Empty(_) => <&[T]>::default(),
        }
    }

    /// Iterate over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items().iter()
    }

    /// Take ownership of the items
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Items(list) => list.into_items(),
            Self::Empty(_) => Vec::new(),
        }
    }
}

impl<T> PagedListMetadata for Page<T> {
    fn page_number(&self) -> Result<usize> {
        match self {
            Self::Items(list) => Ok(list.page_number()),
            Self::Empty(empty) => empty.page_number(),
        }
    }

    fn page_size(&self) -> usize {
        match self {
            Self::Items(list) => list.page_size(),
            Self::Empty(empty) => empty.page_size(),
        }
    }

    fn total_item_count(&self) -> usize {
        match self {
            Self::Items(list) => list.total_item_count(),
            Self::Empty(_) => 0,
        }
    }

    fn page_count(&self) -> usize {
        match self {
            Self::Items(list) => list.page_count(),
            Self::Empty(_) => 0,
        }
    }

    fn item_count_on_page(&self) -> Result<usize> {
        match self {
            Self::Items(list) => Ok(list.item_count_on_page()),
            Self::Empty(empty) => empty.item_count_on_page(),
        }
    }
}

impl<T> From<PagedList<T>> for Page<T> {
    fn from(list: PagedList<T>) -> Self {
        Self::Items(list)
    }
}

impl<T> From<EmptyPagedList<T>> for Page<T> {
    fn from(empty: EmptyPagedList<T>) -> Self {
        Self::Empty(empty)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_items().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Items(list) => list.serialize(serializer),
            Self::Empty(empty) => empty.serialize(serializer),
        }
    }
}

/// Serialize page metadata and items as one flat object
fn serialize_page<S: Serializer, T: Serialize>(
    serializer: S,
    page_number: Option<usize>,
    page_size: usize,
    total_item_count: usize,
    page_count: usize,
    items: &[T],
) -> std::result::Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Page", 6)?;
    state.serialize_field("page_number", &page_number)?;
    state.serialize_field("page_size", &page_size)?;
    state.serialize_field("total_item_count", &total_item_count)?;
    state.serialize_field("page_count", &page_count)?;
    state.serialize_field("item_count_on_page", &page_number.map(|_| items.len()))?;
    state.serialize_field("items", items)?;
    state.end()
}
