//! Deferred page whose items are fetched on demand

use super::types::ItemStream;
use crate::error::{Error, Result};
use crate::math;
use crate::metadata::PagedListMetadata;
use crate::page::{EmptyPagedList, Page, PagedList};
use futures::StreamExt;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Observable phase of an [`AsyncPagedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing fetched yet
    Idle,
    /// First listing in progress
    Fetching,
    /// Fully listed and cached; can be rewound
    Cached,
    /// Fully listed without a cache
    Exhausted,
    /// The source failed or yielded more items than the page holds
    Failed,
    /// Listing aborted through the cancellation token
    Cancelled,
}

enum FetchState<T> {
    Idle(ItemStream<T>),
    Fetching(ItemStream<T>),
    Cached { cursor: usize },
    Exhausted,
    Failed,
    Cancelled,
}

// ============================================================================
// Async Paged List
// ============================================================================

/// A page whose metadata is known up front while its items are still on the
/// far side of a query.
///
/// The bounded stream is pulled one item at a time. Each pull races the
/// cancellation token, so a cancelled listing stops at the next await and
/// leaves the page in [`FetchPhase::Cancelled`].
pub struct AsyncPagedList<T> {
    state: FetchState<T>,
    cache: Option<Vec<T>>,
    fetched: usize,
    page_number: usize,
    page_size: usize,
    total_item_count: usize,
    page_count: usize,
    item_count_on_page: usize,
}

impl<T> AsyncPagedList<T> {
    /// Create a deferred page over an unexecuted bounded stream.
    ///
    /// `count` is the number of items the stream is expected to yield.
    pub fn new(
        subset: ItemStream<T>,
        count: usize,
        page_number: usize,
        page_size: usize,
        total_item_count: usize,
        cache_items: bool,
    ) -> Result<Self> {
        math::validate_page_number(page_number)?;
        math::validate_page_size(page_size)?;

        if count > page_size {
            return Err(Error::invariant(format!(
                "The subset's size ({count}) cannot be larger than the page size ({page_size})."
            )));
        }
        if count > total_item_count {
            return Err(Error::invariant(format!(
                "The subset's size ({count}) cannot be larger than the total item count ({total_item_count})."
            )));
        }

        let page_count = math::page_count(total_item_count, page_size)?;

        Ok(Self {
            state: FetchState::Idle(subset),
            cache: cache_items.then(|| Vec::with_capacity(count)),
            fetched: 0,
            page_number: page_number.min(page_count.max(1)),
            page_size,
            total_item_count,
            page_count,
            item_count_on_page: count,
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

    /// Known before anything is fetched
    pub fn item_count_on_page(&self) -> usize {
        self.item_count_on_page
    }

    /// Whether listed items are kept for repeated listings
    pub fn caches_items(&self) -> bool {
        self.cache.is_some()
    }

    /// Where the listing currently stands
    pub fn phase(&self) -> FetchPhase {
        match self.state {
            FetchState::Idle(_) => FetchPhase::Idle,
            FetchState::Fetching(_) => FetchPhase::Fetching,
            FetchState::Cached { .. } => FetchPhase::Cached,
            FetchState::Exhausted => FetchPhase::Exhausted,
            FetchState::Failed => FetchPhase::Failed,
            FetchState::Cancelled => FetchPhase::Cancelled,
        }
    }

    /// Start the next listing from the first item.
    ///
    /// Only an untouched page or a cached one can be listed again.
    pub fn rewind(&mut self) -> Result<()> {
        match &mut self.state {
            FetchState::Idle(_) => Ok(()),
            FetchState::Cached { cursor } => {
                *cursor = 0;
                Ok(())
            }
            FetchState::Fetching(_) => Err(Error::invalid_state("The page is still being listed.")),
            FetchState::Exhausted => Err(Error::invalid_state(
                "The page's items were not cached, so it can only be listed once.",
            )),
            FetchState::Failed => Err(failed()),
            FetchState::Cancelled => Err(Error::invalid_state("The page's listing was cancelled.")),
        }
    }

    fn begin_fetch(&mut self) {
        let state = std::mem::replace(&mut self.state, FetchState::Exhausted);
        self.state = match state {
            FetchState::Idle(stream) => FetchState::Fetching(stream),
            other => other,
        };
    }

    fn fail(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }
        self.state = FetchState::Failed;
    }
}

fn failed() -> Error {
    Error::invalid_state("The page's listing failed and cannot be resumed.")
}

impl<T: Clone> AsyncPagedList<T> {
    /// Next item of the current listing, or `None` at its end
    pub async fn next(&mut self, cancel: &CancellationToken) -> Result<Option<T>> {
        if let FetchState::Idle(_) = self.state {
            tracing::debug!(
                page_number = self.page_number,
                item_count_on_page = self.item_count_on_page,
                "Starting deferred page listing"
            );
            self.begin_fetch();
        }

        let stream = match &mut self.state {
            FetchState::Cached { cursor } => {
                let item = self.cache.as_ref().and_then(|cache| cache.get(*cursor)).cloned();
                if item.is_some() {
                    *cursor += 1;
                }
                return Ok(item);
            }
            FetchState::Exhausted => return Ok(None),
            FetchState::Failed => return Err(failed()),
            FetchState::Cancelled => return Err(Error::Cancelled),
            FetchState::Idle(stream) | FetchState::Fetching(stream) => stream,
        };

        let pulled = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            item = stream.next() => Some(item),
        };

        match pulled {
            None => {
                tracing::warn!(page_number = self.page_number, "Deferred page listing cancelled");
                self.state = FetchState::Cancelled;
                Err(Error::Cancelled)
            }
            Some(Some(Ok(item))) => {
                self.fetched += 1;
                if self.fetched > self.item_count_on_page {
                    self.fail();
                    return Err(Error::invariant(format!(
                        "The source yielded more items than the page holds ({}).",
                        self.item_count_on_page
                    )));
                }

                tracing::trace!(page_number = self.page_number, "Fetched deferred item");
                if let Some(cache) = &mut self.cache {
                    cache.push(item.clone());
                }
                Ok(Some(item))
            }
            Some(Some(Err(err))) => {
                tracing::warn!(
                    page_number = self.page_number,
                    error = %err,
                    "Deferred page source failed"
                );
                self.fail();
                Err(err)
            }
            Some(None) => {
                self.state = match &self.cache {
                    Some(cache) => FetchState::Cached {
                        cursor: cache.len(),
                    },
                    None => FetchState::Exhausted,
                };
                Ok(None)
            }
        }
    }

    /// List the whole page from its first item
    pub async fn collect(&mut self, cancel: &CancellationToken) -> Result<Vec<T>> {
        self.rewind()?;

        let mut items = Vec::with_capacity(self.item_count_on_page);
        while let Some(item) = self.next(cancel).await? {
            items.push(item);
        }
        Ok(items)
    }

    /// List the page and turn it into a materialized [`PagedList`]
    pub async fn materialize(mut self, cancel: &CancellationToken) -> Result<PagedList<T>> {
        let items = self.collect(cancel).await?;
        PagedList::new(items, self.page_number, self.page_size, self.total_item_count)
    }
}

impl<T> PagedListMetadata for AsyncPagedList<T> {
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

impl<T> fmt::Debug for AsyncPagedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPagedList")
            .field("phase", &self.phase())
            .field("page_number", &self.page_number)
            .field("page_size", &self.page_size)
            .field("total_item_count", &self.total_item_count)
            .field("page_count", &self.page_count)
            .field("item_count_on_page", &self.item_count_on_page)
            .field("caches_items", &self.caches_items())
            .finish()
    }
}

// ============================================================================
// Async Page
// ============================================================================

/// Result of paging a query lazily: a deferred page or the empty sentinel
#[derive(Debug)]
pub enum AsyncPage<T> {
    /// The query has at least one item
    Items(AsyncPagedList<T>),
    /// The query has no items
    Empty(EmptyPagedList<T>),
}

impl<T> AsyncPage<T> {
    /// Whether this is the zero-item sentinel
    pub fn is_empty_set(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// The deferred page, if any
    pub fn as_paged_list_mut(&mut self) -> Option<&mut AsyncPagedList<T>> {
        match self {
            Self::Items(list) => Some(list),
            Self::Empty(_) => None,
        }
    }
}

impl<T: Clone> AsyncPage<T> {
    /// Fetch every item into a materialized [`Page`]
    pub async fn materialize(self, cancel: &CancellationToken) -> Result<Page<T>> {
        match self {
            Self::Items(list) => Ok(list.materialize(cancel).await?.into()),
            Self::Empty(empty) => Ok(empty.into()),
        }
    }
}

impl<T> PagedListMetadata for AsyncPage<T> {
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

impl<T> From<AsyncPagedList<T>> for AsyncPage<T> {
    fn from(list: AsyncPagedList<T>) -> Self {
        Self::Items(list)
    }
}

impl<T> From<EmptyPagedList<T>> for AsyncPage<T> {
    fn from(empty: EmptyPagedList<T>) -> Self {
        Self::Empty(empty)
    }
}
