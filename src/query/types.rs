//! Deferred query types and traits

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

/// Type alias for the item stream returned by `into_stream()`
pub type ItemStream<T> = BoxStream<'static, Result<T>>;

// ============================================================================
// Query Source Trait
// ============================================================================

/// A lazy query that counts and slices on the far side of a round trip.
///
/// Composing with `skip`/`take` has no side effects; nothing runs until
/// `count`, `fetch` or the returned stream is polled.
#[async_trait]
pub trait QuerySource: Send + Sync + Sized + 'static {
    /// Row type the query yields
    type Item: Send + 'static;

    /// Number of items the query would yield, in one round trip
    async fn count(&self) -> Result<usize>;

    /// Drop the first `n` items
    #[must_use]
    fn skip(self, n: usize) -> Self;

    /// Keep at most `n` items
    #[must_use]
    fn take(self, n: usize) -> Self;

    /// Execute the query once and collect every item
    async fn fetch(self) -> Result<Vec<Self::Item>>;

    /// Deferred enumeration; the query runs on first poll
    fn into_stream(self) -> ItemStream<Self::Item> {
        stream::once(self.fetch())
            .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }
}

// ============================================================================
// Bounded Query
// ============================================================================

/// An unexecuted query narrowed to one page
#[derive(Debug, Clone)]
pub struct BoundedQuery<Q> {
    /// The query with skip/take applied
    pub query: Q,
    /// Page number after any adjustment
    pub page_number: usize,
    /// Number of items in the whole superset
    pub total_item_count: usize,
    /// Number of items the bounded query is expected to yield
    pub item_count_on_page: usize,
}
