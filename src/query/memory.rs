//! In-memory query source
//!
//! Lets any owned collection stand in for a deferred query, which is handy
//! for tests and for callers that want the async page over local data.

use super::types::{ItemStream, QuerySource};
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A deferred query over shared, already-ordered items
pub struct MemoryQuery<T> {
    items: Arc<[T]>,
    offset: usize,
    limit: Option<usize>,
}

impl<T> MemoryQuery<T> {
    /// Create a query over every item
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
            offset: 0,
            limit: None,
        }
    }

    /// Index window the composed skip/take selects
    fn window(&self) -> Range<usize> {
        let len = self.items.len();
        let start = self.offset.min(len);
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(len),
            None => len,
        };
        start..end
    }
}

impl<T> Clone for MemoryQuery<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl<T> fmt::Debug for MemoryQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryQuery")
            .field("len", &self.items.len())
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T> From<Vec<T>> for MemoryQuery<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[async_trait]
impl<T> QuerySource for MemoryQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn count(&self) -> Result<usize> {
        Ok(self.window().len())
    }

    fn skip(mut self, n: usize) -> Self {
        self.offset = self.offset.saturating_add(n);
        self.limit = self.limit.map(|limit| limit.saturating_sub(n));
        self
    }

    fn take(mut self, n: usize) -> Self {
        self.limit = Some(self.limit.map_or(n, |limit| limit.min(n)));
        self
    }

    async fn fetch(self) -> Result<Vec<T>> {
        Ok(self.items[self.window()].to_vec())
    }

    fn into_stream(self) -> ItemStream<T> {
        let window = self.window();
        let items = self.items;
        stream::iter(window.map(move |index| Ok(items[index].clone()))).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    fn query() -> MemoryQuery<u32> {
        MemoryQuery::new((1..=10u32).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_skip_take_compose() {
        let items = query().skip(2).take(3).fetch().await.unwrap();
        assert_eq!(items, vec![3, 4, 5]);

        // Skipping after a take shrinks the take window
        let items = query().take(5).skip(3).fetch().await.unwrap();
        assert_eq!(items, vec![4, 5]);

        let items = query().take(5).take(8).fetch().await.unwrap();
        assert_eq!(items.len(), 5);
    }

    #[tokio::test]
    async fn test_count_respects_window() {
        assert_eq!(query().count().await.unwrap(), 10);
        assert_eq!(query().skip(8).count().await.unwrap(), 2);
        assert_eq!(query().skip(20).take(5).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stream_yields_window_in_order() {
        let items: Vec<u32> = query().skip(7).into_stream().try_collect().await.unwrap();
        assert_eq!(items, vec![8, 9, 10]);
    }
}
