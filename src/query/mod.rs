//! Deferred query module
//!
//! Supports: Count + bounded range paging, lazily streamed pages
//!
//! # Overview
//!
//! A [`QuerySource`] is a lazy query that can count itself and compose
//! skip/take before running. Paging one costs a count round trip and at
//! most one range round trip:
//! - [`query_to_page`] materializes the page right away
//! - [`to_bounded_query`] hands back the unexecuted, narrowed query
//! - [`query_to_async_page`] counts now and streams the items on demand,
//!   optionally caching them for repeated listings
//!
//! # Example
//!
//! ```rust,ignore
//! use pagewise::query::{query_to_page, MemoryQuery};
//! use pagewise::slicing::PageRequest;
//!
//! let query = MemoryQuery::new((1..=100).collect::<Vec<u32>>());
//! let page = query_to_page(query, PageRequest::new(11, 10)).await?;
//! assert_eq!(page.items().first(), Some(&91));
//! ```

mod async_page;
mod memory;
mod paging;
mod types;

pub use async_page::{AsyncPage, AsyncPagedList, FetchPhase};
pub use memory::MemoryQuery;
pub use paging::{query_to_async_page, query_to_page, to_bounded_query};
pub use types::{BoundedQuery, ItemStream, QuerySource};
