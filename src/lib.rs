// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagewise
//!
//! Pagination for in-memory collections, one-pass iterators and deferred
//! queries, with metadata that stays consistent across all three.
//!
//! ## Features
//!
//! - **Random Access Slicing**: Slices, `Vec` and `VecDeque` read only the page window
//! - **Single Pass Slicing**: Iterators are traversed at most once, length unknown up front
//! - **Deferred Queries**: One count round trip plus one skip/take round trip per page
//! - **Async Pages**: Metadata up front, items streamed lazily with caching and cancellation
//! - **Partition**: Split a whole sequence into every page in one pass
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::{MetadataExt, PagedListMetadata, Result, ToPage};
//!
//! fn main() -> Result<()> {
//!     let items: Vec<u32> = (1..=9).collect();
//!
//!     // Page 3 of size 4 holds only the last item
//!     let page = items.as_slice().to_page(3, 4)?;
//!     assert_eq!(page.items(), &[9]);
//!     assert!(page.is_last_page());
//!
//!     // Page 10 is clamped to the last page
//!     let page = items.as_slice().to_page(10, 4)?;
//!     assert_eq!(page.page_number()?, 3);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Page Model                             │
//! │  PagedList<T>     EmptyPagedList<T>     Page<T>    metadata     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬──────────────────────┐
//! │   Slicing    │          Query           │      Partition       │
//! ├──────────────┼──────────────────────────┼──────────────────────┤
//! │ Random access│ count + skip/take        │ every page, one pass │
//! │ Single pass  │ AsyncPagedList (stream)  │                      │
//! │              │ DuckDB / in-memory       │                      │
//! └──────────────┴──────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pagewise
pub mod error;

/// Common types and type aliases
pub mod types;

/// Paging arithmetic
pub mod math;

/// Page metadata and navigation helpers
pub mod metadata;

/// Materialized pages and the empty sentinel
pub mod page;

/// Synchronous slicing of in-memory and single-pass sources
pub mod slicing;

/// Deferred query paging
pub mod query;

/// Database query support via DuckDB
pub mod database;

/// Splitting a sequence into all of its pages
pub mod partition;

/// Paging defaults
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use metadata::{MetadataExt, PageMetadata, PagedListMetadata};
pub use page::{EmptyPagedList, Page, PagedList};
pub use partition::partition;
pub use query::{
    query_to_async_page, query_to_page, to_bounded_query, AsyncPage, AsyncPagedList,
    BoundedQuery, QuerySource,
};
pub use slicing::{to_page, PageRequest, SinglePass, ToPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
