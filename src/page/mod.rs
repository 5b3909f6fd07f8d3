//! Page container module
//!
//! Immutable, already-materialized pages.
//!
//! # Overview
//!
//! - `PagedList` - a validated page of items plus its metadata
//! - `EmptyPagedList` - the zero-item superset, which has no pages at all
//! - `Page` - either of the two, as returned by every slicing entry point

mod types;

pub use types::{EmptyPagedList, Page, PagedList};
