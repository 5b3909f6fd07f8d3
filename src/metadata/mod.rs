//! Page metadata module
//!
//! The five numeric facts describing where a page sits in its superset,
//! and the navigation helpers derived from them.

mod types;

pub use types::{MetadataExt, PageMetadata, PagedListMetadata};

#[cfg(test)]
mod tests;
