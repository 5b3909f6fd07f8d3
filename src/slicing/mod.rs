//! Slicing module
//!
//! Supports: Random access, Single pass
//!
//! # Overview
//!
//! A superset declares how it can be read through its [`Capability`]. The
//! matching strategy materializes exactly the requested page:
//! - Random access sources compute the window and copy only those items
//! - Single pass sources are scanned once, counting everything while
//!   keeping at most one page in memory
//!
//! Deferred queries live in [`crate::query`] since their round trips are
//! asynchronous.
//!
//! [`Capability`]: crate::types::Capability

mod strategies;
mod types;

pub use types::{to_page, PageRequest, SinglePass, Slice, Superset, ToPage};

pub(crate) use strategies::group_pages;
