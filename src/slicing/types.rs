//! Slicing types and traits
//!
//! Defines the capability contract every synchronous superset implements.

use super::strategies;
use crate::error::Result;
use crate::math;
use crate::page::{EmptyPagedList, Page, PagedList};
use crate::types::Capability;
use std::collections::VecDeque;

/// A request for one page of a superset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based number of the requested page
    pub page_number: usize,
    /// Maximum number of items per page
    pub page_size: usize,
    /// Clamp a page number past the end down to the last page
    pub adjust_last_page_when_exceeding: bool,
}

impl PageRequest {
    /// Create a request that adjusts to the last page when exceeding
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
            adjust_last_page_when_exceeding: true,
        }
    }

    /// Set the adjust-on-exceed policy
    #[must_use]
    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust_last_page_when_exceeding = adjust;
        self
    }

    /// Check the caller contract: positive page number and page size
    pub fn validate(&self) -> Result<()> {
        math::validate_page_number(self.page_number)?;
        math::validate_page_size(self.page_size)
    }
}

/// Outcome of a slicing strategy, before it is wrapped into a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<T> {
    /// Exactly the items of the page
    pub items: Vec<T>,
    /// Page number after any adjustment
    pub page_number: usize,
    /// Number of items in the whole superset
    pub total_item_count: usize,
}

impl<T> Slice<T> {
    /// Wrap into the empty sentinel when the superset had no items, or a
    /// validated page otherwise
    pub fn into_page(self, page_size: usize) -> Result<Page<T>> {
        if self.total_item_count == 0 {
            return Ok(EmptyPagedList::new(page_size)?.into());
        }
        Ok(PagedList::new(self.items, self.page_number, page_size, self.total_item_count)?.into())
    }
}

/// A superset that can be sliced synchronously
pub trait Superset<T>: Sized {
    /// How this kind of source is read
    const CAPABILITY: Capability;

    /// Materialize the requested page, consuming the handle
    fn slice(self, request: &PageRequest) -> Result<Slice<T>>;
}

/// Slice a superset into the requested page
pub fn to_page<T, S: Superset<T>>(superset: S, request: PageRequest) -> Result<Page<T>> {
    request.validate()?;

    let capability = S::CAPABILITY;
    tracing::debug!(
        %capability,
        page_number = request.page_number,
        page_size = request.page_size,
        adjust = request.adjust_last_page_when_exceeding,
        "Slicing superset"
    );

    superset.slice(&request)?.into_page(request.page_size)
}

/// Method syntax for [`to_page`]
pub trait ToPage<T>: Superset<T> {
    /// Page with the adjust-on-exceed policy enabled
    fn to_page(self, page_number: usize, page_size: usize) -> Result<Page<T>> {
        to_page(self, PageRequest::new(page_number, page_size))
    }

    /// Page with an explicit request
    fn to_page_with(self, request: PageRequest) -> Result<Page<T>> {
        to_page(self, request)
    }
}

impl<T, S: Superset<T>> ToPage<T> for S {}

// ============================================================================
// Random Access Sources
// ============================================================================

impl<T: Clone> Superset<T> for &[T] {
    const CAPABILITY: Capability = Capability::RandomAccess;

    fn slice(self, request: &PageRequest) -> Result<Slice<T>> {
        strategies::random_access(self.len(), request, |range| {
            self[range.from..range.end()].to_vec()
        })
    }
}

impl<T: Clone> Superset<T> for &Vec<T> {
    const CAPABILITY: Capability = Capability::RandomAccess;

    fn slice(self, request: &PageRequest) -> Result<Slice<T>> {
        Superset::slice(self.as_slice(), request)
    }
}

impl<T: Clone> Superset<T> for &VecDeque<T> {
    const CAPABILITY: Capability = Capability::RandomAccess;

    fn slice(self, request: &PageRequest) -> Result<Slice<T>> {
        strategies::random_access(self.len(), request, |range| {
            self.range(range.from..range.end()).cloned().collect()
        })
    }
}

// ============================================================================
// Single Pass Sources
// ============================================================================

/// Move-only handle over a sequence that may only be traversed once.
///
/// Slicing consumes the handle, so a second traversal does not compile.
#[derive(Debug)]
pub struct SinglePass<I> {
    iter: I,
}

impl<I: Iterator> SinglePass<I> {
    /// Wrap any sequence
    pub fn new<S: IntoIterator<IntoIter = I>>(source: S) -> Self {
        Self {
            iter: source.into_iter(),
        }
    }
}

impl<I: Iterator> Superset<I::Item> for SinglePass<I> {
    const CAPABILITY: Capability = Capability::SinglePass;

    fn slice(self, request: &PageRequest) -> Result<Slice<I::Item>> {
        request.validate()?;

        if request.adjust_last_page_when_exceeding {
            Ok(strategies::single_pass_clamped(self.iter, request))
        } else {
            Ok(strategies::single_pass_unclamped(self.iter, request))
        }
    }
}
