//! Paging math
//!
//! Pure functions computing page count, effective page number and the
//! index window a page occupies in its superset.

use crate::error::{Error, Result};

/// Contiguous index window `[from, from + count)` of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// Index of the first item on the page
    pub from: usize,
    /// Number of items on the page
    pub count: usize,
}

impl PageRange {
    /// One past the last index on the page
    pub fn end(&self) -> usize {
        self.from + self.count
    }

    /// Whether the window holds no items
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Reject a zero page number
pub fn validate_page_number(page_number: usize) -> Result<()> {
    if page_number == 0 {
        return Err(Error::invalid_argument(
            "page_number",
            page_number,
            "The page number must be positive.",
        ));
    }
    Ok(())
}

/// Reject a zero page size
pub fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(Error::invalid_argument(
            "page_size",
            page_size,
            "The page size must be positive.",
        ));
    }
    Ok(())
}

/// Number of pages needed for `total_item_count` items.
///
/// Zero items means zero pages, whatever the page size.
pub fn page_count(total_item_count: usize, page_size: usize) -> Result<usize> {
    validate_page_size(page_size)?;
    Ok(total_item_count.div_ceil(page_size))
}

/// Effective page number after the adjust-on-exceed policy.
///
/// Only clamps when `adjust` is set and there is at least one page; an
/// out-of-range number is otherwise returned unchanged.
pub fn clamp_page_number(page_number: usize, page_count: usize, adjust: bool) -> Result<usize> {
    validate_page_number(page_number)?;
    if adjust && page_count >= 1 && page_number > page_count {
        Ok(page_count)
    } else {
        Ok(page_number)
    }
}

/// Index window of `page_number` within `total_item_count` items
pub fn page_range(
    page_number: usize,
    page_size: usize,
    total_item_count: usize,
) -> Result<PageRange> {
    validate_page_number(page_number)?;
    validate_page_size(page_size)?;

    let from = (page_number - 1).saturating_mul(page_size);
    let count = total_item_count.saturating_sub(from).min(page_size);
    Ok(PageRange { from, count })
}

/// Clamp and compute the window in one step, as every strategy with a known
/// total does.
pub fn resolve(
    page_number: usize,
    page_size: usize,
    total_item_count: usize,
    adjust: bool,
) -> Result<(usize, PageRange)> {
    let pages = page_count(total_item_count, page_size)?;
    let effective = clamp_page_number(page_number, pages, adjust)?;
    if effective != page_number {
        tracing::debug!(
            requested = page_number,
            page_count = pages,
            "page number exceeds page count, adjusted to last page"
        );
    }
    let range = page_range(effective, page_size, total_item_count)?;
    Ok((effective, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 10 => 0; "empty superset has no pages")]
    #[test_case(1, 10 => 1)]
    #[test_case(10, 10 => 1)]
    #[test_case(11, 10 => 2)]
    #[test_case(100, 11 => 10)]
    #[test_case(9, 4 => 3)]
    #[test_case(100, 1 => 100)]
    fn test_page_count(total: usize, size: usize) -> usize {
        page_count(total, size).unwrap()
    }

    #[test]
    fn test_page_count_rejects_zero_size() {
        let err = page_count(10, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "page_size",
                ..
            }
        ));
    }

    #[test_case(11, 10, true => 10; "clamped to last page")]
    #[test_case(11, 10, false => 11; "left alone without adjust")]
    #[test_case(5, 10, true => 5; "in range")]
    #[test_case(3, 0, true => 3; "no pages to clamp to")]
    fn test_clamp_page_number(page_number: usize, pages: usize, adjust: bool) -> usize {
        clamp_page_number(page_number, pages, adjust).unwrap()
    }

    #[test]
    fn test_clamp_rejects_zero_page_number() {
        assert!(clamp_page_number(0, 10, true).is_err());
    }

    #[test]
    fn test_page_range_in_range() {
        let range = page_range(3, 10, 100).unwrap();
        assert_eq!(range, PageRange { from: 20, count: 10 });
        assert_eq!(range.end(), 30);
    }

    #[test]
    fn test_page_range_partial_last_page() {
        let range = page_range(10, 11, 100).unwrap();
        assert_eq!(range, PageRange { from: 99, count: 1 });
    }

    #[test]
    fn test_page_range_past_the_end() {
        let range = page_range(11, 10, 100).unwrap();
        assert_eq!(range.from, 100);
        assert!(range.is_empty());
    }

    #[test]
    fn test_page_range_huge_page_number_does_not_overflow() {
        let range = page_range(usize::MAX, 10, 100).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_resolve_adjusts_to_last_page() {
        let (effective, range) = resolve(11, 10, 100, true).unwrap();
        assert_eq!(effective, 10);
        assert_eq!(range, PageRange { from: 90, count: 10 });
    }

    #[test]
    fn test_resolve_without_adjust() {
        let (effective, range) = resolve(10, 11, 100, false).unwrap();
        assert_eq!(effective, 10);
        assert_eq!(range, PageRange { from: 99, count: 1 });
    }
}
