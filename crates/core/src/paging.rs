//! Page-parameter clamping and page-count arithmetic.
//!
//! Out-of-range paging input is clamped into range rather than rejected, so
//! a request can never fail on paging alone.

use serde::{Deserialize, Serialize};

/// Default page number when none is supplied.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when none is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 8;
/// Upper bound on the page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalized pagination parameters.
///
/// Construct via [`PageParams::clamped`]; a value of this type always holds
/// `page >= 1` and `page_size` in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Clamp raw paging input into range.
    ///
    /// `page` is raised to at least 1 and `page_size` is forced into
    /// `1..=100`. Negative input is handled upstream by deserializing into
    /// signed integers and flooring at zero before calling this.
    #[must_use]
    pub fn clamped(page: i64, page_size: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let page_size =
            u32::try_from(page_size.clamp(1, i64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Offset of the first item of this page within the filtered set.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// Total number of pages for `total` items, with a floor of one page.
///
/// `page_size` of zero is treated as one to keep the function total.
#[must_use]
pub fn page_count(total: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    (total.div_ceil(page_size)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PageParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 8);
    }

    #[test]
    fn page_clamped_up_to_one() {
        assert_eq!(PageParams::clamped(0, 8).page, 1);
        assert_eq!(PageParams::clamped(-5, 8).page, 1);
    }

    #[test]
    fn page_size_clamped_into_range() {
        assert_eq!(PageParams::clamped(1, 0).page_size, 1);
        assert_eq!(PageParams::clamped(1, -1).page_size, 1);
        assert_eq!(PageParams::clamped(1, 100).page_size, 100);
        assert_eq!(PageParams::clamped(1, 101).page_size, 100);
    }

    #[test]
    fn in_range_values_untouched() {
        let params = PageParams::clamped(3, 25);
        assert_eq!(params.page, 3);
        assert_eq!(params.page_size, 25);
    }

    #[test]
    fn offsets() {
        assert_eq!(PageParams::clamped(1, 8).offset(), 0);
        assert_eq!(PageParams::clamped(3, 8).offset(), 16);
    }

    #[test]
    fn page_count_floors_at_one() {
        assert_eq!(page_count(0, 8), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(3, 2), 2);
        assert_eq!(page_count(16, 8), 2);
        assert_eq!(page_count(17, 8), 3);
    }
}
