//! Pagination and windowing.
//!
//! A table shows either one page at a time, or a window of the first rows
//! that grows on demand.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Rows added by one "load more".
pub const LOAD_MORE_STEP: usize = 5;

/// Default page sizes offered by the pagination bar.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Paging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paging {
    /// One page at a time.
    Paginated {
        /// Zero-based page index
        page: usize,
        /// Rows per page (at least 1)
        rows_per_page: usize,
    },
    /// The first `rows_per_page` rows.
    Windowed {
        /// Window length (at least 1)
        rows_per_page: usize,
    },
}

impl Default for Paging {
    fn default() -> Self {
        Self::Windowed {
            rows_per_page: DEFAULT_PAGE_SIZES[0],
        }
    }
}

impl Paging {
    /// First page of a paginated table.
    #[must_use]
    pub fn paginated(rows_per_page: usize) -> Self {
        Self::Paginated {
            page: 0,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Windowed table showing `rows_per_page` rows.
    #[must_use]
    pub fn windowed(rows_per_page: usize) -> Self {
        Self::Windowed {
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Check for pagination mode.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(self, Self::Paginated { .. })
    }

    /// Current page (always 0 when windowed).
    #[must_use]
    pub const fn page(&self) -> usize {
        match *self {
            Self::Paginated { page, .. } => page,
            Self::Windowed { .. } => 0,
        }
    }

    /// Rows per page or window length, never below 1 even when the
    /// variant was built directly with 0.
    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        match *self {
            Self::Paginated { rows_per_page, .. } | Self::Windowed { rows_per_page } => {
                if rows_per_page == 0 {
                    1
                } else {
                    rows_per_page
                }
            }
        }
    }

    /// Range of sorted rows that is visible, clipped to `total`.
    #[must_use]
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        let rpp = self.rows_per_page();
        let start = self.page().saturating_mul(rpp).min(total);
        let end = start.saturating_add(rpp).min(total);
        start..end
    }

    /// Blank rows that keep a short last page as tall as a full one.
    ///
    /// Only pages after the first are padded.
    #[must_use]
    pub fn empty_rows(&self, total: usize) -> usize {
        match *self {
            Self::Paginated { page, .. } if page > 0 => page
                .saturating_add(1)
                .saturating_mul(self.rows_per_page())
                .saturating_sub(total),
            _ => 0,
        }
    }

    /// Rows hidden below the window (always 0 when paginated).
    #[must_use]
    pub const fn hidden_rows(&self, total: usize) -> usize {
        match *self {
            Self::Windowed { .. } => total.saturating_sub(self.rows_per_page()),
            Self::Paginated { .. } => 0,
        }
    }

    /// Number of pages needed for `total` rows.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page())
    }

    /// Move to `page`. Pages are not clamped to the row count.
    #[must_use]
    pub const fn with_page(self, page: usize) -> Self {
        match self {
            Self::Paginated { rows_per_page, .. } => Self::Paginated {
                page,
                rows_per_page,
            },
            windowed @ Self::Windowed { .. } => windowed,
        }
    }

    /// Change the page size and return to the first page.
    #[must_use]
    pub fn with_rows_per_page(self, rows_per_page: usize) -> Self {
        let rows_per_page = rows_per_page.max(1);
        match self {
            Self::Paginated { .. } => Self::Paginated {
                page: 0,
                rows_per_page,
            },
            Self::Windowed { .. } => Self::Windowed { rows_per_page },
        }
    }

    /// Grow the window by [`LOAD_MORE_STEP`], capped at `total`.
    ///
    /// Never shrinks the window. Paginated state is returned unchanged.
    #[must_use]
    pub fn load_more(self, total: usize) -> Self {
        match self {
            Self::Windowed { rows_per_page } => Self::Windowed {
                rows_per_page: (rows_per_page + LOAD_MORE_STEP)
                    .min(total)
                    .max(rows_per_page),
            },
            paginated @ Self::Paginated { .. } => paginated,
        }
    }

    /// Position summary for the pagination bar.
    #[must_use]
    pub fn page_info(&self, total: usize) -> PageInfo {
        let page = self.page();
        let rpp = self.rows_per_page();
        let from = if total == 0 {
            0
        } else {
            page.saturating_mul(rpp).saturating_add(1)
        };
        let to = page.saturating_add(1).saturating_mul(rpp).min(total);
        PageInfo {
            from,
            to,
            count: total,
            page,
            rows_per_page: rpp,
            has_previous: page > 0,
            has_next: page.saturating_add(1) < self.page_count(total),
        }
    }
}

/// Where the current page sits within all rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// One-based index of the first row shown (0 when there are no rows)
    pub from: usize,
    /// One-based index of the last row shown
    pub to: usize,
    /// Total rows
    pub count: usize,
    /// Zero-based page
    pub page: usize,
    /// Rows per page
    pub rows_per_page: usize,
    /// Previous page is reachable
    pub has_previous: bool,
    /// Next page is reachable
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_rows_per_page_literal_acts_as_one() {
        let paging = Paging::Paginated {
            page: 1,
            rows_per_page: 0,
        };
        assert_eq!(paging.rows_per_page(), 1);
        assert_eq!(paging.page_count(3), 3);
        assert_eq!(paging.visible_range(3), 1..2);
        let info = paging.page_info(3);
        assert_eq!((info.from, info.to), (2, 2));
        assert!(info.has_next);

        let window = Paging::Windowed { rows_per_page: 0 };
        assert_eq!(window.visible_range(4), 0..1);
        assert_eq!(window.hidden_rows(4), 3);
        assert_eq!(window.page_count(0), 0);
    }

    #[test]
    fn test_default_is_windowed_five() {
        let paging = Paging::default();
        assert!(!paging.is_paginated());
        assert_eq!(paging.rows_per_page(), 5);
        assert_eq!(paging.page(), 0);
    }

    #[test]
    fn test_rows_per_page_at_least_one() {
        assert_eq!(Paging::paginated(0).rows_per_page(), 1);
        assert_eq!(Paging::windowed(0).rows_per_page(), 1);
        assert_eq!(Paging::paginated(5).with_rows_per_page(0).rows_per_page(), 1);
    }

    #[test]
    fn test_visible_range_paginated() {
        let paging = Paging::paginated(5);
        assert_eq!(paging.visible_range(12), 0..5);
        assert_eq!(paging.with_page(1).visible_range(12), 5..10);
        assert_eq!(paging.with_page(2).visible_range(12), 10..12);
        assert_eq!(paging.with_page(9).visible_range(12), 12..12);
    }

    #[test]
    fn test_visible_range_windowed() {
        assert_eq!(Paging::windowed(5).visible_range(12), 0..5);
        assert_eq!(Paging::windowed(5).visible_range(3), 0..3);
        assert_eq!(Paging::windowed(5).visible_range(0), 0..0);
    }

    #[test]
    fn test_empty_rows_last_page() {
        let paging = Paging::paginated(5).with_page(2);
        assert_eq!(paging.empty_rows(12), 3);
    }

    #[test]
    fn test_empty_rows_first_page_never_padded() {
        assert_eq!(Paging::paginated(5).empty_rows(2), 0);
        assert_eq!(Paging::windowed(5).empty_rows(2), 0);
        assert_eq!(Paging::paginated(5).with_page(1).empty_rows(10), 0);
    }

    #[test]
    fn test_hidden_rows() {
        assert_eq!(Paging::windowed(5).hidden_rows(12), 7);
        assert_eq!(Paging::windowed(5).hidden_rows(4), 0);
        assert_eq!(Paging::paginated(5).hidden_rows(12), 0);
    }

    #[test]
    fn test_load_more() {
        let paging = Paging::windowed(5).load_more(12);
        assert_eq!(paging.rows_per_page(), 10);
        let paging = paging.load_more(12);
        assert_eq!(paging.rows_per_page(), 12);
        assert_eq!(paging.load_more(12).rows_per_page(), 12);
    }

    #[test]
    fn test_load_more_ignored_when_paginated() {
        let paging = Paging::paginated(5).with_page(1);
        assert_eq!(paging.load_more(12), paging);
    }

    #[test]
    fn test_with_rows_per_page_resets_page() {
        let paging = Paging::paginated(5).with_page(2).with_rows_per_page(10);
        assert_eq!(paging, Paging::Paginated { page: 0, rows_per_page: 10 });
    }

    #[test]
    fn test_with_page_is_not_clamped() {
        assert_eq!(Paging::paginated(5).with_page(40).page(), 40);
        assert_eq!(Paging::windowed(5).with_page(3).page(), 0);
    }

    #[test]
    fn test_page_info() {
        let info = Paging::paginated(5).with_page(2).page_info(12);
        assert_eq!((info.from, info.to, info.count), (11, 12, 12));
        assert!(info.has_previous);
        assert!(!info.has_next);

        let info = Paging::paginated(5).page_info(12);
        assert_eq!((info.from, info.to), (1, 5));
        assert!(!info.has_previous);
        assert!(info.has_next);
    }

    #[test]
    fn test_page_info_empty() {
        let info = Paging::paginated(5).page_info(0);
        assert_eq!((info.from, info.to, info.count), (0, 0, 0));
        assert!(!info.has_previous);
        assert!(!info.has_next);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_rows_once(total in 0usize..200, rpp in 1usize..30) {
            let paging = Paging::paginated(rpp);
            let mut seen = Vec::new();
            for page in 0..paging.page_count(total) {
                seen.extend(paging.with_page(page).visible_range(total));
            }
            prop_assert_eq!(seen, (0..total).collect::<Vec<_>>());
        }

        #[test]
        fn prop_load_more_monotonic_and_capped(total in 0usize..200, start in 1usize..50, clicks in 0usize..20) {
            let mut paging = Paging::windowed(start);
            for _ in 0..clicks {
                let before = paging.rows_per_page();
                paging = paging.load_more(total);
                prop_assert!(paging.rows_per_page() >= before);
                prop_assert!(paging.rows_per_page() <= total.max(before));
            }
        }
    }
}
