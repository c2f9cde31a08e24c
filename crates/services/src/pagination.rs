//! # Pagination
//!
//! Shared page arithmetic for every paginated listing. Handlers feed the
//! requested page and a row count in, and get back the window to fetch plus
//! the numbers the templates print.

/// Resolved window for one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// The page actually served, normalized to be at least 1.
    pub page: i64,
    /// Total number of pages; at least 1 even for an empty listing.
    pub total_pages: i64,
    /// Row offset of the first item on this page.
    pub offset: i64,
    /// Maximum number of items on this page.
    pub limit: i64,
}

impl PageBounds {
    /// True when the requested page lies beyond the last page that has
    /// content. The helper never clamps downward; whether to redirect or
    /// render an empty page is the caller's call.
    pub fn past_end(&self) -> bool {
        self.page > self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Computes the window for `requested_page` over `total_items` rows split
/// into pages of `page_size`.
///
/// Pages are 1-based. A requested page below 1 is raised to 1; a requested
/// page beyond the end is kept as-is so [`PageBounds::past_end`] can report
/// it. An empty listing still has one (empty) page.
pub fn page_bounds(requested_page: i64, total_items: i64, page_size: i64) -> PageBounds {
    debug_assert!(page_size > 0, "page_size must be positive");
    let page = requested_page.max(1);
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);
    PageBounds {
        page,
        total_pages,
        // Requested pages come straight off the query string; saturate
        // instead of overflowing on absurd values.
        offset: page.saturating_sub(1).saturating_mul(page_size),
        limit: page_size,
    }
}
