//! "Load more" pagination for the catalog
//!
//! Page `n` shows the first `n * PAGE_SIZE` results rather than the
//! `n`th slice, so the visible list only ever grows.

/// Profiles added per "load more"
pub const PAGE_SIZE: usize = 24;

/// Visible window calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreWindow {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Number of results to show, counted from the start
    pub visible: usize,
    /// Whether results remain past `visible`
    pub has_more: bool,
}

/// Calculate the visible window from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use casting_catalog::pagination::calculate_window;
///
/// // 60 results = 3 pages (24 + 24 + 12)
/// let w = calculate_window(60, 2);
/// assert_eq!(w.visible, 48);
/// assert!(w.has_more);
///
/// // Requesting out-of-bounds page gets clamped
/// let w = calculate_window(60, 99);
/// assert_eq!(w.page, 3);
/// assert_eq!(w.visible, 60);
/// assert!(!w.has_more);
/// ```
pub fn calculate_window(total_results: usize, requested_page: usize) -> LoadMoreWindow {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    let page = requested_page.clamp(1, total_pages.max(1));
    let visible = (page * PAGE_SIZE).min(total_results);

    LoadMoreWindow {
        page,
        total_pages,
        visible,
        has_more: visible < total_results,
    }
}
