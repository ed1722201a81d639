use serde::Serialize;

/// Fixed page size for report listings.
pub const PAGE_SIZE: i64 = 20;

/// How many page numbers the sliding window shows at most.
const WINDOW: i64 = 5;

/// Page metadata for a report listing: record range, clamped prev/next and
/// a sliding window of up to five page numbers centered on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_records: i64,
    pub start_index: i64,
    pub end_index: i64,
    pub prev_page: i64,
    pub next_page: i64,
    pub page_numbers: Vec<i64>,
}

impl PageWindow {
    /// `fetched` is the number of rows actually returned for this page,
    /// which may be short on the last page.
    pub fn build(page: i64, total_records: i64, fetched: usize) -> Self {
        let page = page.max(1);
        let total_pages = ((total_records + PAGE_SIZE - 1) / PAGE_SIZE).max(1);

        let offset = (page - 1) * PAGE_SIZE;
        let start_index = offset + 1;
        let end_index = (offset + fetched as i64).min(total_records);

        let prev_page = (page - 1).max(1);
        let next_page = (page + 1).min(total_pages);

        let mut start_page = (page - 2).max(1);
        let end_page = (start_page + WINDOW - 1).min(total_pages);
        // Re-anchor at the tail so the window stays full when possible
        start_page = (end_page - WINDOW + 1).max(1);

        Self {
            current_page: page,
            total_pages,
            total_records,
            start_index,
            end_index,
            prev_page,
            next_page,
            page_numbers: (start_page..=end_page).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_short_page() {
        let w = PageWindow::build(1, 5, 5);
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.start_index, 1);
        assert_eq!(w.end_index, 5);
        assert_eq!(w.prev_page, 1);
        assert_eq!(w.next_page, 1);
        assert_eq!(w.page_numbers, vec![1]);
    }

    #[test]
    fn test_empty_listing() {
        let w = PageWindow::build(1, 0, 0);
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.end_index, 0);
        assert_eq!(w.page_numbers, vec![1]);
    }

    #[test]
    fn test_window_centered_mid_range() {
        let w = PageWindow::build(5, 200, 20); // 10 pages
        assert_eq!(w.page_numbers, vec![3, 4, 5, 6, 7]);
        assert_eq!(w.prev_page, 4);
        assert_eq!(w.next_page, 6);
    }

    #[test]
    fn test_window_clamped_at_start() {
        let w = PageWindow::build(1, 200, 20);
        assert_eq!(w.page_numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let w = PageWindow::build(10, 200, 20);
        assert_eq!(w.page_numbers, vec![6, 7, 8, 9, 10]);
        assert_eq!(w.next_page, 10);
    }

    #[test]
    fn test_record_range_on_last_page() {
        let w = PageWindow::build(2, 25, 5);
        assert_eq!(w.start_index, 21);
        assert_eq!(w.end_index, 25);
    }

    #[test]
    fn test_page_below_one_clamped() {
        let w = PageWindow::build(0, 40, 20);
        assert_eq!(w.current_page, 1);
    }
}
