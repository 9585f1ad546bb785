//! Pagination over filtered snapshots.
//!
//! Bounds are recomputed from the current totals on every request; nothing
//! here remembers a previous page count. Out-of-range page requests are
//! clamped, never rejected.

use serde::Serialize;

/// Page size used by listing pages unless they override it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Slice bounds for one page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    /// Requested page clamped into `1..=total_pages`.
    pub page: usize,
    /// Always at least 1, even for an empty collection.
    pub total_pages: usize,
    /// Inclusive start index into the filtered collection.
    pub start: usize,
    /// Exclusive end index; may exceed the collection length on the last
    /// page, callers slice with `min(len)`.
    pub end: usize,
}

/// Computes clamped slice bounds for `requested_page`.
pub fn page_bounds(total_items: usize, per_page: usize, requested_page: usize) -> PageBounds {
    let per_page = per_page.max(1);
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = requested_page.clamp(1, total_pages);
    let start = (page - 1) * per_page;

    PageBounds {
        page,
        total_pages,
        start,
        end: start + per_page,
    }
}

/// Pages always shown at each end of the strip.
const STRIP_EDGE: usize = 2;
/// Pages shown before the current page.
const STRIP_BEFORE: usize = 2;
/// Pages shown after the current page.
const STRIP_AFTER: usize = 4;

/// Builds the elided page-number strip for the template.
///
/// A page number is kept when it sits at either edge or inside the window
/// around the current page; every skipped run collapses into a single
/// `None`, which the template renders as an ellipsis.
fn page_strip(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    let window_start = current.saturating_sub(STRIP_BEFORE);
    let window_end = current + STRIP_AFTER;

    let mut strip = Vec::new();
    let mut last_shown = 0;

    for page in 1..=total_pages {
        let shown = page <= STRIP_EDGE
            || page + STRIP_EDGE > total_pages
            || (window_start..=window_end).contains(&page);
        if shown {
            if page > last_shown + 1 {
                strip.push(None);
            }
            strip.push(Some(page));
            last_shown = page;
        }
    }

    strip
}

/// One rendered page of a filtered collection, recomputed per request.
#[derive(Debug, Serialize)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    /// Elided page-number strip for the template; `None` marks a gap.
    pub pages: Vec<Option<usize>>,
}

impl<T> PageWindow<T> {
    /// Slices the already-filtered collection down to the requested page.
    pub fn paginate(filtered: Vec<T>, per_page: usize, requested_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = filtered.len();
        let bounds = page_bounds(total_items, per_page, requested_page);

        let items: Vec<T> = filtered
            .into_iter()
            .skip(bounds.start)
            .take(per_page)
            .collect();

        let pages = page_strip(bounds.total_pages, bounds.page);

        Self {
            items,
            page: bounds.page,
            total_pages: bounds.total_pages,
            total_items,
            per_page,
            pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_match_requested_page_inside_range() {
        let bounds = page_bounds(23, 10, 3);
        assert_eq!(
            bounds,
            PageBounds {
                page: 3,
                total_pages: 3,
                start: 20,
                end: 30
            }
        );
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let bounds = page_bounds(0, 10, 5);
        assert_eq!(
            bounds,
            PageBounds {
                page: 1,
                total_pages: 1,
                start: 0,
                end: 10
            }
        );
    }

    #[test]
    fn page_zero_and_overflow_are_clamped() {
        assert_eq!(page_bounds(30, 10, 0).page, 1);
        assert_eq!(page_bounds(30, 10, 99).page, 3);
    }

    #[test]
    fn per_page_zero_is_corrected() {
        let bounds = page_bounds(5, 0, 1);
        assert_eq!(bounds.total_pages, 5);
        assert_eq!(bounds.end - bounds.start, 1);
    }

    #[test]
    fn window_slices_short_last_page() {
        let window = PageWindow::paginate((0..23).collect::<Vec<_>>(), 10, 3);
        assert_eq!(window.items, vec![20, 21, 22]);
        assert_eq!(window.page, 3);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.total_items, 23);
    }

    #[test]
    fn window_of_empty_collection() {
        let window = PageWindow::paginate(Vec::<i32>::new(), 10, 5);
        assert!(window.items.is_empty());
        assert!(window.is_empty());
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn page_strip_elides_middle_ranges() {
        let window = PageWindow::paginate((0..200).collect::<Vec<_>>(), 10, 10);
        // Edges are present, elisions marked by None.
        assert_eq!(window.pages.first().copied(), Some(Some(1)));
        assert_eq!(window.pages.last().copied(), Some(Some(20)));
        assert!(window.pages.contains(&None));
        assert!(window.pages.contains(&Some(10)));
    }

    #[test]
    fn page_strip_invariants_hold_across_positions() {
        for total in [1usize, 2, 3, 5, 8, 9, 20, 50] {
            for current in 1..=total {
                let strip = page_strip(total, current);

                assert_eq!(strip.first().copied(), Some(Some(1)), "{total}/{current}");
                assert_eq!(strip.last().copied(), Some(Some(total)), "{total}/{current}");
                assert!(strip.contains(&Some(current)), "{total}/{current}");

                let mut prev_page = 0;
                let mut after_gap = false;
                for entry in &strip {
                    match entry {
                        Some(page) => {
                            if after_gap {
                                // A gap hides at least one page.
                                assert!(*page > prev_page + 1, "{total}/{current}");
                            } else {
                                assert_eq!(*page, prev_page + 1, "{total}/{current}");
                            }
                            prev_page = *page;
                            after_gap = false;
                        }
                        None => {
                            assert!(!after_gap, "double gap at {total}/{current}");
                            after_gap = true;
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn small_page_counts_are_never_elided() {
        for total in 1..=7 {
            let strip = page_strip(total, 1);
            let expected: Vec<Option<usize>> = (1..=total).map(Some).collect();
            assert_eq!(strip, expected);
        }
    }

    #[test]
    fn slice_length_never_exceeds_per_page() {
        for total in [0usize, 1, 9, 10, 11, 23, 100] {
            for page in [0usize, 1, 2, 3, 50] {
                let window = PageWindow::paginate((0..total).collect::<Vec<_>>(), 10, page);
                assert!(window.items.len() <= 10);
                assert!(window.page >= 1 && window.page <= window.total_pages);
                let bounds = page_bounds(total, 10, page);
                assert_eq!(bounds.end - bounds.start, 10);
                let expected = total.saturating_sub(bounds.start).min(10);
                assert_eq!(window.items.len(), expected);
            }
        }
    }
}
