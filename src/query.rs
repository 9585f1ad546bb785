//! User-controlled query state for the listing pages.
//!
//! One value per request: the free-text search, the selected facet and the
//! requested page. Changing either filter component resets the page to 1;
//! only an explicit page change keeps the filters and moves the window.

use serde::Serialize;

use crate::filter::FACET_ALL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub search: String,
    pub facet: String,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            facet: FACET_ALL.to_string(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Normalizes raw query-string parameters.
    ///
    /// The search term is trimmed, a missing or blank facet falls back to the
    /// [`FACET_ALL`] sentinel and non-positive page numbers are corrected to
    /// 1 (clamping against the page count happens at pagination time, where
    /// the totals are known).
    pub fn from_params(
        search: Option<String>,
        facet: Option<String>,
        page: Option<i64>,
    ) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let facet = facet
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| FACET_ALL.to_string());
        let page = page.unwrap_or(1).max(1) as usize;

        Self {
            search,
            facet,
            page,
        }
    }

    /// Applies a new search term, resetting the page when the term changed.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_string();
        if search != self.search {
            self.page = 1;
        }
        self.search = search;
        self
    }

    /// Applies a new facet selection, resetting the page when it changed.
    pub fn with_facet(mut self, facet: impl Into<String>) -> Self {
        let facet = facet.into();
        let facet = if facet.trim().is_empty() {
            FACET_ALL.to_string()
        } else {
            facet.trim().to_string()
        };
        if facet != self.facet {
            self.page = 1;
        }
        self.facet = facet;
        self
    }

    /// Moves to another page without touching the filters.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// True when neither search text nor a facet narrows the listing.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.facet == FACET_ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_normalized() {
        let state = QueryState::from_params(Some("  ai  ".into()), Some("".into()), Some(-3));
        assert_eq!(state.search, "ai");
        assert_eq!(state.facet, FACET_ALL);
        assert_eq!(state.page, 1);

        let state = QueryState::from_params(None, Some("tech".into()), Some(4));
        assert_eq!(state.search, "");
        assert_eq!(state.facet, "tech");
        assert_eq!(state.page, 4);
    }

    #[test]
    fn unfiltered_means_no_search_and_all_facet() {
        assert!(QueryState::default().is_unfiltered());
        // Paging alone does not count as a filter.
        assert!(QueryState::from_params(None, None, Some(3)).is_unfiltered());

        assert!(!QueryState::from_params(Some("ai".into()), None, None).is_unfiltered());
        assert!(!QueryState::from_params(None, Some("tech".into()), None).is_unfiltered());
    }

    #[test]
    fn changing_search_resets_page() {
        let state = QueryState::from_params(Some("ai".into()), None, Some(5));
        let state = state.with_search("bio");
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "bio");
    }

    #[test]
    fn changing_facet_resets_page() {
        let state = QueryState::from_params(None, Some("tech".into()), Some(3));
        let state = state.with_facet("science");
        assert_eq!(state.page, 1);
        assert_eq!(state.facet, "science");
    }

    #[test]
    fn unchanged_filters_keep_page() {
        let state = QueryState::from_params(Some("ai".into()), Some("tech".into()), Some(3));
        let state = state.with_search("ai").with_facet("tech");
        assert_eq!(state.page, 3);
    }

    #[test]
    fn page_change_preserves_filters() {
        let state = QueryState::from_params(Some("ai".into()), Some("tech".into()), None);
        let state = state.with_page(7);
        assert_eq!(state.search, "ai");
        assert_eq!(state.facet, "tech");
        assert_eq!(state.page, 7);

        assert_eq!(state.with_page(0).page, 1);
    }
}
