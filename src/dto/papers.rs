//! DTOs shaped for the research papers listing template.

use crate::domain::paper::ResearchPaper;
use crate::filter::Facet;
use crate::pagination::PageWindow;
use crate::query::QueryState;

/// Data required to render the papers listing.
pub struct PaperListPageData {
    pub papers: PageWindow<ResearchPaper>,
    /// Category chips derived from the snapshot.
    pub facets: Vec<Facet>,
    pub query: QueryState,
    pub error: Option<String>,
}
