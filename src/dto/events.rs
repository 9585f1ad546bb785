//! DTOs shaped for the events listing template.

use crate::domain::event::EventCard;
use crate::filter::Facet;
use crate::pagination::PageWindow;
use crate::query::QueryState;

/// Data required to render the events grid.
pub struct EventListPageData {
    /// Current page of event cards with their status already materialized.
    pub events: PageWindow<EventCard>,
    /// Status chips derived from the snapshot.
    pub facets: Vec<Facet>,
    pub query: QueryState,
    pub error: Option<String>,
}
