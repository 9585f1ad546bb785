//! DTOs shaped for the blog listing and admin templates.

use crate::domain::blog::BlogPost;
use crate::filter::Facet;
use crate::pagination::PageWindow;
use crate::query::QueryState;

/// Data required to render the blog grid on the home page.
pub struct BlogListPageData {
    /// Current page of posts after search and facet narrowing.
    pub posts: PageWindow<BlogPost>,
    /// Category chips derived from the snapshot.
    pub facets: Vec<Facet>,
    /// Newest posts for the sidebar, independent of the active filter.
    pub latest: Vec<BlogPost>,
    /// Query echoed back to the template controls.
    pub query: QueryState,
    /// Set when the snapshot could not be refreshed.
    pub error: Option<String>,
}

/// Data required to render the blog administration table.
pub struct BlogAdminPageData {
    pub posts: PageWindow<BlogPost>,
    pub query: QueryState,
    pub error: Option<String>,
}
