//! Services backing the research papers grid.

use std::time::Duration;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::PaperReader;
use crate::domain::paper::ResearchPaper;
use crate::dto::papers::PaperListPageData;
use crate::filter::{RecordFilter, available_facets, filter_records};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::PageWindow;
use crate::query::QueryState;
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::store::RecordStore;

pub const PAPER_ITEMS_PER_PAGE: usize = 10;

const PAPER_SEARCH_FIELDS: [&str; 4] = ["title", "authors", "category", "abstract"];
const LOAD_ERROR: &str = "Failed to load research papers. Please try again later.";

async fn load_snapshot<B>(
    backend: &B,
    store: &RecordStore<ResearchPaper>,
    max_age: Duration,
) -> (Vec<ResearchPaper>, Option<String>)
where
    B: PaperReader + ?Sized,
{
    if store.is_stale(max_age).await {
        match backend.list_papers().await {
            Ok(papers) => store.replace(papers).await,
            Err(err) => {
                log::error!("Failed to fetch research papers: {err}");
                return (store.records().await, Some(LOAD_ERROR.to_string()));
            }
        }
    }
    (store.records().await, None)
}

/// Loads the research papers grid.
pub async fn load_list_page<B>(
    backend: &B,
    store: &RecordStore<ResearchPaper>,
    user: &AuthenticatedUser,
    query: QueryState,
    max_age: Duration,
) -> ServiceResult<PaperListPageData>
where
    B: PaperReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (papers, error) = load_snapshot(backend, store, max_age).await;

    let facets = available_facets(&papers, "category");

    let filter = RecordFilter::new(PAPER_SEARCH_FIELDS)
        .search(&query.search)
        .facet("category", &query.facet);
    let matched: Vec<ResearchPaper> = filter_records(&papers, &filter)
        .into_iter()
        .cloned()
        .collect();

    let papers = PageWindow::paginate(matched, PAPER_ITEMS_PER_PAGE, query.page);

    Ok(PaperListPageData {
        papers,
        facets,
        query,
        error,
    })
}
