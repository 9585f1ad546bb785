//! Services backing the events grid.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::EventReader;
use crate::domain::event::{Event, EventCard};
use crate::dto::events::EventListPageData;
use crate::filter::{RecordFilter, available_facets, filter_records};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::PageWindow;
use crate::query::QueryState;
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::store::RecordStore;

pub const EVENT_ITEMS_PER_PAGE: usize = 9;

const EVENT_SEARCH_FIELDS: [&str; 4] = ["title", "speaker", "venue", "category"];
const LOAD_ERROR: &str = "Failed to load events. Please try again later.";

async fn load_snapshot<B>(
    backend: &B,
    store: &RecordStore<Event>,
    max_age: Duration,
) -> (Vec<Event>, Option<String>)
where
    B: EventReader + ?Sized,
{
    if store.is_stale(max_age).await {
        match backend.list_events().await {
            Ok(events) => store.replace(events).await,
            Err(err) => {
                log::error!("Failed to fetch events: {err}");
                return (store.records().await, Some(LOAD_ERROR.to_string()));
            }
        }
    }
    (store.records().await, None)
}

/// Loads the events grid, materializing each card's status against `now`.
pub async fn load_list_page<B>(
    backend: &B,
    store: &RecordStore<Event>,
    user: &AuthenticatedUser,
    query: QueryState,
    max_age: Duration,
    now: NaiveDateTime,
) -> ServiceResult<EventListPageData>
where
    B: EventReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (events, error) = load_snapshot(backend, store, max_age).await;

    let cards: Vec<EventCard> = events
        .iter()
        .map(|event| EventCard::from_event(event, now))
        .collect();

    let facets = available_facets(&cards, "status");

    let filter = RecordFilter::new(EVENT_SEARCH_FIELDS)
        .search(&query.search)
        .facet("status", &query.facet);
    let matched: Vec<EventCard> = filter_records(&cards, &filter)
        .into_iter()
        .cloned()
        .collect();

    let events = PageWindow::paginate(matched, EVENT_ITEMS_PER_PAGE, query.page);

    Ok(EventListPageData {
        events,
        facets,
        query,
        error,
    })
}
