//! Services backing the members directory and the national-id lookup.

use std::time::Duration;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::MemberReader;
use crate::api::errors::ApiError;
use crate::domain::member::Member;
use crate::domain::types::NationalId;
use crate::dto::members::MemberListPageData;
use crate::filter::{RecordFilter, available_facets, filter_records};
use crate::lookup::LookupOutcome;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::PageWindow;
use crate::query::QueryState;
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::store::RecordStore;

pub const MEMBER_ITEMS_PER_PAGE: usize = 12;

pub const LOOKUP_NOT_FOUND: &str = "No results found";
pub const LOOKUP_FAILED: &str = "Failed to search. Please try again.";

const MEMBER_SEARCH_FIELDS: [&str; 4] = ["full_name", "designation", "national_id", "email"];
const LOAD_ERROR: &str = "Failed to load members. Please try again later.";

async fn load_snapshot<B>(
    backend: &B,
    store: &RecordStore<Member>,
    max_age: Duration,
) -> (Vec<Member>, Option<String>)
where
    B: MemberReader + ?Sized,
{
    if store.is_stale(max_age).await {
        match backend.list_members().await {
            Ok(members) => store.replace(members).await,
            Err(err) => {
                log::error!("Failed to fetch members: {err}");
                return (store.records().await, Some(LOAD_ERROR.to_string()));
            }
        }
    }
    (store.records().await, None)
}

/// Loads the members directory grid.
pub async fn load_list_page<B>(
    backend: &B,
    store: &RecordStore<Member>,
    user: &AuthenticatedUser,
    query: QueryState,
    max_age: Duration,
) -> ServiceResult<MemberListPageData>
where
    B: MemberReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (members, error) = load_snapshot(backend, store, max_age).await;

    let facets = available_facets(&members, "designation");

    let filter = RecordFilter::new(MEMBER_SEARCH_FIELDS)
        .search(&query.search)
        .facet("designation", &query.facet);
    let matched: Vec<Member> = filter_records(&members, &filter)
        .into_iter()
        .cloned()
        .collect();

    let members = PageWindow::paginate(matched, MEMBER_ITEMS_PER_PAGE, query.page);

    Ok(MemberListPageData {
        members,
        facets,
        query,
        error,
    })
}

/// Runs a national-id search and normalizes every way it can end.
///
/// A backend rejection is how "no such member" is reported, so it maps to
/// `NotFound` carrying the backend's message; transport and decode problems
/// map to `Failed` with a retryable message.
pub async fn lookup_member<B>(backend: &B, national_id: &NationalId) -> LookupOutcome
where
    B: MemberReader + ?Sized,
{
    match backend.search_member_by_national_id(national_id).await {
        Ok(Some(found)) => LookupOutcome::Found(Box::new(found)),
        Ok(None) => LookupOutcome::NotFound {
            message: LOOKUP_NOT_FOUND.to_string(),
        },
        Err(ApiError::Rejected(message)) => LookupOutcome::NotFound { message },
        Err(err) => {
            log::error!("Failed to search member by national id: {err}");
            LookupOutcome::Failed {
                message: LOOKUP_FAILED.to_string(),
            }
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;

    use crate::api::mock::MockBackend;
    use crate::domain::member::MemberWithRecords;

    fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@example.com".to_string(),
            name: "Viewer".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn sample_member(id: i64, full_name: &str, designation: &str) -> Member {
        Member {
            id,
            full_name: full_name.to_string(),
            designation: designation.to_string(),
            national_id: format!("70012345{id}"),
            email: Some(format!("member{id}@example.com")),
            joined_at: None,
        }
    }

    #[actix_web::test]
    async fn designation_facet_narrows_the_grid() {
        let backend = MockBackend::new();
        let store = RecordStore::new();
        store
            .replace(vec![
                sample_member(1, "Amal Perera", "Researcher"),
                sample_member(2, "Nadia Silva", "Fellow"),
                sample_member(3, "Ruwan Dias", "Researcher"),
            ])
            .await;

        let query = QueryState::from_params(None, Some("Researcher".to_string()), None);
        let data = load_list_page(
            &backend,
            &store,
            &viewer_user(),
            query,
            Duration::from_secs(300),
        )
        .await
        .expect("listing failed");

        assert_eq!(data.members.total_items, 2);
        let values: Vec<&str> = data.facets.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["Researcher", "Fellow"]);
    }

    #[actix_web::test]
    async fn grid_search_matches_national_id() {
        let backend = MockBackend::new();
        let store = RecordStore::new();
        store
            .replace(vec![
                sample_member(1, "Amal Perera", "Researcher"),
                sample_member(2, "Nadia Silva", "Fellow"),
            ])
            .await;

        // sample_member(2) carries national_id "700123452"; no other field
        // contains the digits.
        let query = QueryState::from_params(Some("700123452".to_string()), None, None);
        let data = load_list_page(
            &backend,
            &store,
            &viewer_user(),
            query,
            Duration::from_secs(300),
        )
        .await
        .expect("listing failed");

        assert_eq!(data.members.total_items, 1);
        assert_eq!(data.members.items[0].id, 2);
    }

    #[actix_web::test]
    async fn facet_match_is_case_sensitive() {
        let backend = MockBackend::new();
        let store = RecordStore::new();
        store
            .replace(vec![sample_member(1, "Amal Perera", "Researcher")])
            .await;

        let query = QueryState::from_params(None, Some("researcher".to_string()), None);
        let data = load_list_page(
            &backend,
            &store,
            &viewer_user(),
            query,
            Duration::from_secs(300),
        )
        .await
        .expect("listing failed");

        assert_eq!(data.members.total_items, 0);
    }

    #[actix_web::test]
    async fn lookup_success_wraps_the_payload() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_member_by_national_id()
            .times(1)
            .returning(|_| {
                Ok(Some(MemberWithRecords {
                    member: sample_member(1, "Amal Perera", "Researcher"),
                    records: Vec::new(),
                }))
            });

        let national_id = NationalId::new("700123451").expect("valid id");
        let outcome = lookup_member(&backend, &national_id).await;

        match outcome {
            LookupOutcome::Found(found) => {
                assert_eq!(found.member.full_name, "Amal Perera");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn lookup_rejection_keeps_the_backend_message() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_member_by_national_id()
            .times(1)
            .returning(|_| Err(ApiError::Rejected("No member found with this ID".to_string())));

        let national_id = NationalId::new("700123451").expect("valid id");
        let outcome = lookup_member(&backend, &national_id).await;

        assert_eq!(
            outcome,
            LookupOutcome::NotFound {
                message: "No member found with this ID".to_string()
            }
        );
    }

    #[actix_web::test]
    async fn lookup_null_payload_uses_default_message() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_member_by_national_id()
            .times(1)
            .returning(|_| Ok(None));

        let national_id = NationalId::new("700123451").expect("valid id");
        let outcome = lookup_member(&backend, &national_id).await;

        assert_eq!(
            outcome,
            LookupOutcome::NotFound {
                message: LOOKUP_NOT_FOUND.to_string()
            }
        );
    }

    #[actix_web::test]
    async fn repeated_lookup_returns_the_same_outcome() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_member_by_national_id()
            .times(2)
            .returning(|_| {
                Ok(Some(MemberWithRecords {
                    member: sample_member(1, "Amal Perera", "Researcher"),
                    records: Vec::new(),
                }))
            });

        let national_id = NationalId::new("700123451").expect("valid id");
        let first = lookup_member(&backend, &national_id).await;
        let second = lookup_member(&backend, &national_id).await;

        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn lookup_transport_failure_is_retryable() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_member_by_national_id()
            .times(1)
            .returning(|_| Err(ApiError::Timeout));

        let national_id = NationalId::new("700123451").expect("valid id");
        let outcome = lookup_member(&backend, &national_id).await;

        assert_eq!(
            outcome,
            LookupOutcome::Failed {
                message: LOOKUP_FAILED.to_string()
            }
        );
    }
}
