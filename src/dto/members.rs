//! DTOs shaped for the members directory and lookup templates.

use serde::Serialize;

use crate::domain::member::{Member, MemberWithRecords};
use crate::filter::Facet;
use crate::lookup::LookupState;
use crate::pagination::PageWindow;
use crate::query::QueryState;

/// Data required to render the members directory grid.
pub struct MemberListPageData {
    pub members: PageWindow<Member>,
    /// Designation chips derived from the snapshot.
    pub facets: Vec<Facet>,
    pub query: QueryState,
    pub error: Option<String>,
}

/// Lookup panel state flattened for the template.
#[derive(Debug, Serialize)]
pub struct LookupPanel {
    /// One of `idle`, `searching`, `found`, `not_found`, `failed`.
    pub status: &'static str,
    /// Identifier still being searched for, when in `searching`.
    pub query: Option<String>,
    /// Backend or fallback message for `not_found` and `failed`.
    pub message: Option<String>,
    /// Member with their records, when in `found`.
    pub result: Option<MemberWithRecords>,
}

impl From<LookupState> for LookupPanel {
    fn from(state: LookupState) -> Self {
        match state {
            LookupState::Idle => Self {
                status: "idle",
                query: None,
                message: None,
                result: None,
            },
            LookupState::Searching { query } => Self {
                status: "searching",
                query: Some(query),
                message: None,
                result: None,
            },
            LookupState::Found(found) => Self {
                status: "found",
                query: None,
                message: None,
                result: Some(*found),
            },
            LookupState::NotFound { message } => Self {
                status: "not_found",
                query: None,
                message: Some(message),
                result: None,
            },
            LookupState::Failed { message } => Self {
                status: "failed",
                query: None,
                message: Some(message),
                result: None,
            },
        }
    }
}
