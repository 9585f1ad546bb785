use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Member {
    pub id: i64,
    pub full_name: String,
    pub designation: String,
    pub national_id: String,
    pub email: Option<String>,
    pub joined_at: Option<NaiveDate>,
}

/// Case file handled on behalf of a member, nested under the lookup result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientRecord {
    pub id: i64,
    pub title: String,
    pub reference_no: String,
    pub status: String,
    pub opened_at: Option<NaiveDateTime>,
}

/// Payload of a national-id lookup: the member plus their client records.
///
/// Owned by the search session that produced it and replaced wholesale when a
/// newer lookup resolves.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MemberWithRecords {
    pub member: Member,
    pub records: Vec<ClientRecord>,
}
