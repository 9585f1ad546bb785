use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ResearchPaper {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub category: String,
    pub r#abstract: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub document_url: Option<String>,
}
