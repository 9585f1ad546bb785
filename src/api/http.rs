//! reqwest-backed implementation of the backend gateway traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::envelope::ApiEnvelope;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::{BlogReader, BlogWriter, EventReader, MemberReader, PaperReader};
use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::domain::event::Event;
use crate::domain::member::{Member, MemberWithRecords};
use crate::domain::paper::ResearchPaper;
use crate::domain::types::NationalId;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway to the organization's REST backend.
///
/// Holds a pooled [`reqwest::Client`]; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiEnvelope<T>> {
        let response = self.client.get(self.url(path)).send().await?;
        read_envelope(response).await
    }

    async fn post_envelope<T, B>(&self, path: &str, body: &B) -> ApiResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_envelope(response).await
    }

    async fn put_envelope<T, B>(&self, path: &str, body: &B) -> ApiResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        read_envelope(response).await
    }

    async fn delete_envelope(&self, path: &str) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        let response = self.client.delete(self.url(path)).send().await?;
        read_envelope(response).await
    }
}

/// Decodes a response into an envelope.
///
/// Error statuses may still carry an envelope; its message is preserved as
/// [`ApiError::Rejected`] so listing and lookup callers can show it.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ApiResult<ApiEnvelope<T>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<ApiEnvelope<T>>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
        if !envelope.success {
            if let Some(message) = envelope.message.filter(|m| !m.trim().is_empty()) {
                return Err(ApiError::Rejected(message));
            }
        }
    }

    Err(ApiError::Status(status.as_u16()))
}

#[async_trait]
impl BlogReader for HttpBackend {
    async fn list_blogs(&self) -> ApiResult<Vec<BlogPost>> {
        self.get_envelope::<Vec<BlogPost>>("/api/v1/blogs")
            .await?
            .into_data()
    }

    async fn get_blog_by_id(&self, id: i64) -> ApiResult<Option<BlogPost>> {
        self.get_envelope::<BlogPost>(&format!("/api/v1/blogs/{id}"))
            .await?
            .into_optional_data()
    }
}

#[async_trait]
impl BlogWriter for HttpBackend {
    async fn create_blog(&self, new_post: &NewBlogPost) -> ApiResult<BlogPost> {
        self.post_envelope::<BlogPost, _>("/api/v1/blogs", new_post)
            .await?
            .into_data()
    }

    async fn update_blog(&self, id: i64, updates: &UpdateBlogPost) -> ApiResult<BlogPost> {
        self.put_envelope::<BlogPost, _>(&format!("/api/v1/blogs/{id}"), updates)
            .await?
            .into_data()
    }

    async fn delete_blog(&self, id: i64) -> ApiResult<()> {
        self.delete_envelope(&format!("/api/v1/blogs/{id}"))
            .await?
            .into_unit()
    }
}

#[async_trait]
impl EventReader for HttpBackend {
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.get_envelope::<Vec<Event>>("/api/v1/events")
            .await?
            .into_data()
    }
}

#[async_trait]
impl MemberReader for HttpBackend {
    async fn list_members(&self) -> ApiResult<Vec<Member>> {
        self.get_envelope::<Vec<Member>>("/api/v1/members")
            .await?
            .into_data()
    }

    async fn search_member_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> ApiResult<Option<MemberWithRecords>> {
        // Identifiers are digits and dashes, safe to embed in a path.
        self.get_envelope::<MemberWithRecords>(&format!(
            "/api/v1/members/search/{national_id}"
        ))
        .await?
        .into_optional_data()
    }
}

#[async_trait]
impl PaperReader for HttpBackend {
    async fn list_papers(&self) -> ApiResult<Vec<ResearchPaper>> {
        self.get_envelope::<Vec<ResearchPaper>>("/api/v1/papers")
            .await?
            .into_data()
    }
}
