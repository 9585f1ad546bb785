use async_trait::async_trait;

use crate::api::errors::ApiResult;
use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::domain::event::Event;
use crate::domain::member::{Member, MemberWithRecords};
use crate::domain::paper::ResearchPaper;
use crate::domain::types::NationalId;

pub mod envelope;
pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[async_trait]
pub trait BlogReader {
    async fn list_blogs(&self) -> ApiResult<Vec<BlogPost>>;
    async fn get_blog_by_id(&self, id: i64) -> ApiResult<Option<BlogPost>>;
}

#[async_trait]
pub trait BlogWriter {
    async fn create_blog(&self, new_post: &NewBlogPost) -> ApiResult<BlogPost>;
    async fn update_blog(&self, id: i64, updates: &UpdateBlogPost) -> ApiResult<BlogPost>;
    async fn delete_blog(&self, id: i64) -> ApiResult<()>;
}

#[async_trait]
pub trait EventReader {
    async fn list_events(&self) -> ApiResult<Vec<Event>>;
}

#[async_trait]
pub trait MemberReader {
    async fn list_members(&self) -> ApiResult<Vec<Member>>;
    async fn search_member_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> ApiResult<Option<MemberWithRecords>>;
}

#[async_trait]
pub trait PaperReader {
    async fn list_papers(&self) -> ApiResult<Vec<ResearchPaper>>;
}
