//! Mock backend gateway for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{BlogReader, BlogWriter, EventReader, MemberReader, PaperReader};
use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::domain::event::Event;
use crate::domain::member::{Member, MemberWithRecords};
use crate::domain::paper::ResearchPaper;
use crate::domain::types::NationalId;

mock! {
    pub Backend {}

    #[async_trait]
    impl BlogReader for Backend {
        async fn list_blogs(&self) -> ApiResult<Vec<BlogPost>>;
        async fn get_blog_by_id(&self, id: i64) -> ApiResult<Option<BlogPost>>;
    }

    #[async_trait]
    impl BlogWriter for Backend {
        async fn create_blog(&self, new_post: &NewBlogPost) -> ApiResult<BlogPost>;
        async fn update_blog(&self, id: i64, updates: &UpdateBlogPost) -> ApiResult<BlogPost>;
        async fn delete_blog(&self, id: i64) -> ApiResult<()>;
    }

    #[async_trait]
    impl EventReader for Backend {
        async fn list_events(&self) -> ApiResult<Vec<Event>>;
    }

    #[async_trait]
    impl MemberReader for Backend {
        async fn list_members(&self) -> ApiResult<Vec<Member>>;
        async fn search_member_by_national_id(
            &self,
            national_id: &NationalId,
        ) -> ApiResult<Option<MemberWithRecords>>;
    }

    #[async_trait]
    impl PaperReader for Backend {
        async fn list_papers(&self) -> ApiResult<Vec<ResearchPaper>>;
    }
}
