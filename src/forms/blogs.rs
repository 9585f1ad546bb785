use serde::Deserialize;
use validator::Validate;

use crate::domain::blog::{NewBlogPost, UpdateBlogPost};
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
/// Form data for publishing a new blog post.
pub struct AddBlogPostForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub category: String,
    /// Display name shown as the post author.
    #[validate(length(min = 1))]
    pub author: String,
    /// Optional teaser shown on the grid card.
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
}

impl AddBlogPostForm {
    pub fn into_new_post(self) -> Result<NewBlogPost, TypeConstraintError> {
        NewBlogPost::new(
            self.title,
            self.category,
            self.author,
            self.summary,
            self.content,
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing an existing blog post.
pub struct EditBlogPostForm {
    pub id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
}

impl EditBlogPostForm {
    pub fn into_updates(self) -> Result<UpdateBlogPost, TypeConstraintError> {
        UpdateBlogPost::new(self.title, self.category, self.summary, self.content)
    }
}

#[derive(Deserialize)]
/// Form data for deleting a blog post.
pub struct DeleteBlogPostForm {
    pub id: i64,
}
