use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{RichText, TypeConstraintError};

/// Author snippet nested inside a blog post.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Author {
    pub full_name: String,
    pub designation: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub author: Author,
    pub summary: Option<String>,
    pub content: String,
    pub published_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub category: String,
    pub author: Author,
    pub summary: Option<String>,
    pub content: String,
}

impl NewBlogPost {
    /// Builds a post payload, trimming text fields and sanitizing the body.
    pub fn new(
        title: String,
        category: String,
        author_name: String,
        summary: Option<String>,
        content: String,
    ) -> Result<Self, TypeConstraintError> {
        let content = RichText::new(content)?;
        Ok(Self {
            title: title.trim().to_string(),
            category: category.trim().to_string(),
            author: Author {
                full_name: author_name.trim().to_string(),
                designation: None,
            },
            summary: summary
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            content: content.into_inner(),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateBlogPost {
    pub title: String,
    pub category: String,
    pub summary: Option<String>,
    pub content: String,
}

impl UpdateBlogPost {
    /// Builds an update payload with the same normalization as [`NewBlogPost`].
    pub fn new(
        title: String,
        category: String,
        summary: Option<String>,
        content: String,
    ) -> Result<Self, TypeConstraintError> {
        let content = RichText::new(content)?;
        Ok(Self {
            title: title.trim().to_string(),
            category: category.trim().to_string(),
            summary: summary
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            content: content.into_inner(),
        })
    }

    /// Applies the update to an existing post snapshot.
    pub fn apply_to(&self, post: &mut BlogPost) {
        post.title = self.title.clone();
        post.category = self.category.clone();
        post.summary = self.summary.clone();
        post.content = self.content.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blog_post_trims_and_sanitizes() {
        let post = NewBlogPost::new(
            "  Title ".into(),
            " research ".into(),
            " Dr. Amal ".into(),
            Some("   ".into()),
            "<p>body</p><script>x()</script>".into(),
        )
        .unwrap();

        assert_eq!(post.title, "Title");
        assert_eq!(post.category, "research");
        assert_eq!(post.author.full_name, "Dr. Amal");
        assert_eq!(post.summary, None);
        assert!(!post.content.contains("script"));
    }

    #[test]
    fn update_applies_to_snapshot() {
        let mut post = BlogPost {
            id: 7,
            title: "Old".into(),
            ..BlogPost::default()
        };
        let update =
            UpdateBlogPost::new("New".into(), "news".into(), None, "<p>b</p>".into()).unwrap();
        update.apply_to(&mut post);

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "New");
        assert_eq!(post.category, "news");
    }
}
