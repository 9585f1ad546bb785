//! Services backing the blog grid and its admin workflows.

use std::time::Duration;

use validator::Validate;

use crate::api::{BlogReader, BlogWriter};
use crate::domain::blog::BlogPost;
use crate::dto::blogs::{BlogAdminPageData, BlogListPageData};
use crate::filter::{RecordFilter, available_facets, filter_records, latest_records};
use crate::forms::blogs::{AddBlogPostForm, DeleteBlogPostForm, EditBlogPostForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageWindow};
use crate::query::QueryState;
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::store::RecordStore;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const BLOG_ITEMS_PER_PAGE: usize = 6;
pub const LATEST_POSTS_COUNT: usize = 3;

const BLOG_SEARCH_FIELDS: [&str; 5] = [
    "title",
    "category",
    "author.full_name",
    "summary",
    "content",
];
const LOAD_ERROR: &str = "Failed to load blog posts. Please try again later.";

/// Refreshes the snapshot when stale; a failed refresh falls back to the
/// cached records and reports the error alongside them.
async fn load_snapshot<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    max_age: Duration,
) -> (Vec<BlogPost>, Option<String>)
where
    B: BlogReader + ?Sized,
{
    if store.is_stale(max_age).await {
        match backend.list_blogs().await {
            Ok(posts) => store.replace(posts).await,
            Err(err) => {
                log::error!("Failed to fetch blog posts: {err}");
                return (store.records().await, Some(LOAD_ERROR.to_string()));
            }
        }
    }
    (store.records().await, None)
}

/// Loads the blog grid for the home page.
pub async fn load_list_page<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    query: QueryState,
    max_age: Duration,
) -> ServiceResult<BlogListPageData>
where
    B: BlogReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (posts, error) = load_snapshot(backend, store, max_age).await;

    let facets = available_facets(&posts, "category");
    let latest = latest_records(&posts, "published_at", LATEST_POSTS_COUNT)
        .into_iter()
        .cloned()
        .collect();

    let filter = RecordFilter::new(BLOG_SEARCH_FIELDS)
        .search(&query.search)
        .facet("category", &query.facet);
    let matched: Vec<BlogPost> = filter_records(&posts, &filter)
        .into_iter()
        .cloned()
        .collect();

    let posts = PageWindow::paginate(matched, BLOG_ITEMS_PER_PAGE, query.page);

    Ok(BlogListPageData {
        posts,
        facets,
        latest,
        query,
        error,
    })
}

/// Loads the post table for the blog admin page.
pub async fn load_admin_page<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    query: QueryState,
    max_age: Duration,
) -> ServiceResult<BlogAdminPageData>
where
    B: BlogReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (posts, error) = load_snapshot(backend, store, max_age).await;

    let filter = RecordFilter::new(BLOG_SEARCH_FIELDS).search(&query.search);
    let matched: Vec<BlogPost> = filter_records(&posts, &filter)
        .into_iter()
        .cloned()
        .collect();

    let posts = PageWindow::paginate(matched, DEFAULT_ITEMS_PER_PAGE, query.page);

    Ok(BlogAdminPageData {
        posts,
        query,
        error,
    })
}

/// Loads one post for the edit form.
///
/// The cached snapshot is checked first; on a miss (direct link to a post
/// the snapshot has not seen) the backend is asked for the single record,
/// which also patches the snapshot.
pub async fn load_edit_page<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    id: i64,
) -> ServiceResult<BlogPost>
where
    B: BlogReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if let Some(post) = store.find_by(|post| post.id == id).await {
        return Ok(post);
    }

    match backend.get_blog_by_id(id).await {
        Ok(Some(post)) => {
            store.upsert_by(|p| p.id == id, post.clone()).await;
            Ok(post)
        }
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to fetch blog post {id}: {err}");
            Err(err.into())
        }
    }
}

/// Validates the add form and publishes a new post through the backend.
pub async fn add_post<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    form: AddBlogPostForm,
) -> ServiceResult<()>
where
    B: BlogWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation error".to_string()));
    }

    let new_post = form.into_new_post()?;

    let created = backend.create_blog(&new_post).await.map_err(|err| {
        log::error!("Failed to create blog post: {err}");
        err
    })?;

    store.insert(created).await;

    Ok(())
}

/// Validates the edit form and saves the changes through the backend.
pub async fn save_post<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    form: EditBlogPostForm,
) -> ServiceResult<()>
where
    B: BlogWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation error".to_string()));
    }

    let id = form.id;
    let updates = form.into_updates()?;

    let updated = backend.update_blog(id, &updates).await.map_err(|err| {
        log::error!("Failed to update blog post {id}: {err}");
        err
    })?;

    store.upsert_by(|post| post.id == id, updated).await;

    Ok(())
}

/// Deletes a post through the backend and drops it from the snapshot.
pub async fn delete_post<B>(
    backend: &B,
    store: &RecordStore<BlogPost>,
    user: &AuthenticatedUser,
    form: DeleteBlogPostForm,
) -> ServiceResult<()>
where
    B: BlogWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    backend.delete_blog(form.id).await.map_err(|err| {
        log::error!("Failed to delete blog post {}: {err}", form.id);
        err
    })?;

    store.remove_by(|post| post.id == form.id).await;

    Ok(())
}
