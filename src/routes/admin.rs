//! Blog administration: the manage table and its CRUD forms.

use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ADMIN_ROLE;
use crate::api::http::HttpBackend;
use crate::forms::blogs::{AddBlogPostForm, DeleteBlogPostForm, EditBlogPostForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query::QueryState;
use crate::routes::{ListQueryParams, base_context, ensure_role, redirect, render_template};
use crate::services::{self, ServiceError};
use crate::store::PortalStore;

#[get("/admin/blogs")]
pub async fn show_blog_admin(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let query: QueryState = params.into_inner().into();
    let max_age = Duration::from_secs(server_config.snapshot_max_age_secs);

    let data = match services::blogs::load_admin_page(
        backend.get_ref(),
        &store.blogs,
        &user,
        query,
        max_age,
    )
    .await
    {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to load blog admin table: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "admin_blogs",
        &server_config.auth_service_url,
    );
    context.insert("posts", &data.posts);
    context.insert("query", &data.query);
    context.insert("error", &data.error);

    render_template(&tera, "admin/blogs.html", &context)
}

#[get("/admin/blogs/{id}")]
pub async fn show_blog_edit(
    id: web::Path<i64>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let id = id.into_inner();

    let post =
        match services::blogs::load_edit_page(backend.get_ref(), &store.blogs, &user, id).await {
            Ok(post) => post,
            Err(ServiceError::Unauthorized) => return redirect("/na"),
            Err(ServiceError::NotFound) => {
                FlashMessage::error("Post not found.").send();
                return redirect("/admin/blogs");
            }
            Err(err) => {
                log::error!("Failed to load blog post {id} for editing: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let mut context = base_context(
        &flash_messages,
        &user,
        "admin_blogs",
        &server_config.auth_service_url,
    );
    context.insert("post", &post);

    render_template(&tera, "admin/edit.html", &context)
}

/// Sends the failure of a mutation back to the manage table as a flash.
fn flash_failure(action: &str, err: &ServiceError) {
    match err {
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            FlashMessage::error("Form validation error.").send();
        }
        ServiceError::Backend(backend) => {
            FlashMessage::error(format!("Failed to {action} the post: {backend}")).send();
        }
        _ => {
            FlashMessage::error(format!("Failed to {action} the post.")).send();
        }
    }
}

#[post("/admin/blogs/add")]
pub async fn add_blog_post(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    web::Form(form): web::Form<AddBlogPostForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match services::blogs::add_post(backend.get_ref(), &store.blogs, &user, form).await {
        Ok(()) => FlashMessage::success("Post published.").send(),
        Err(err) => flash_failure("publish", &err),
    }

    redirect("/admin/blogs")
}

#[post("/admin/blogs/save")]
pub async fn save_blog_post(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    web::Form(form): web::Form<EditBlogPostForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match services::blogs::save_post(backend.get_ref(), &store.blogs, &user, form).await {
        Ok(()) => FlashMessage::success("Post updated.").send(),
        Err(err) => flash_failure("update", &err),
    }

    redirect("/admin/blogs")
}

#[post("/admin/blogs/delete")]
pub async fn delete_blog_post(
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    web::Form(form): web::Form<DeleteBlogPostForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match services::blogs::delete_post(backend.get_ref(), &store.blogs, &user, form).await {
        Ok(()) => FlashMessage::success("Post deleted.").send(),
        Err(err) => flash_failure("delete", &err),
    }

    redirect("/admin/blogs")
}
