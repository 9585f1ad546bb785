//! Home page (blog grid) and the portal-wide utility handlers.

use std::time::Duration;

use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::http::HttpBackend;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query::QueryState;
use crate::routes::{ListQueryParams, base_context, ensure_role, redirect, render_template};
use crate::services::{self, ServiceError};
use crate::store::PortalStore;

#[get("/")]
pub async fn show_index(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let query: QueryState = params.into_inner().into();
    let max_age = Duration::from_secs(server_config.snapshot_max_age_secs);

    let data = match services::blogs::load_list_page(
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
            log::error!("Failed to load blog grid: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("posts", &data.posts);
    context.insert("facets", &data.facets);
    context.insert("latest", &data.latest);
    context.insert("query", &data.query);
    context.insert("filtered", &!data.query.is_unfiltered());
    context.insert("error", &data.error);

    render_template(&tera, "main/index.html", &context)
}

#[derive(Deserialize)]
struct RefreshParams {
    to: Option<String>,
}

/// Forces a refetch of one collection snapshot, then returns to its page.
#[get("/refresh")]
pub async fn refresh(
    params: web::Query<RefreshParams>,
    user: AuthenticatedUser,
    store: web::Data<PortalStore>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    // `to` is matched against known collections, never echoed into the
    // Location header.
    let location = match params.to.as_deref() {
        Some("events") => {
            store.events.invalidate().await;
            "/events"
        }
        Some("members") => {
            store.members.invalidate().await;
            "/members"
        }
        Some("papers") => {
            store.papers.invalidate().await;
            "/papers"
        }
        _ => {
            store.blogs.invalidate().await;
            "/"
        }
    };

    redirect(location)
}

/// Landing page for signed-in users without the portal role.
#[get("/na")]
pub async fn not_assigned(
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = tera::Context::new();
    context.insert("home_url", &server_config.auth_service_url);
    render_template(&tera, "na.html", &context)
}

#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/")
}
