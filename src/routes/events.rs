//! Events grid.

use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::http::HttpBackend;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query::QueryState;
use crate::routes::{ListQueryParams, base_context, ensure_role, redirect, render_template};
use crate::services::{self, ServiceError};
use crate::store::PortalStore;

#[get("/events")]
pub async fn show_events(
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

    let data = match services::events::load_list_page(
        backend.get_ref(),
        &store.events,
        &user,
        query,
        max_age,
        Utc::now().naive_utc(),
    )
    .await
    {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to load events grid: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "events",
        &server_config.auth_service_url,
    );
    context.insert("events", &data.events);
    context.insert("facets", &data.facets);
    context.insert("query", &data.query);
    context.insert("error", &data.error);

    render_template(&tera, "events/index.html", &context)
}
