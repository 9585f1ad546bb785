//! Research papers grid.

use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::http::HttpBackend;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query::QueryState;
use crate::routes::{ListQueryParams, base_context, ensure_role, redirect, render_template};
use crate::services::{self, ServiceError};
use crate::store::PortalStore;

#[get("/papers")]
pub async fn show_papers(
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

    let data = match services::papers::load_list_page(
        backend.get_ref(),
        &store.papers,
        &user,
        query,
        max_age,
    )
    .await
    {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to load papers grid: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "papers",
        &server_config.auth_service_url,
    );
    context.insert("papers", &data.papers);
    context.insert("facets", &data.facets);
    context.insert("query", &data.query);
    context.insert("error", &data.error);

    render_template(&tera, "papers/index.html", &context)
}
