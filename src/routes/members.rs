//! Members directory and the national-id lookup panel.

use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::SERVICE_ACCESS_ROLE;
use crate::api::http::HttpBackend;
use crate::dto::members::LookupPanel;
use crate::forms::members::LookupMemberForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query::QueryState;
use crate::routes::{ListQueryParams, base_context, ensure_role, redirect, render_template};
use crate::services::{self, ServiceError};
use crate::store::PortalStore;

#[get("/members")]
pub async fn show_members(
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

    let data = match services::members::load_list_page(
        backend.get_ref(),
        &store.members,
        &user,
        query,
        max_age,
    )
    .await
    {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to load members directory: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let lookup = LookupPanel::from(store.lookups.state(&user.sub).await);

    let mut context = base_context(
        &flash_messages,
        &user,
        "members",
        &server_config.auth_service_url,
    );
    context.insert("members", &data.members);
    context.insert("facets", &data.facets);
    context.insert("query", &data.query);
    context.insert("error", &data.error);
    context.insert("lookup", &lookup);

    render_template(&tera, "members/index.html", &context)
}

/// Runs a national-id search and stores its outcome in the user's session.
///
/// The ticket issued by `begin` guards the write: if another search (or a
/// clear) happens while the backend call is in flight, this outcome is
/// dropped instead of overwriting the newer state.
#[get("/members/lookup")]
pub async fn lookup_member(
    params: web::Query<LookupMemberForm>,
    user: AuthenticatedUser,
    backend: web::Data<HttpBackend>,
    store: web::Data<PortalStore>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let form = params.into_inner();
    if form.validate().is_err() {
        FlashMessage::error("Enter a national ID to search.").send();
        return redirect("/members");
    }

    let national_id = match form.into_national_id() {
        Ok(national_id) => national_id,
        Err(err) => {
            FlashMessage::error(format!("Invalid national ID: {err}")).send();
            return redirect("/members");
        }
    };

    let ticket = store.lookups.begin(&user.sub, national_id.as_str()).await;
    let outcome = services::members::lookup_member(backend.get_ref(), &national_id).await;
    store.lookups.resolve(&user.sub, ticket, outcome).await;

    redirect("/members")
}

#[post("/members/lookup/clear")]
pub async fn clear_lookup(
    user: AuthenticatedUser,
    store: web::Data<PortalStore>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    store.lookups.clear(&user.sub).await;
    redirect("/members")
}
