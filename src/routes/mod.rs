//! Actix handlers and the shared template/redirect helpers they use.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::query::QueryState;

pub mod admin;
pub mod events;
pub mod main;
pub mod members;
pub mod papers;

/// Maps a flash message level to the alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// True when `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Checks the user's roles, returning the response to send when they miss
/// `role`: a redirect to `redirect_to` when given, a bare 403 otherwise.
pub fn ensure_role(
    user: &AuthenticatedUser,
    role: &str,
    redirect_to: Option<&str>,
) -> Result<(), HttpResponse> {
    if check_role(role, &user.roles) {
        return Ok(());
    }
    match redirect_to {
        Some(location) => Err(redirect(location)),
        None => Err(HttpResponse::Forbidden().finish()),
    }
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders `template_name`, logging and returning 500 on template errors.
pub fn render_template(tera: &Tera, template_name: &str, context: &Context) -> HttpResponse {
    match tera.render(template_name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {template_name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context pre-filled with what every page template expects.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

/// Query-string shape shared by every listing page.
///
/// Search forms and facet chips link without a `page` parameter, so changing
/// either filter lands on page 1; only the pagination strip carries `page`.
#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    pub q: Option<String>,
    pub facet: Option<String>,
    pub page: Option<i64>,
}

impl From<ListQueryParams> for QueryState {
    fn from(params: ListQueryParams) -> Self {
        QueryState::from_params(params.q, params.facet, params.page)
    }
}
