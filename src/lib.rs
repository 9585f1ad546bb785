use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::api::http::HttpBackend;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::routes::admin::{
    add_blog_post, delete_blog_post, save_blog_post, show_blog_admin, show_blog_edit,
};
use crate::routes::events::show_events;
use crate::routes::main::{logout, not_assigned, refresh, show_index};
use crate::routes::members::{clear_lookup, lookup_member, show_members};
use crate::routes::papers::show_papers;
use crate::store::PortalStore;

pub mod api;
pub mod domain;
pub mod dto;
pub mod filter;
pub mod forms;
pub mod lookup;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod services;
pub mod store;

pub const SERVICE_ACCESS_ROLE: &str = "portal";
pub const SERVICE_ADMIN_ROLE: &str = "portal_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Gateway to the REST backend that owns every record this portal shows.
    let backend = HttpBackend::new(
        &server_config.backend_url,
        Duration::from_secs(server_config.request_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build backend gateway: {e}")))?;

    // One store per process, shared by all workers; snapshots are fetched
    // lazily by the first listing request that finds them stale.
    let store = web::Data::new(PortalStore::new());

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(refresh)
                    .service(show_events)
                    .service(show_members)
                    .service(lookup_member)
                    .service(clear_lookup)
                    .service(show_papers)
                    .service(show_blog_admin)
                    .service(show_blog_edit)
                    .service(add_blog_post)
                    .service(save_blog_post)
                    .service(delete_blog_post)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(backend.clone()))
            .app_data(store.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
