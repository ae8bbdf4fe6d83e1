use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{Mailer, NoopMailer, NotificationService, ResendMailer};

pub mod auth;
mod clients;
mod contacts;
mod error;
mod films;
mod settings;
mod subscribers;
mod team;
pub mod token;
mod types;
mod upload;
mod validation;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub notifications: NotificationService,
}

/// Build application state, choosing the mailer from configuration:
/// Resend when an API key is present, otherwise a no-op sink.
pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let mailer: Arc<dyn Mailer> = match (&config.email.resend_api_key, &config.email.from_email) {
        (Some(api_key), Some(from)) => Arc::new(ResendMailer::new(api_key, from)?),
        _ => Arc::new(NoopMailer),
    };

    create_app_state_with_mailer(config, mailer).await
}

/// Build application state with an explicit mailer. Tests inject counting
/// or failing mailers through this entry point.
pub async fn create_app_state_with_mailer(
    config: Config,
    mailer: Arc<dyn Mailer>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let notifications = NotificationService::new(mailer, &config);

    Ok(Arc::new(AppState {
        config,
        store,
        notifications,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads_path = state.config.general.uploads_path.clone();
    let frontend_dist = state.config.general.frontend_dist.clone();
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(create_public_router())
        .merge(create_protected_router(state.clone()))
        .with_state(state);

    let origins: Vec<HeaderValue> = cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
    let cors_layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    // Anything outside /api and /uploads falls through to the built SPA,
    // with index.html for client-side routes.
    let spa = ServeDir::new(&frontend_dist)
        .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

    Router::new()
        .nest("/api", api_router)
        .nest_service("/uploads", ServeDir::new(uploads_path))
        .fallback_service(spa)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /api/health
/// Readiness probe: 200 while the store answers, 503 otherwise.
async fn health(State(state): State<Arc<AppState>>) -> Response {
    let version = env!("CARGO_PKG_VERSION");

    if state.store.ping().await.is_ok() {
        Json(HealthResponse {
            status: "ok",
            version,
        })
        .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                version,
            }),
        )
            .into_response()
    }
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/films", get(films::list_films))
        .route("/films/{id}", get(films::get_film))
        .route("/team", get(team::list_team))
        .route("/team/{id}", get(team::get_team_member))
        .route("/clients", get(clients::list_clients))
        .route("/clients/{id}", get(clients::get_client))
        .route("/contacts", post(contacts::create_contact))
        .route("/subscribers", post(subscribers::subscribe))
        .route("/settings", get(settings::get_all_settings))
        .route("/settings/{key}", get(settings::get_setting))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/verify", get(auth::verify))
        .route("/auth/register", post(auth::register))
        .route("/films", post(films::create_film))
        .route("/films/{id}", put(films::update_film))
        .route("/films/{id}", delete(films::delete_film))
        .route("/team", post(team::create_team_member))
        .route("/team/{id}", put(team::update_team_member))
        .route("/team/{id}", delete(team::delete_team_member))
        .route("/clients", post(clients::create_client))
        .route("/clients/{id}", put(clients::update_client))
        .route("/clients/{id}", delete(clients::delete_client))
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts/{id}", get(contacts::get_contact))
        .route("/contacts/{id}", delete(contacts::delete_contact))
        .route("/contacts/{id}/read", patch(contacts::mark_contact_read))
        .route("/subscribers", get(subscribers::list_subscribers))
        .route("/subscribers/{id}", delete(subscribers::delete_subscriber))
        .route("/settings/{key}", put(settings::upsert_setting))
        .route("/upload/image", post(upload::upload_image))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
