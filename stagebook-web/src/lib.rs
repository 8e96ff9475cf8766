//! stagebook-web library - server-rendered booking directory
//!
//! Venue, artist, and show pages with list, search, create, edit, and
//! delete flows rendered as HTML.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod datefmt;
pub mod directory;
pub mod forms;
pub mod render;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::pages::home))
        .route("/venues", get(api::venues::listing))
        .route("/venues/search", post(api::venues::search))
        .route(
            "/venues/create",
            get(api::venues::create_form).post(api::venues::create_submission),
        )
        .route(
            "/venues/:id",
            get(api::venues::detail).delete(api::venues::delete),
        )
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_form).post(api::venues::edit_submission),
        )
        .route("/artists", get(api::artists::listing))
        .route("/artists/search", post(api::artists::search))
        .route(
            "/artists/create",
            get(api::artists::create_form).post(api::artists::create_submission),
        )
        .route(
            "/artists/:id",
            get(api::artists::detail).delete(api::artists::delete),
        )
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_form).post(api::artists::edit_submission),
        )
        .route("/shows", get(api::shows::listing))
        .route(
            "/shows/create",
            get(api::shows::create_form).post(api::shows::create_submission),
        )
        .merge(api::health::health_routes())
        .fallback(api::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
