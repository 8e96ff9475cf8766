//! Home page and error pages

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Html;

use super::FlashParams;
use crate::render;

/// GET /
///
/// Landing page; renders the flash banner after create/delete flows.
pub async fn home(Query(params): Query<FlashParams>) -> Html<String> {
    Html(render::home_page(params.flash.as_deref()))
}

/// Fallback handler: static 404 page for unknown routes
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::not_found_page()))
}
