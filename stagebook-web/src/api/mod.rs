//! HTTP handlers for the directory pages
//!
//! GET handlers return rendered HTML or a [`PageError`]; write handlers
//! always answer with a redirect carrying a flash message describing the
//! outcome.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::error;

use crate::render;

pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

/// Query parameter carrying a flash message across a redirect
#[derive(Debug, Deserialize)]
pub struct FlashParams {
    pub flash: Option<String>,
}

/// Redirect to `path` with the flash message in the query string
pub fn flash_redirect(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?flash={}", path, urlencoding::encode(message)))
}

/// Request wall-clock used for past/upcoming bucketing
pub fn request_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Failures from page (GET) handlers
///
/// Write handlers never return this; their failures degrade to a flash
/// message and a redirect.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(String),
}

impl From<stagebook_common::Error> for PageError {
    fn from(err: stagebook_common::Error) -> Self {
        match err {
            stagebook_common::Error::NotFound(_) => PageError::NotFound,
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(render::not_found_page())).into_response()
            }
            PageError::Internal(message) => {
                error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}
