//! Show routes: flat board and booking form

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use tracing::{error, info};

use stagebook_common::db::store;
use stagebook_common::Error;

use super::{flash_redirect, PageError};
use crate::forms::ShowForm;
use crate::{directory, render, AppState};

/// GET /shows
///
/// Every show with denormalized venue and artist names.
pub async fn listing(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let entries = directory::show_board(&state.db).await?;
    Ok(Html(render::shows_page(&entries)))
}

/// GET /shows/create
pub async fn create_form() -> Html<String> {
    Html(render::show_form_page())
}

/// POST /shows/create
///
/// A booking against a missing artist or venue id fails the foreign key
/// check and degrades to the generic failure flash.
pub async fn create_submission(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Redirect {
    let message = match insert(&state, form).await {
        Ok(id) => {
            info!("Booked show (id {})", id);
            "Show is successfully listed!".to_string()
        }
        Err(Error::Validation(reason)) => {
            format!("An error occurred. Show could not be listed. {}", reason)
        }
        Err(e) => {
            error!("Failed to book show: {}", e);
            "An error occurred. Show could not be listed.".to_string()
        }
    };
    flash_redirect("/", &message)
}

async fn insert(state: &AppState, form: ShowForm) -> stagebook_common::Result<i64> {
    let record = form.into_record()?;
    store::insert_show(&state.db, &record).await
}
