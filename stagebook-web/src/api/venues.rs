//! Venue routes: grouped listing, search, detail, create, edit, delete

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use tracing::{error, info};

use stagebook_common::db::store;
use stagebook_common::Error;

use super::{flash_redirect, request_now, FlashParams, PageError};
use crate::forms::{SearchForm, VenueForm};
use crate::{directory, render, AppState};

/// GET /venues
///
/// Venues grouped by (city, state), each with its upcoming-show count.
pub async fn listing(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let groups = directory::venue_directory(&state.db, request_now()).await?;
    Ok(Html(render::venues_page(&groups)))
}

/// POST /venues/search
///
/// Case-insensitive substring search on venue name.
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = directory::search_venues(&state.db, &form.search_term, request_now()).await?;
    Ok(Html(render::venue_search_page(&form.search_term, &results)))
}

/// GET /venues/:id
///
/// Venue detail with past/upcoming show buckets.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FlashParams>,
) -> Result<Html<String>, PageError> {
    let detail = directory::venue_detail(&state.db, id, request_now())
        .await?
        .ok_or(PageError::NotFound)?;
    Ok(Html(render::venue_detail_page(
        &detail,
        params.flash.as_deref(),
    )))
}

/// GET /venues/create
pub async fn create_form() -> Html<String> {
    Html(render::venue_form_page("/venues/create", "List a venue", None))
}

/// POST /venues/create
///
/// Validates the form, inserts the record, and lands on the home page with
/// a flash message describing the outcome.
pub async fn create_submission(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> Redirect {
    let name = form.name.clone();
    let message = match insert(&state, form).await {
        Ok(id) => {
            info!("Listed venue {} (id {})", name, id);
            format!("Venue {} is successfully listed!", name)
        }
        Err(Error::Validation(reason)) => {
            format!(
                "An error occurred. Venue {} could not be listed. {}",
                name, reason
            )
        }
        Err(e) => {
            error!("Failed to list venue {}: {}", name, e);
            format!("An error occurred. Venue {} could not be listed.", name)
        }
    };
    flash_redirect("/", &message)
}

async fn insert(state: &AppState, form: VenueForm) -> stagebook_common::Result<i64> {
    let record = form.into_record()?;
    store::insert_venue(&state.db, &record).await
}

/// GET /venues/:id/edit
///
/// Edit form prefilled with the current record.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let venue = store::get_venue(&state.db, id)
        .await?
        .ok_or(PageError::NotFound)?;
    Ok(Html(render::venue_form_page(
        &format!("/venues/{}/edit", id),
        "Edit venue",
        Some(&venue),
    )))
}

/// POST /venues/:id/edit
///
/// Full-record replacement, then back to the detail page with a flash.
pub async fn edit_submission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Redirect {
    let name = form.name.clone();
    let message = match update(&state, id, form).await {
        Ok(()) => format!("Venue {} was successfully updated!", name),
        Err(Error::Validation(reason)) => {
            format!(
                "An error occurred. Venue {} could not be updated. {}",
                name, reason
            )
        }
        Err(e) => {
            error!("Failed to update venue {}: {}", id, e);
            format!("An error occurred. Venue {} could not be updated.", name)
        }
    };
    flash_redirect(&format!("/venues/{}", id), &message)
}

async fn update(state: &AppState, id: i64, form: VenueForm) -> stagebook_common::Result<()> {
    let record = form.into_record()?;
    store::update_venue(&state.db, id, &record).await
}

/// DELETE /venues/:id
///
/// Deletes the record (shows go with it) and redirects home with a flash.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    let name = match store::get_venue(&state.db, id).await {
        Ok(Some(venue)) => venue.name,
        Ok(None) => {
            return flash_redirect("/", "An error occurred. Venue could not be deleted.");
        }
        Err(e) => {
            error!("Failed to load venue {} for delete: {}", id, e);
            return flash_redirect("/", "An error occurred. Venue could not be deleted.");
        }
    };

    let message = match store::delete_venue(&state.db, id).await {
        Ok(()) => {
            info!("Deleted venue {} (id {})", name, id);
            format!("Venue {} was successfully deleted.", name)
        }
        Err(e) => {
            error!("Failed to delete venue {}: {}", id, e);
            format!("An error occurred. Venue {} could not be deleted.", name)
        }
    };
    flash_redirect("/", &message)
}
