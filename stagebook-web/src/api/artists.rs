//! Artist routes: listing, search, detail, create, edit, delete
//!
//! Mirrors the venue routes with the venue as the counterpart record on
//! detail pages.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use tracing::{error, info};

use stagebook_common::db::store;
use stagebook_common::Error;

use super::{flash_redirect, request_now, FlashParams, PageError};
use crate::forms::{ArtistForm, SearchForm};
use crate::{directory, render, AppState};

/// GET /artists
///
/// Flat roster of all artists.
pub async fn listing(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let artists = store::list_artists(&state.db).await?;
    Ok(Html(render::artists_page(&artists)))
}

/// POST /artists/search
///
/// Case-insensitive substring search on artist name.
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = directory::search_artists(&state.db, &form.search_term, request_now()).await?;
    Ok(Html(render::artist_search_page(&form.search_term, &results)))
}

/// GET /artists/:id
///
/// Artist detail with past/upcoming show buckets.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FlashParams>,
) -> Result<Html<String>, PageError> {
    let detail = directory::artist_detail(&state.db, id, request_now())
        .await?
        .ok_or(PageError::NotFound)?;
    Ok(Html(render::artist_detail_page(
        &detail,
        params.flash.as_deref(),
    )))
}

/// GET /artists/create
pub async fn create_form() -> Html<String> {
    Html(render::artist_form_page(
        "/artists/create",
        "List an artist",
        None,
    ))
}

/// POST /artists/create
pub async fn create_submission(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Redirect {
    let name = form.name.clone();
    let message = match insert(&state, form).await {
        Ok(id) => {
            info!("Listed artist {} (id {})", name, id);
            format!("Artist {} was successfully listed!", name)
        }
        Err(Error::Validation(reason)) => {
            format!(
                "An error occurred. Artist {} could not be listed. {}",
                name, reason
            )
        }
        Err(e) => {
            error!("Failed to list artist {}: {}", name, e);
            format!("An error occurred. Artist {} could not be listed.", name)
        }
    };
    flash_redirect("/", &message)
}

async fn insert(state: &AppState, form: ArtistForm) -> stagebook_common::Result<i64> {
    let record = form.into_record()?;
    store::insert_artist(&state.db, &record).await
}

/// GET /artists/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let artist = store::get_artist(&state.db, id)
        .await?
        .ok_or(PageError::NotFound)?;
    Ok(Html(render::artist_form_page(
        &format!("/artists/{}/edit", id),
        "Edit artist",
        Some(&artist),
    )))
}

/// POST /artists/:id/edit
///
/// Full-record replacement, then back to the detail page with a flash.
pub async fn edit_submission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Redirect {
    let name = form.name.clone();
    let message = match update(&state, id, form).await {
        Ok(()) => format!("Artist {} was successfully updated!", name),
        Err(Error::Validation(reason)) => {
            format!(
                "An error occurred. Artist {} could not be updated. {}",
                name, reason
            )
        }
        Err(e) => {
            error!("Failed to update artist {}: {}", id, e);
            format!("An error occurred. Artist {} could not be updated.", name)
        }
    };
    flash_redirect(&format!("/artists/{}", id), &message)
}

async fn update(state: &AppState, id: i64, form: ArtistForm) -> stagebook_common::Result<()> {
    let record = form.into_record()?;
    store::update_artist(&state.db, id, &record).await
}

/// DELETE /artists/:id
///
/// Deleting an artist with booked shows succeeds; the shows are removed
/// with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    let name = match store::get_artist(&state.db, id).await {
        Ok(Some(artist)) => artist.name,
        Ok(None) => {
            return flash_redirect("/", "An error occurred. Artist could not be deleted.");
        }
        Err(e) => {
            error!("Failed to load artist {} for delete: {}", id, e);
            return flash_redirect("/", "An error occurred. Artist could not be deleted.");
        }
    };

    let message = match store::delete_artist(&state.db, id).await {
        Ok(()) => {
            info!("Deleted artist {} (id {})", name, id);
            format!("Artist {} was successfully deleted.", name)
        }
        Err(e) => {
            error!("Failed to delete artist {}: {}", id, e);
            format!("An error occurred. Artist {} could not be deleted.", name)
        }
    };
    flash_redirect("/", &message)
}
