//! Row-level store operations for venues, artists, and shows
//!
//! Each write runs in its own transaction: commit on success, rollback on
//! drop when any statement fails. Search is a case-insensitive substring
//! match on name.

use crate::db::models::{
    decode_genres, encode_genres, Artist, ArtistRecord, Show, ShowRecord, Venue, VenueRecord,
    START_TIME_FORMAT,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn venue_from_row(row: &SqliteRow) -> Venue {
    Venue {
        id: row.get("id"),
        name: row.get("name"),
        genres: decode_genres(row.get("genres")),
        address: row.get("address"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        website: row.get("website"),
        facebook_link: row.get("facebook_link"),
        seeking_talent: row.get::<i64, _>("seeking_talent") != 0,
        seeking_description: row.get("seeking_description"),
        image_link: row.get("image_link"),
    }
}

fn artist_from_row(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        genres: decode_genres(row.get("genres")),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website: row.get("website"),
        seeking_venue: row.get::<i64, _>("seeking_venue") != 0,
        seeking_description: row.get("seeking_description"),
    }
}

fn show_from_row(row: &SqliteRow) -> Result<Show> {
    let raw: String = row.get("start_time");
    let start_time = parse_start_time(&raw)?;
    Ok(Show {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        venue_id: row.get("venue_id"),
        start_time,
    })
}

/// Parse a stored start time, accepting both the canonical space separator
/// and an ISO 'T' separator left by older imports.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| Error::Validation(format!("Invalid start time '{}': {}", raw, e)))
}

// ---------------------------------------------------------------------------
// Venues
// ---------------------------------------------------------------------------

pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query("SELECT * FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(venue_from_row).collect())
}

pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query("SELECT * FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(venue_from_row))
}

/// Case-insensitive substring search on venue name
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<Vec<Venue>> {
    let rows = sqlx::query(
        "SELECT * FROM venues WHERE name LIKE '%' || ? || '%' COLLATE NOCASE ORDER BY id",
    )
    .bind(term)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(venue_from_row).collect())
}

pub async fn insert_venue(pool: &SqlitePool, record: &VenueRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, genres, address, city, state, phone,
                            website, facebook_link, seeking_talent,
                            seeking_description, image_link)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.name)
    .bind(encode_genres(&record.genres))
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(record.seeking_talent as i64)
    .bind(&record.seeking_description)
    .bind(&record.image_link)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(result.last_insert_rowid())
}

/// Full-record replacement: every mutable column is overwritten
pub async fn update_venue(pool: &SqlitePool, id: i64, record: &VenueRecord) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, genres = ?, address = ?, city = ?, state = ?, phone = ?,
            website = ?, facebook_link = ?, seeking_talent = ?,
            seeking_description = ?, image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(encode_genres(&record.genres))
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(record.seeking_talent as i64)
    .bind(&record.seeking_description)
    .bind(&record.image_link)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }
    tx.commit().await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query("SELECT * FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(artist_from_row).collect())
}

pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT * FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(artist_from_row))
}

/// Case-insensitive substring search on artist name
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT * FROM artists WHERE name LIKE '%' || ? || '%' COLLATE NOCASE ORDER BY id",
    )
    .bind(term)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(artist_from_row).collect())
}

pub async fn insert_artist(pool: &SqlitePool, record: &ArtistRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, genres, city, state, phone, image_link,
                             facebook_link, website, seeking_venue,
                             seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.name)
    .bind(encode_genres(&record.genres))
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.image_link)
    .bind(&record.facebook_link)
    .bind(&record.website)
    .bind(record.seeking_venue as i64)
    .bind(&record.seeking_description)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(result.last_insert_rowid())
}

/// Full-record replacement: every mutable column is overwritten
pub async fn update_artist(pool: &SqlitePool, id: i64, record: &ArtistRecord) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, genres = ?, city = ?, state = ?, phone = ?,
            image_link = ?, facebook_link = ?, website = ?, seeking_venue = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(encode_genres(&record.genres))
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.image_link)
    .bind(&record.facebook_link)
    .bind(&record.website)
    .bind(record.seeking_venue as i64)
    .bind(&record.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }
    tx.commit().await?;
    Ok(())
}

pub async fn delete_artist(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }
    tx.commit().await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shows
// ---------------------------------------------------------------------------

pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<Show>> {
    let rows = sqlx::query("SELECT * FROM shows ORDER BY start_time")
        .fetch_all(pool)
        .await?;
    rows.iter().map(show_from_row).collect()
}

pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<Show>> {
    let rows = sqlx::query("SELECT * FROM shows WHERE venue_id = ? ORDER BY start_time")
        .bind(venue_id)
        .fetch_all(pool)
        .await?;
    rows.iter().map(show_from_row).collect()
}

pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<Show>> {
    let rows = sqlx::query("SELECT * FROM shows WHERE artist_id = ? ORDER BY start_time")
        .bind(artist_id)
        .fetch_all(pool)
        .await?;
    rows.iter().map(show_from_row).collect()
}

pub async fn insert_show(pool: &SqlitePool, record: &ShowRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)",
    )
    .bind(record.artist_id)
    .bind(record.venue_id)
    .bind(record.start_time.format(START_TIME_FORMAT).to_string())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(result.last_insert_rowid())
}
