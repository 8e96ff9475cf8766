//! Store-level tests for the persistence layer
//!
//! Covers row round-trips, full-replace updates, case-insensitive name
//! search, foreign key enforcement on shows, and the cascade behavior of
//! venue/artist deletion.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use stagebook_common::db::models::{ArtistRecord, ShowRecord, VenueRecord};
use stagebook_common::db::{create_schema, store};
use stagebook_common::Error;

/// Test helper: single-connection in-memory database with full schema
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    create_schema(&pool).await.expect("Should create schema");
    pool
}

fn sample_venue(name: &str, city: &str, state: &str) -> VenueRecord {
    VenueRecord {
        name: name.to_string(),
        genres: vec!["Jazz".to_string(), "Blues".to_string()],
        address: "123 Main St".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        phone: "212-555-0123".to_string(),
        website: Some("https://example.com".to_string()),
        facebook_link: None,
        seeking_talent: true,
        seeking_description: Some("Looking for jazz trios".to_string()),
        image_link: None,
    }
}

fn sample_artist(name: &str) -> ArtistRecord {
    ArtistRecord {
        name: name.to_string(),
        genres: vec!["Rock".to_string()],
        city: "Portland".to_string(),
        state: "OR".to_string(),
        phone: None,
        image_link: Some("https://example.com/band.jpg".to_string()),
        facebook_link: None,
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

fn show_at(artist_id: i64, venue_id: i64, ymd: (i32, u32, u32)) -> ShowRecord {
    ShowRecord {
        artist_id,
        venue_id,
        start_time: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap(),
    }
}

#[tokio::test]
async fn venue_insert_get_roundtrip() {
    let pool = setup_test_db().await;

    let id = store::insert_venue(&pool, &sample_venue("The Blue Room", "Chicago", "IL"))
        .await
        .unwrap();

    let venue = store::get_venue(&pool, id).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Blue Room");
    assert_eq!(venue.genres, vec!["Jazz", "Blues"]);
    assert_eq!(venue.phone, "212-555-0123");
    assert!(venue.seeking_talent);
    assert_eq!(venue.facebook_link, None);
}

#[tokio::test]
async fn venue_update_replaces_every_field() {
    let pool = setup_test_db().await;
    let id = store::insert_venue(&pool, &sample_venue("Old Name", "Chicago", "IL"))
        .await
        .unwrap();

    let mut replacement = sample_venue("New Name", "Detroit", "MI");
    replacement.website = None;
    replacement.seeking_talent = false;
    store::update_venue(&pool, id, &replacement).await.unwrap();

    let venue = store::get_venue(&pool, id).await.unwrap().unwrap();
    assert_eq!(venue.name, "New Name");
    assert_eq!(venue.city, "Detroit");
    // Fields omitted from the replacement are not preserved
    assert_eq!(venue.website, None);
    assert!(!venue.seeking_talent);
}

#[tokio::test]
async fn venue_update_missing_row_is_not_found() {
    let pool = setup_test_db().await;
    let result = store::update_venue(&pool, 999, &sample_venue("X", "Y", "ZZ")).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn venue_search_is_case_insensitive_substring() {
    let pool = setup_test_db().await;
    store::insert_venue(&pool, &sample_venue("Central Park Stage", "New York", "NY"))
        .await
        .unwrap();
    store::insert_venue(&pool, &sample_venue("Square Garden", "New York", "NY"))
        .await
        .unwrap();

    let hits = store::search_venues(&pool, "Park").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Central Park Stage");

    // any case matches
    let hits = store::search_venues(&pool, "pArK").await.unwrap();
    assert_eq!(hits.len(), 1);

    let hits = store::search_venues(&pool, "nothing").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn artist_insert_get_roundtrip() {
    let pool = setup_test_db().await;
    let id = store::insert_artist(&pool, &sample_artist("The Wailers"))
        .await
        .unwrap();

    let artist = store::get_artist(&pool, id).await.unwrap().unwrap();
    assert_eq!(artist.name, "The Wailers");
    assert_eq!(artist.phone, None);
    assert_eq!(artist.genres, vec!["Rock"]);
}

#[tokio::test]
async fn show_requires_existing_artist_and_venue() {
    let pool = setup_test_db().await;
    let venue_id = store::insert_venue(&pool, &sample_venue("Spot", "Austin", "TX"))
        .await
        .unwrap();

    // artist 42 does not exist
    let result = store::insert_show(&pool, &show_at(42, venue_id, (2026, 9, 1))).await;
    assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn deleting_venue_cascades_to_shows() {
    let pool = setup_test_db().await;
    let venue_id = store::insert_venue(&pool, &sample_venue("Spot", "Austin", "TX"))
        .await
        .unwrap();
    let artist_id = store::insert_artist(&pool, &sample_artist("Band")).await.unwrap();
    store::insert_show(&pool, &show_at(artist_id, venue_id, (2026, 9, 1)))
        .await
        .unwrap();

    store::delete_venue(&pool, venue_id).await.unwrap();

    assert!(store::get_venue(&pool, venue_id).await.unwrap().is_none());
    assert!(store::list_shows(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_artist_with_show_succeeds() {
    let pool = setup_test_db().await;
    let venue_id = store::insert_venue(&pool, &sample_venue("Spot", "Austin", "TX"))
        .await
        .unwrap();
    let artist_id = store::insert_artist(&pool, &sample_artist("Band")).await.unwrap();
    store::insert_show(&pool, &show_at(artist_id, venue_id, (2026, 9, 1)))
        .await
        .unwrap();

    store::delete_artist(&pool, artist_id).await.unwrap();

    assert!(store::get_artist(&pool, artist_id).await.unwrap().is_none());
    assert!(store::list_shows(&pool).await.unwrap().is_empty());
    // the venue is untouched
    assert!(store::get_venue(&pool, venue_id).await.unwrap().is_some());
}

#[tokio::test]
async fn shows_listing_orders_by_start_time() {
    let pool = setup_test_db().await;
    let venue_id = store::insert_venue(&pool, &sample_venue("Spot", "Austin", "TX"))
        .await
        .unwrap();
    let artist_id = store::insert_artist(&pool, &sample_artist("Band")).await.unwrap();

    store::insert_show(&pool, &show_at(artist_id, venue_id, (2027, 1, 1)))
        .await
        .unwrap();
    store::insert_show(&pool, &show_at(artist_id, venue_id, (2025, 1, 1)))
        .await
        .unwrap();

    let shows = store::list_shows(&pool).await.unwrap();
    assert_eq!(shows.len(), 2);
    assert!(shows[0].start_time < shows[1].start_time);
}
