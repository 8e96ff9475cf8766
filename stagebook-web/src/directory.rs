//! Query/aggregation layer: assembles view models for the directory pages
//!
//! Loads rows through the store and partitions each venue's or artist's
//! shows into past/upcoming buckets against a caller-supplied "now", so
//! handlers pass the request wall-clock and tests pass a fixed instant.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use stagebook_common::db::models::{Artist, Show, Venue};
use stagebook_common::db::store;
use stagebook_common::Result;

/// One venue row in the grouped listing
#[derive(Debug, Clone)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub upcoming_count: usize,
}

/// Venues sharing a (city, state) pair
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show as displayed on a detail page: the counterpart record's name and
/// image (artist for a venue page, venue for an artist page) plus the start
/// time.
#[derive(Debug, Clone)]
pub struct ShowCard {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Venue detail page data
#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub past: Vec<ShowCard>,
    pub upcoming: Vec<ShowCard>,
}

/// Artist detail page data
#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub past: Vec<ShowCard>,
    pub upcoming: Vec<ShowCard>,
}

/// One search hit
#[derive(Debug, Clone)]
pub struct SearchItem {
    pub id: i64,
    pub name: String,
    pub upcoming_count: usize,
}

/// Search response: match count plus the hits
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub count: usize,
    pub items: Vec<SearchItem>,
}

/// One row of the flat shows board, with denormalized names
#[derive(Debug, Clone)]
pub struct ShowBoardEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

fn upcoming_count(shows: &[Show], now: NaiveDateTime) -> usize {
    shows.iter().filter(|s| s.start_time > now).count()
}

/// All venues grouped by unique (city, state) pair, each venue annotated
/// with its upcoming-show count. Groups and venues are ordered for stable
/// page output.
pub async fn venue_directory(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<CityGroup>> {
    let venues = store::list_venues(pool).await?;

    let mut groups: Vec<CityGroup> = Vec::new();
    for venue in &venues {
        let shows = store::shows_for_venue(pool, venue.id).await?;
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            upcoming_count: upcoming_count(&shows, now),
        };

        match groups
            .iter_mut()
            .find(|g| g.city == venue.city && g.state == venue.state)
        {
            Some(group) => group.venues.push(summary),
            None => groups.push(CityGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![summary],
            }),
        }
    }

    groups.sort_by(|a, b| (&a.city, &a.state).cmp(&(&b.city, &b.state)));
    Ok(groups)
}

/// Venue detail with shows partitioned into past and upcoming.
///
/// Strict comparisons on both sides: a show starting exactly at `now`
/// lands in neither bucket.
pub async fn venue_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = store::get_venue(pool, id).await? else {
        return Ok(None);
    };

    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in store::shows_for_venue(pool, id).await? {
        // One counterpart lookup per show
        let Some(artist) = store::get_artist(pool, show.artist_id).await? else {
            continue;
        };
        let card = ShowCard {
            id: artist.id,
            name: artist.name,
            image_link: artist.image_link,
            start_time: show.start_time,
        };
        if show.start_time > now {
            upcoming.push(card);
        } else if show.start_time < now {
            past.push(card);
        }
    }

    Ok(Some(VenueDetail {
        venue,
        past,
        upcoming,
    }))
}

/// Artist detail with shows partitioned into past and upcoming.
///
/// Same strict bucketing as [`venue_detail`], with the venue as the
/// counterpart record.
pub async fn artist_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = store::get_artist(pool, id).await? else {
        return Ok(None);
    };

    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in store::shows_for_artist(pool, id).await? {
        let Some(venue) = store::get_venue(pool, show.venue_id).await? else {
            continue;
        };
        let card = ShowCard {
            id: venue.id,
            name: venue.name,
            image_link: venue.image_link,
            start_time: show.start_time,
        };
        if show.start_time > now {
            upcoming.push(card);
        } else if show.start_time < now {
            past.push(card);
        }
    }

    Ok(Some(ArtistDetail {
        artist,
        past,
        upcoming,
    }))
}

/// Case-insensitive substring search over venue names
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let venues = store::search_venues(pool, term).await?;
    let mut items = Vec::with_capacity(venues.len());
    for venue in venues {
        let shows = store::shows_for_venue(pool, venue.id).await?;
        items.push(SearchItem {
            id: venue.id,
            name: venue.name,
            upcoming_count: upcoming_count(&shows, now),
        });
    }
    Ok(SearchResults {
        count: items.len(),
        items,
    })
}

/// Case-insensitive substring search over artist names
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let artists = store::search_artists(pool, term).await?;
    let mut items = Vec::with_capacity(artists.len());
    for artist in artists {
        let shows = store::shows_for_artist(pool, artist.id).await?;
        items.push(SearchItem {
            id: artist.id,
            name: artist.name,
            upcoming_count: upcoming_count(&shows, now),
        });
    }
    Ok(SearchResults {
        count: items.len(),
        items,
    })
}

/// Flat list of every show with denormalized venue and artist fields
pub async fn show_board(pool: &SqlitePool) -> Result<Vec<ShowBoardEntry>> {
    let shows = store::list_shows(pool).await?;
    let mut entries = Vec::with_capacity(shows.len());
    for show in shows {
        let Some(venue) = store::get_venue(pool, show.venue_id).await? else {
            continue;
        };
        let Some(artist) = store::get_artist(pool, show.artist_id).await? else {
            continue;
        };
        entries.push(ShowBoardEntry {
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;
    use stagebook_common::db::create_schema;
    use stagebook_common::db::models::{ArtistRecord, ShowRecord, VenueRecord};

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    fn venue(name: &str, city: &str, state: &str) -> VenueRecord {
        VenueRecord {
            name: name.to_string(),
            genres: vec!["Jazz".to_string()],
            address: "1 Main St".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            phone: "212-555-0123".to_string(),
            website: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
            image_link: None,
        }
    }

    fn artist(name: &str) -> ArtistRecord {
        ArtistRecord {
            name: name.to_string(),
            genres: vec!["Rock".to_string()],
            city: "Austin".to_string(),
            state: "TX".to_string(),
            phone: None,
            image_link: Some("https://example.com/a.jpg".to_string()),
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn detail_buckets_past_and_upcoming_strictly() {
        let pool = memory_pool().await;
        let vid = store::insert_venue(&pool, &venue("Spot", "Austin", "TX"))
            .await
            .unwrap();
        let aid = store::insert_artist(&pool, &artist("Band")).await.unwrap();

        let now = at(2026, 6, 15, 12);
        for start in [at(2026, 6, 1, 20), at(2026, 6, 15, 12), at(2026, 7, 1, 20)] {
            store::insert_show(
                &pool,
                &ShowRecord {
                    artist_id: aid,
                    venue_id: vid,
                    start_time: start,
                },
            )
            .await
            .unwrap();
        }

        let detail = venue_detail(&pool, vid, now).await.unwrap().unwrap();
        assert_eq!(detail.past.len(), 1);
        assert_eq!(detail.upcoming.len(), 1);
        assert_eq!(detail.past[0].start_time, at(2026, 6, 1, 20));
        assert_eq!(detail.upcoming[0].start_time, at(2026, 7, 1, 20));
        // the show starting exactly at `now` is in neither bucket
        assert_eq!(detail.past.len() + detail.upcoming.len(), 2);
    }

    #[tokio::test]
    async fn detail_cards_carry_counterpart_name_and_image() {
        let pool = memory_pool().await;
        let vid = store::insert_venue(&pool, &venue("Spot", "Austin", "TX"))
            .await
            .unwrap();
        let aid = store::insert_artist(&pool, &artist("The Band")).await.unwrap();
        store::insert_show(
            &pool,
            &ShowRecord {
                artist_id: aid,
                venue_id: vid,
                start_time: at(2030, 1, 1, 20),
            },
        )
        .await
        .unwrap();

        let now = at(2026, 6, 15, 12);
        let detail = venue_detail(&pool, vid, now).await.unwrap().unwrap();
        assert_eq!(detail.upcoming[0].name, "The Band");
        assert_eq!(
            detail.upcoming[0].image_link.as_deref(),
            Some("https://example.com/a.jpg")
        );

        let detail = artist_detail(&pool, aid, now).await.unwrap().unwrap();
        assert_eq!(detail.upcoming[0].name, "Spot");
    }

    #[tokio::test]
    async fn directory_groups_by_city_state() {
        let pool = memory_pool().await;
        store::insert_venue(&pool, &venue("A", "Austin", "TX")).await.unwrap();
        store::insert_venue(&pool, &venue("B", "Austin", "TX")).await.unwrap();
        store::insert_venue(&pool, &venue("C", "Boston", "MA")).await.unwrap();

        let groups = venue_directory(&pool, at(2026, 1, 1, 0)).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].city, "Austin");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[1].city, "Boston");
        assert_eq!(groups[1].venues.len(), 1);
    }

    #[tokio::test]
    async fn directory_counts_only_upcoming() {
        let pool = memory_pool().await;
        let vid = store::insert_venue(&pool, &venue("Spot", "Austin", "TX"))
            .await
            .unwrap();
        let aid = store::insert_artist(&pool, &artist("Band")).await.unwrap();

        let now = at(2026, 6, 15, 12);
        for start in [at(2020, 1, 1, 20), at(2030, 1, 1, 20), at(2031, 1, 1, 20)] {
            store::insert_show(
                &pool,
                &ShowRecord {
                    artist_id: aid,
                    venue_id: vid,
                    start_time: start,
                },
            )
            .await
            .unwrap();
        }

        let groups = venue_directory(&pool, now).await.unwrap();
        assert_eq!(groups[0].venues[0].upcoming_count, 2);
    }

    #[tokio::test]
    async fn missing_venue_detail_is_none() {
        let pool = memory_pool().await;
        assert!(venue_detail(&pool, 99, at(2026, 1, 1, 0))
            .await
            .unwrap()
            .is_none());
    }
}
