//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp storage format for show start times
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A location that can host shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// A performer who can be booked into shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A scheduled pairing of one artist at one venue at a start time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

/// Venue fields as submitted through a create or edit form.
///
/// Edits apply every field, so one struct serves both insert and
/// full-record update.
#[derive(Debug, Clone)]
pub struct VenueRecord {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Artist fields as submitted through a create or edit form
#[derive(Debug, Clone)]
pub struct ArtistRecord {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Show fields as submitted through the booking form
#[derive(Debug, Clone)]
pub struct ShowRecord {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

/// Encode a genre list for the TEXT column (JSON array)
pub fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a genre list from the TEXT column.
///
/// Unparseable values decode to an empty list rather than failing the whole
/// row load.
pub fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_list_roundtrip() {
        let genres = vec!["Jazz".to_string(), "Folk".to_string()];
        let encoded = encode_genres(&genres);
        assert_eq!(decode_genres(&encoded), genres);
    }

    #[test]
    fn malformed_genres_decode_to_empty() {
        assert!(decode_genres("not json").is_empty());
        assert!(decode_genres("").is_empty());
    }
}
