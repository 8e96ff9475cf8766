//! Typed form DTOs and boundary validation
//!
//! Each POST body deserializes into one of these structs; `into_record`
//! converts to the store's record types, applying the phone number check.
//! Optional text inputs arrive as empty strings and are stored as NULL.

use crate::datefmt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use stagebook_common::db::models::{ArtistRecord, ShowRecord, VenueRecord};
use stagebook_common::{Error, Result};

/// US phone numbers: optional +1/1 prefix, then area code and exchange
/// (neither may start with 0 or 1), separators optional.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?1?[\s.\-]*\(?([2-9][0-9]{2})\)?[\s.\-]*([2-9][0-9]{2})[\s.\-]*([0-9]{4})$")
        .expect("phone regex must compile")
});

/// Validate a user-entered phone number
pub fn validate_phone(raw: &str) -> Result<()> {
    if PHONE_RE.is_match(raw.trim()) {
        Ok(())
    } else {
        Err(Error::Validation(
            "Must enter a valid phone number.".to_string(),
        ))
    }
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Genre tags arrive as one comma-separated field
fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search box submission
#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venue create/edit form fields
#[derive(Debug, Clone, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: String,
    /// Checkbox: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

impl VenueForm {
    /// Validate and convert to a store record
    pub fn into_record(self) -> Result<VenueRecord> {
        validate_phone(&self.phone)?;
        Ok(VenueRecord {
            name: self.name.trim().to_string(),
            genres: split_genres(&self.genres),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: blank_to_none(self.website),
            facebook_link: blank_to_none(self.facebook_link),
            seeking_talent: self.seeking_talent.is_some(),
            seeking_description: blank_to_none(self.seeking_description),
            image_link: blank_to_none(self.image_link),
        })
    }
}

/// Artist create/edit form fields
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: String,
    /// Checkbox: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

impl ArtistForm {
    /// Validate and convert to a store record.
    ///
    /// Artist phone is optional; the format check only runs on a non-blank
    /// value.
    pub fn into_record(self) -> Result<ArtistRecord> {
        let phone = blank_to_none(self.phone);
        if let Some(ref number) = phone {
            validate_phone(number)?;
        }
        Ok(ArtistRecord {
            name: self.name.trim().to_string(),
            genres: split_genres(&self.genres),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone,
            image_link: blank_to_none(self.image_link),
            facebook_link: blank_to_none(self.facebook_link),
            website: blank_to_none(self.website),
            seeking_venue: self.seeking_venue.is_some(),
            seeking_description: blank_to_none(self.seeking_description),
        })
    }
}

/// Show booking form fields
#[derive(Debug, Clone, Deserialize)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: String,
}

impl ShowForm {
    /// Validate and convert to a store record
    pub fn into_record(self) -> Result<ShowRecord> {
        let start_time = datefmt::parse_timestamp(&self.start_time).ok_or_else(|| {
            Error::Validation(format!("Invalid start time: {}", self.start_time))
        })?;
        Ok(ShowRecord {
            artist_id: self.artist_id,
            venue_id: self.venue_id,
            start_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        for number in [
            "212-555-0123",
            "(212) 555-0123",
            "212.555.0123",
            "2125550123",
            "+1 212 555 0123",
            "1-212-555-0123",
        ] {
            assert!(validate_phone(number).is_ok(), "should accept {}", number);
        }
    }

    #[test]
    fn rejects_malformed_phones() {
        for number in ["", "12345", "123-456-7890", "555-0123", "call me", "212-555-01234"] {
            assert!(validate_phone(number).is_err(), "should reject {}", number);
        }
    }

    #[test]
    fn genres_split_and_trim() {
        assert_eq!(
            split_genres("Jazz, Blues , ,Folk"),
            vec!["Jazz", "Blues", "Folk"]
        );
        assert!(split_genres("").is_empty());
    }

    #[test]
    fn venue_form_maps_blank_optionals_to_none() {
        let form = VenueForm {
            name: "Spot".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            address: "1 Main St".to_string(),
            phone: "212-555-0123".to_string(),
            genres: "Jazz".to_string(),
            website: "".to_string(),
            facebook_link: "  ".to_string(),
            image_link: "".to_string(),
            seeking_talent: None,
            seeking_description: "".to_string(),
        };
        let record = form.into_record().unwrap();
        assert_eq!(record.website, None);
        assert_eq!(record.facebook_link, None);
        assert!(!record.seeking_talent);
    }

    #[test]
    fn venue_form_rejects_bad_phone() {
        let form = VenueForm {
            name: "Spot".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            address: "1 Main St".to_string(),
            phone: "nope".to_string(),
            genres: "Jazz".to_string(),
            website: "".to_string(),
            facebook_link: "".to_string(),
            image_link: "".to_string(),
            seeking_talent: Some("y".to_string()),
            seeking_description: "".to_string(),
        };
        assert!(form.into_record().unwrap_err().is_validation());
    }

    #[test]
    fn artist_form_skips_phone_check_when_blank() {
        let form = ArtistForm {
            name: "Band".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            phone: "".to_string(),
            genres: "Rock".to_string(),
            website: "".to_string(),
            facebook_link: "".to_string(),
            image_link: "".to_string(),
            seeking_venue: None,
            seeking_description: "".to_string(),
        };
        let record = form.into_record().unwrap();
        assert_eq!(record.phone, None);
    }

    #[test]
    fn show_form_parses_datetime_local_input() {
        let form = ShowForm {
            artist_id: 1,
            venue_id: 2,
            start_time: "2026-09-01T20:00".to_string(),
        };
        let record = form.into_record().unwrap();
        assert_eq!(record.start_time.format("%H:%M").to_string(), "20:00");
    }

    #[test]
    fn show_form_rejects_garbage_datetime() {
        let form = ShowForm {
            artist_id: 1,
            venue_id: 2,
            start_time: "whenever".to_string(),
        };
        assert!(form.into_record().unwrap_err().is_validation());
    }
}
