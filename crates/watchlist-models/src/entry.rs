use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CatalogCard, ExternalId, Impression, MediaType};

/// One tracked title.
///
/// Field names on the wire follow the catalog (`tmdb_id`, `vote_average`) so
/// blobs written by earlier versions of the plugin load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: String,
    #[serde(rename = "tmdb_id")]
    pub external_id: ExternalId,
    pub media_type: MediaType,
    /// Absent when the catalog card had neither a title nor a name.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(rename = "vote_average", default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub watched: bool,
    #[serde(default)]
    pub impression: Option<Impression>,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub watched_at: Option<DateTime<Utc>>,
}

impl WatchlistEntry {
    /// Build a fresh, unwatched entry from a catalog card.
    pub fn from_card(card: &CatalogCard, added_at: DateTime<Utc>) -> Self {
        Self {
            id: card.watchlist_id(),
            external_id: card.id.clone(),
            media_type: card.resolved_media_type(),
            title: card.display_title(),
            original_title: card.display_original_title(),
            poster_path: card.poster_path.clone(),
            backdrop_path: card.backdrop_path.clone(),
            rating: card.vote_average,
            release_date: card.effective_release_date(),
            overview: card.overview.clone(),
            watched: false,
            impression: None,
            added_at,
            watched_at: None,
        }
    }

    pub fn mark_watched(&mut self, impression: Impression, at: DateTime<Utc>) {
        self.watched = true;
        self.impression = Some(impression);
        self.watched_at = Some(at);
    }

    pub fn mark_unwatched(&mut self) {
        self.watched = false;
        self.impression = None;
        self.watched_at = None;
    }

    /// Whether the watched flag, impression and watched timestamp agree.
    pub fn is_consistent(&self) -> bool {
        if self.watched {
            self.impression.is_some() && self.watched_at.is_some()
        } else {
            self.impression.is_none() && self.watched_at.is_none()
        }
    }

    /// Four-digit year from a year-first release date.
    pub fn release_year(&self) -> Option<u32> {
        let date = self.release_date.as_deref()?;
        let year = date.get(..4)?;
        if year.chars().all(|c| c.is_ascii_digit()) {
            year.parse().ok()
        } else {
            None
        }
    }

    /// Absolute poster URL given the image host's base (e.g. `.../t/p/w300`).
    pub fn poster_url(&self, base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", base_url.trim_end_matches('/'), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fight_club() -> CatalogCard {
        let mut card = CatalogCard::movie(550u64, "Fight Club");
        card.poster_path = Some("/poster.jpg".to_string());
        card.release_date = Some("1999-10-15".to_string());
        card.vote_average = Some(8.4);
        card
    }

    #[test]
    fn test_from_card_starts_unwatched() {
        let added = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = WatchlistEntry::from_card(&fight_club(), added);

        assert_eq!(entry.id, "tmdb_movie_550");
        assert_eq!(entry.title, "Fight Club");
        assert_eq!(entry.rating, Some(8.4));
        assert!(!entry.watched);
        assert_eq!(entry.impression, None);
        assert_eq!(entry.watched_at, None);
        assert_eq!(entry.added_at, added);
        assert!(entry.is_consistent());
    }

    #[test]
    fn test_watch_state_transitions_keep_consistency() {
        let added = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let watched = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let mut entry = WatchlistEntry::from_card(&fight_club(), added);

        entry.mark_watched(Impression::Liked, watched);
        assert!(entry.watched);
        assert_eq!(entry.impression, Some(Impression::Liked));
        assert_eq!(entry.watched_at, Some(watched));
        assert!(entry.is_consistent());

        entry.mark_unwatched();
        assert!(!entry.watched);
        assert_eq!(entry.impression, None);
        assert_eq!(entry.watched_at, None);
        assert_eq!(entry.added_at, added);
        assert!(entry.is_consistent());
    }

    #[test]
    fn test_release_year() {
        let added = Utc::now();
        let mut entry = WatchlistEntry::from_card(&fight_club(), added);
        assert_eq!(entry.release_year(), Some(1999));

        entry.release_date = Some("2011".to_string());
        assert_eq!(entry.release_year(), Some(2011));

        entry.release_date = Some("TBA".to_string());
        assert_eq!(entry.release_year(), None);

        entry.release_date = None;
        assert_eq!(entry.release_year(), None);
    }

    #[test]
    fn test_poster_url() {
        let entry = WatchlistEntry::from_card(&fight_club(), Utc::now());
        assert_eq!(
            entry.poster_url("https://image.tmdb.org/t/p/w300/").as_deref(),
            Some("https://image.tmdb.org/t/p/w300/poster.jpg")
        );
    }

    #[test]
    fn test_wire_field_names() {
        let entry = WatchlistEntry::from_card(&fight_club(), Utc::now());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["tmdb_id"], 550);
        assert_eq!(value["media_type"], "movie");
        assert_eq!(value["vote_average"], 8.4);
        assert!(value["impression"].is_null());
        assert!(value["watched_at"].is_null());
    }

    #[test]
    fn test_missing_title_reads_as_empty() {
        let value = serde_json::json!({
            "id": "tmdb_movie_2",
            "tmdb_id": 2,
            "media_type": "movie",
            "watched": false,
            "added_at": "2024-01-05T10:00:00.000Z"
        });
        let entry: WatchlistEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.title, "");
        assert_eq!(entry.id, "tmdb_movie_2");
    }
}
