use serde::{Deserialize, Serialize};

use crate::{compute_id, ExternalId, MediaType};

/// A title as the host's catalog describes it.
///
/// Movies carry `title`/`original_title`/`release_date`; series carry
/// `name`/`original_name`/`first_air_date` instead. Only `id` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogCard {
    pub id: ExternalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

/// Treat empty strings the same as missing fields when falling back.
fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.is_empty())
}

impl CatalogCard {
    /// Card with only an id; everything else is filled in by the caller.
    pub fn new(id: impl Into<ExternalId>) -> Self {
        Self {
            id: id.into(),
            media_type: None,
            title: None,
            name: None,
            original_title: None,
            original_name: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            release_date: None,
            first_air_date: None,
            overview: None,
        }
    }

    pub fn movie(id: impl Into<ExternalId>, title: impl Into<String>) -> Self {
        let mut card = Self::new(id);
        card.media_type = Some(MediaType::Movie);
        card.title = Some(title.into());
        card
    }

    pub fn series(id: impl Into<ExternalId>, name: impl Into<String>) -> Self {
        let mut card = Self::new(id);
        card.media_type = Some(MediaType::Tv);
        card.name = Some(name.into());
        card
    }

    /// Explicit `media_type` wins; otherwise a series `name` marks it as tv.
    pub fn resolved_media_type(&self) -> MediaType {
        match self.media_type {
            Some(media_type) => media_type,
            None if non_empty(&self.name).is_some() => MediaType::Tv,
            None => MediaType::Movie,
        }
    }

    pub fn watchlist_id(&self) -> String {
        compute_id(&self.id, self.resolved_media_type())
    }

    pub fn display_title(&self) -> String {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn display_original_title(&self) -> Option<String> {
        non_empty(&self.original_title)
            .or_else(|| non_empty(&self.original_name))
            .cloned()
    }

    pub fn effective_release_date(&self) -> Option<String> {
        non_empty(&self.release_date)
            .or_else(|| non_empty(&self.first_air_date))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_inferred_from_name() {
        let mut card = CatalogCard::new(1399u64);
        card.name = Some("Game of Thrones".to_string());
        assert_eq!(card.resolved_media_type(), MediaType::Tv);
        assert_eq!(card.watchlist_id(), "tmdb_tv_1399");
    }

    #[test]
    fn test_media_type_defaults_to_movie() {
        let mut card = CatalogCard::new(42u64);
        card.title = Some("X".to_string());
        assert_eq!(card.resolved_media_type(), MediaType::Movie);

        // An empty name is not a series marker
        card.name = Some(String::new());
        assert_eq!(card.resolved_media_type(), MediaType::Movie);
    }

    #[test]
    fn test_explicit_media_type_wins_over_name() {
        let mut card = CatalogCard::series(7u64, "Some Show");
        card.media_type = Some(MediaType::Movie);
        assert_eq!(card.resolved_media_type(), MediaType::Movie);
    }

    #[test]
    fn test_field_fallbacks() {
        let mut card = CatalogCard::new(1u64);
        card.name = Some("Localized".to_string());
        card.original_name = Some("Original".to_string());
        card.first_air_date = Some("2011-04-17".to_string());

        assert_eq!(card.display_title(), "Localized");
        assert_eq!(card.display_original_title().as_deref(), Some("Original"));
        assert_eq!(card.effective_release_date().as_deref(), Some("2011-04-17"));

        card.title = Some("Preferred".to_string());
        card.release_date = Some("2012-01-01".to_string());
        assert_eq!(card.display_title(), "Preferred");
        assert_eq!(card.effective_release_date().as_deref(), Some("2012-01-01"));
    }

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "vote_average": 8.4,
            "release_date": "1999-10-15",
            "popularity": 61.4
        }"#;
        let card: CatalogCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, ExternalId::Numeric(550));
        assert_eq!(card.resolved_media_type(), MediaType::Movie);
        assert_eq!(card.vote_average, Some(8.4));
    }
}
