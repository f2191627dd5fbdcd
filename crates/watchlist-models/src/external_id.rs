use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MediaType;

/// Catalog identifier of a title.
///
/// TMDB ids are numeric, but hosts occasionally hand them over as strings,
/// so both forms are accepted and render identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ExternalId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Numeric(id) => write!(f, "{}", id),
            ExternalId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for ExternalId {
    fn from(id: u64) -> Self {
        ExternalId::Numeric(id)
    }
}

impl From<u32> for ExternalId {
    fn from(id: u32) -> Self {
        ExternalId::Numeric(id as u64)
    }
}

impl From<&str> for ExternalId {
    fn from(id: &str) -> Self {
        // Keep numeric strings numeric so "42" and 42 land on the same key.
        match id.parse::<u64>() {
            Ok(n) => ExternalId::Numeric(n),
            Err(_) => ExternalId::Text(id.to_string()),
        }
    }
}

impl From<String> for ExternalId {
    fn from(id: String) -> Self {
        ExternalId::from(id.as_str())
    }
}

/// Derive the watchlist key for a title: `tmdb_<media_type>_<external_id>`.
pub fn compute_id(external_id: &ExternalId, media_type: MediaType) -> String {
    format!("tmdb_{}_{}", media_type, external_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_id_format() {
        assert_eq!(compute_id(&ExternalId::from(42u64), MediaType::Movie), "tmdb_movie_42");
        assert_eq!(compute_id(&ExternalId::from(1399u64), MediaType::Tv), "tmdb_tv_1399");
    }

    #[test]
    fn test_compute_id_is_stable_across_id_forms() {
        let numeric = compute_id(&ExternalId::from(42u64), MediaType::Movie);
        let text = compute_id(&ExternalId::from("42"), MediaType::Movie);
        assert_eq!(numeric, text);
    }

    #[test]
    fn test_media_type_separates_ids() {
        let id = ExternalId::from(42u64);
        assert_ne!(compute_id(&id, MediaType::Movie), compute_id(&id, MediaType::Tv));
    }

    #[test]
    fn test_external_id_untagged_serde() {
        let numeric: ExternalId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, ExternalId::Numeric(42));
        let text: ExternalId = serde_json::from_str("\"tt0111161\"").unwrap();
        assert_eq!(text, ExternalId::Text("tt0111161".to_string()));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "42");
    }
}
