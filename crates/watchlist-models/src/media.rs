use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of title tracked in the watchlist.
///
/// Serialized lowercase (`"movie"`, `"tv"`) to match the catalog's own
/// `media_type` markers and the persisted blob.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid media type: {0} (expected 'movie' or 'tv')")]
pub struct MediaTypeParseError(pub String);

impl FromStr for MediaType {
    type Err = MediaTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            // "show" and "series" are common aliases on other catalogs
            "tv" | "show" | "series" => Ok(MediaType::Tv),
            _ => Err(MediaTypeParseError(s.to_string())),
        }
    }
}
