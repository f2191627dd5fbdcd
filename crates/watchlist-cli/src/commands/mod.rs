pub mod add;
pub mod clear;
pub mod config;
pub mod list;
pub mod prompts;
pub mod watch;

use watchlist_models::{compute_id, ExternalId, MediaType};

/// Accept either a full watchlist id (`tmdb_tv_1399`) or a bare catalog id,
/// which is combined with `media_type` (movie when omitted).
pub fn resolve_entry_id(target: &str, media_type: Option<MediaType>) -> String {
    let target = target.trim();
    if target.starts_with("tmdb_") {
        return target.to_string();
    }
    compute_id(&ExternalId::from(target), media_type.unwrap_or(MediaType::Movie))
}

pub fn not_in_list(id: &str) -> color_eyre::Report {
    color_eyre::eyre::eyre!("Not in the watchlist: {}", id)
}
