use super::prompts::prompt_impression;
use super::{not_in_list, resolve_entry_id};
use crate::output::Output;
use color_eyre::Result;
use watchlist_core::{JsonFileStorage, WatchlistStore};
use watchlist_models::{Impression, MediaType};

pub fn run_watch(
    target: &str,
    media_type: Option<MediaType>,
    impression: Option<Impression>,
    store: &WatchlistStore<JsonFileStorage>,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry_id(target, media_type);
    let Some(entry) = store.find_by_id(&id) else {
        return Err(not_in_list(&id));
    };

    let impression = match impression {
        Some(impression) => impression,
        None => prompt_impression(&entry.title)?,
    };

    if store.mark_watched(&id, impression) {
        output.success(format!("Marked as watched: {} {}", entry.title, impression.icon()));
        Ok(())
    } else {
        Err(not_in_list(&id))
    }
}

pub fn run_unwatch(
    target: &str,
    media_type: Option<MediaType>,
    store: &WatchlistStore<JsonFileStorage>,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry_id(target, media_type);
    if store.mark_unwatched(&id) {
        output.success(format!("Returned to the to-watch list: {}", id));
        Ok(())
    } else {
        Err(not_in_list(&id))
    }
}

pub fn run_remove(
    target: &str,
    media_type: Option<MediaType>,
    store: &WatchlistStore<JsonFileStorage>,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry_id(target, media_type);
    if store.remove(&id) {
        output.success(format!("Removed from the watchlist: {}", id));
        Ok(())
    } else {
        Err(not_in_list(&id))
    }
}
