use super::prompts::prompt_yes_no;
use crate::output::Output;
use color_eyre::Result;
use watchlist_core::{JsonFileStorage, WatchlistStore};

pub fn run_clear(yes: bool, store: &WatchlistStore<JsonFileStorage>, output: &Output) -> Result<()> {
    let total = store.stats().total;
    if total == 0 {
        output.info("Watchlist is already empty");
        return Ok(());
    }

    if !yes {
        let prompt = format!("Remove all {} titles from the watchlist?", total);
        if !prompt_yes_no(&prompt, Some(false))? {
            output.info("Nothing was removed");
            return Ok(());
        }
    }

    let removed = store.clear();
    output.success(format!("Removed {} title(s) from the watchlist", removed));
    Ok(())
}
