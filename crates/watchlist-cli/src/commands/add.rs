use crate::output::Output;
use clap::Args;
use color_eyre::Result;
use std::io::Read;
use std::path::PathBuf;
use watchlist_core::{JsonFileStorage, WatchlistStore};
use watchlist_models::{CatalogCard, MediaType};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Catalog (TMDB) id of the title
    #[arg(required_unless_present = "card", conflicts_with = "card")]
    pub id: Option<String>,

    /// Movie title
    #[arg(long, required_unless_present_any = ["name", "card"])]
    pub title: Option<String>,

    /// Series name (marks the title as tv unless --type is given)
    #[arg(long)]
    pub name: Option<String>,

    /// Media type: movie or tv
    #[arg(long = "type", value_name = "TYPE")]
    pub media_type: Option<MediaType>,

    #[arg(long)]
    pub original_title: Option<String>,

    /// Poster path relative to the image host, e.g. /abc.jpg
    #[arg(long)]
    pub poster: Option<String>,

    #[arg(long)]
    pub backdrop: Option<String>,

    /// Average user rating
    #[arg(long)]
    pub rating: Option<f64>,

    /// Release or first-air date (YYYY-MM-DD)
    #[arg(long)]
    pub release_date: Option<String>,

    #[arg(long)]
    pub overview: Option<String>,

    /// Read a catalog card as JSON from a file ('-' for stdin)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["title", "name"])]
    pub card: Option<PathBuf>,
}

pub fn run_add(args: AddArgs, store: &WatchlistStore<JsonFileStorage>, output: &Output) -> Result<()> {
    let card = build_card(args)?;
    let title = card.display_title();
    tracing::debug!("Adding {} ({})", card.watchlist_id(), title);

    if store.add(&card) {
        output.success(format!("Added to watchlist: {}", title));
    } else {
        output.warn(format!("Already in the watchlist: {}", title));
    }
    Ok(())
}

fn build_card(args: AddArgs) -> Result<CatalogCard> {
    if let Some(path) = args.card {
        return read_card(&path);
    }

    let id = args
        .id
        .ok_or_else(|| color_eyre::eyre::eyre!("A catalog id is required when --card is not used"))?;

    let mut card = CatalogCard::new(id);
    card.media_type = args.media_type;
    card.title = args.title;
    card.name = args.name;
    card.original_title = args.original_title;
    card.poster_path = args.poster;
    card.backdrop_path = args.backdrop;
    card.vote_average = args.rating;
    card.release_date = args.release_date;
    card.overview = args.overview;
    Ok(card)
}

fn read_card(path: &PathBuf) -> Result<CatalogCard> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read card from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read card from {}: {}", path.display(), e))?
    };

    serde_json::from_str(&content)
        .map_err(|e| color_eyre::eyre::eyre!("Invalid catalog card JSON: {}", e))
}
