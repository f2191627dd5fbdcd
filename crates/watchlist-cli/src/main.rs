use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{add, clear, config as config_cmd, list, watch};
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};
use watchlist_core::{ImpressionFilter, ListTab, WatchlistStore};
use watchlist_models::{Impression, MediaType};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Watchlist - keep track of what to watch and how you liked it")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a title to the to-watch list
    #[command(long_about = "Add a title to the to-watch list. Pass catalog fields as flags, or a catalog card as JSON with --card (use '-' for stdin). A title that is already listed is left untouched.")]
    Add(add::AddArgs),

    /// Remove a title from the list
    Remove {
        /// Watchlist id (tmdb_movie_42) or catalog id (42)
        target: String,

        /// Media type when a catalog id is given
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,
    },

    /// Mark a title as watched
    #[command(long_about = "Mark a title as watched with an impression. Without --impression you are asked how you liked it.")]
    Watch {
        /// Watchlist id (tmdb_movie_42) or catalog id (42)
        target: String,

        /// Media type when a catalog id is given
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,

        /// liked, ok or disliked
        #[arg(long, short)]
        impression: Option<Impression>,
    },

    /// Move a watched title back to the to-watch list
    Unwatch {
        /// Watchlist id (tmdb_movie_42) or catalog id (42)
        target: String,

        /// Media type when a catalog id is given
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,
    },

    /// List titles
    List {
        /// Which list to show
        #[arg(long, default_value = "to-watch", value_enum)]
        tab: TabArg,

        /// Impression filter for the watched list
        #[arg(long, default_value = "all", value_enum)]
        filter: FilterArg,
    },

    /// Show one title in detail
    Show {
        /// Watchlist id (tmdb_movie_42) or catalog id (42)
        target: String,

        /// Media type when a catalog id is given
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,
    },

    /// Show list counts
    Stats,

    /// Remove every title from the list
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and file locations
    Show,

    /// Write a default config file and create the data directories
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    ToWatch,
    Watched,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Liked,
    Ok,
    Disliked,
}

impl From<TabArg> for ListTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::ToWatch => ListTab::ToWatch,
            TabArg::Watched => ListTab::Watched,
        }
    }
}

impl From<FilterArg> for ImpressionFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => ImpressionFilter::All,
            FilterArg::Liked => ImpressionFilter::Only(Impression::Liked),
            FilterArg::Ok => ImpressionFilter::Only(Impression::Ok),
            FilterArg::Disliked => ImpressionFilter::Only(Impression::Disliked),
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = cli.config.clone().unwrap_or_else(|| path_manager.config_file());
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let log_file = config.log_file(&path_manager);
    logging::init_logging(&config.logging, log_file.as_deref(), cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    // Config commands must work even when the storage cannot be opened
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Show => config_cmd::show_config(&config, &config_file, &path_manager, &output),
            ConfigCommands::Init { force } => config_cmd::init_config(*force, &config_file, &path_manager, &output),
        };
    }

    let store = WatchlistStore::open(&config, &path_manager)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open watchlist storage: {}", e))?;

    match cli.command {
        Commands::Add(args) => add::run_add(args, &store, &output),
        Commands::Remove { target, media_type } => watch::run_remove(&target, media_type, &store, &output),
        Commands::Watch { target, media_type, impression } => {
            watch::run_watch(&target, media_type, impression, &store, &output)
        }
        Commands::Unwatch { target, media_type } => watch::run_unwatch(&target, media_type, &store, &output),
        Commands::List { tab, filter } => list::run_list(tab.into(), filter.into(), &store, &config, &output),
        Commands::Show { target, media_type } => list::run_show(&target, media_type, &store, &config, &output),
        Commands::Stats => list::run_stats(&store, &output),
        Commands::Clear { yes } => clear::run_clear(yes, &store, &output),
        Commands::Config { .. } => Ok(()),
    }
}
