use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use serde_json::json;
use std::path::Path;
use watchlist_config::{Config, PathManager};

pub fn show_config(config: &Config, config_file: &Path, paths: &PathManager, output: &Output) -> Result<()> {
    let storage_file = config.storage_file(paths);
    let log_file = config.log_file(paths);

    output.json(&json!({
        "config_file": config_file,
        "config_file_exists": config_file.exists(),
        "storage": {
            "file": storage_file,
            "key": config.storage.key,
        },
        "logging": {
            "level": config.logging.level,
            "json": config.logging.json,
            "file": log_file,
        },
        "display": {
            "poster_base_url": config.display.poster_base_url,
        },
    }));

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let config_source = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} (not created, using defaults)", config_file.display())
    };
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_source)]);
    table.add_row(vec![Cell::new("Storage file"), Cell::new(storage_file.display())]);
    table.add_row(vec![Cell::new("Storage key"), Cell::new(&config.storage.key)]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("JSON logs"), Cell::new(config.logging.json)]);
    table.add_row(vec![
        Cell::new("Log file"),
        Cell::new(
            log_file
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    table.add_row(vec![Cell::new("Poster base URL"), Cell::new(&config.display.poster_base_url)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    output.block(table.to_string());
    Ok(())
}

/// Write a default config file and create the data and log directories.
pub fn init_config(force: bool, config_file: &Path, paths: &PathManager, output: &Output) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;

    if config_file.exists() && !force {
        return Err(color_eyre::eyre::eyre!(
            "Config file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    Config::default()
        .save_to_file(&config_file.to_path_buf())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}
