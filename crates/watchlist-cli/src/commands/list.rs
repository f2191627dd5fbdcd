use super::{not_in_list, resolve_entry_id};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use serde_json::json;
use watchlist_config::Config;
use watchlist_core::view::actions_for;
use watchlist_core::{ImpressionFilter, JsonFileStorage, ListTab, WatchlistStore};
use watchlist_models::{Impression, MediaType, WatchlistEntry, WatchlistStats};

pub fn run_list(
    tab: ListTab,
    filter: ImpressionFilter,
    store: &WatchlistStore<JsonFileStorage>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let entries = store.browse(tab, filter);
    let stats = store.stats();

    output.json(&json!({
        "tab": tab,
        "filter": filter,
        "items": entries.iter().map(|e| entry_json(e, config)).collect::<Vec<_>>(),
    }));

    if entries.is_empty() {
        output.block("The list is empty");
        return Ok(());
    }

    output.block(render_tabs(tab, &stats));
    output.block(render_entries(&entries, tab).to_string());
    Ok(())
}

pub fn run_show(
    target: &str,
    media_type: Option<MediaType>,
    store: &WatchlistStore<JsonFileStorage>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry_id(target, media_type);
    let Some(entry) = store.find_by_id(&id) else {
        return Err(not_in_list(&id));
    };

    output.json(&entry_json(&entry, config));
    output.block(render_detail(&entry, config).to_string());
    Ok(())
}

pub fn run_stats(store: &WatchlistStore<JsonFileStorage>, output: &Output) -> Result<()> {
    let stats = store.stats();
    output.json(&json!(stats));

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Watchlist").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec![Cell::new("Total"), Cell::new(stats.total)]);
    table.add_row(vec![Cell::new("To watch"), Cell::new(stats.to_watch)]);
    table.add_row(vec![Cell::new("Watched"), Cell::new(stats.watched)]);
    for impression in Impression::ALL {
        table.add_row(vec![
            Cell::new(format!("  {} {}", impression.icon(), impression.label())),
            Cell::new(stats.count_for(impression)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    output.block(table.to_string());
    Ok(())
}

fn entry_json(entry: &WatchlistEntry, config: &Config) -> serde_json::Value {
    let mut value = json!(entry);
    if let Some(map) = value.as_object_mut() {
        map.insert("release_year".to_string(), json!(entry.release_year()));
        map.insert(
            "poster_url".to_string(),
            json!(entry.poster_url(&config.display.poster_base_url)),
        );
    }
    value
}

fn render_tabs(tab: ListTab, stats: &WatchlistStats) -> String {
    let (to_watch, watched) = match tab {
        ListTab::ToWatch => ("[To watch]", "Watched"),
        ListTab::Watched => ("To watch", "[Watched]"),
    };
    format!("{} {}   {} {}", to_watch, stats.to_watch, watched, stats.watched)
}

fn render_entries(entries: &[WatchlistEntry], tab: ListTab) -> Table {
    let when = match tab {
        ListTab::ToWatch => "Added",
        ListTab::Watched => "Watched",
    };

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Year", "Rating", when, ""]);
    for entry in entries {
        let at = match tab {
            ListTab::ToWatch => Some(entry.added_at),
            ListTab::Watched => entry.watched_at,
        };
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(&entry.title),
            Cell::new(entry.release_year().map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(entry.rating.map(|r| format!("{:.1}", r)).unwrap_or_default()),
            Cell::new(at.map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_default()),
            Cell::new(entry.impression.map(|i| i.icon()).unwrap_or("")),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn render_detail(entry: &WatchlistEntry, config: &Config) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(&entry.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(&entry.id),
    ]);

    if let Some(original) = &entry.original_title {
        table.add_row(vec![Cell::new("Original title"), Cell::new(original)]);
    }
    table.add_row(vec![Cell::new("Type"), Cell::new(entry.media_type)]);
    if let Some(year) = entry.release_year() {
        table.add_row(vec![Cell::new("Year"), Cell::new(year)]);
    }
    if let Some(rating) = entry.rating {
        table.add_row(vec![Cell::new("Rating"), Cell::new(format!("{:.1}", rating))]);
    }

    let status = match entry.impression {
        Some(impression) if entry.watched => {
            format!("Watched {} {}", impression.icon(), impression.label())
        }
        _ => "To watch".to_string(),
    };
    table.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    table.add_row(vec![Cell::new("Added"), Cell::new(entry.added_at.to_rfc3339())]);
    if let Some(watched_at) = entry.watched_at {
        table.add_row(vec![Cell::new("Watched at"), Cell::new(watched_at.to_rfc3339())]);
    }
    if let Some(url) = entry.poster_url(&config.display.poster_base_url) {
        table.add_row(vec![Cell::new("Poster"), Cell::new(url)]);
    }
    if let Some(overview) = &entry.overview {
        table.add_row(vec![Cell::new("Overview"), Cell::new(overview)]);
    }

    let actions: Vec<&str> = actions_for(entry).iter().map(|a| a.label()).collect();
    table.add_row(vec![Cell::new("Actions"), Cell::new(actions.join(", "))]);

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
