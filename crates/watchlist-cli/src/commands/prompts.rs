use color_eyre::Result;
use dialoguer::{Confirm, Select};
use watchlist_models::Impression;

/// Ask how the user liked a title
pub fn prompt_impression(title: &str) -> Result<Impression> {
    let items: Vec<String> = Impression::ALL
        .iter()
        .map(|imp| format!("{} {}", imp.icon(), imp.label()))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("How was {}?", title))
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;

    Ok(Impression::ALL[selection])
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}
