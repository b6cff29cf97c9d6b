use super::ui;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input};

/// Read review text, pre-filled with `initial` when editing
pub fn prompt_text(prompt: &str, initial: Option<&str>) -> Result<String> {
    if !ui::is_interactive() {
        return Err(eyre!("No review text given. Pass --text when not running in a terminal."));
    }

    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Ask yes/no. `assume_yes` skips the question.
pub fn confirm(prompt: &str, default: bool, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !ui::is_interactive() {
        return Err(eyre!("Confirmation needed. Pass --yes when not running in a terminal."));
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}
