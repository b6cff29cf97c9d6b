use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reel_config::{Config, SERVER_URL_ENV};
use std::path::Path;

pub fn run_config(cmd: crate::ConfigCommands, config_path: &Path, loaded: anyhow::Result<Config>, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(config_path, loaded, output),
        crate::ConfigCommands::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config_path: &Path, loaded: anyhow::Result<Config>, output: &Output) -> Result<()> {
    let config = loaded.map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    let problem = config.validate().err();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let source = if config_path.exists() {
                config_path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", config_path.display())
            };

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(source)]);
            table.add_row(vec![Cell::new("server.base_url"), Cell::new(&config.server.base_url)]);
            table.add_row(vec![Cell::new("server.timeout_seconds"), Cell::new(config.server.timeout_seconds)]);
            table.add_row(vec![
                Cell::new("reviews.default_sort"),
                Cell::new(format!("{:?}", config.reviews.default_sort)),
            ]);
            table.add_row(vec![
                Cell::new("composer.invalidate_prediction_on_edit"),
                Cell::new(config.composer.invalidate_prediction_on_edit),
            ]);
            table.add_row(vec![Cell::new("logging.level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![
                Cell::new("logging.file"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{}", table);

            if std::env::var(SERVER_URL_ENV).is_ok() {
                output.info(format!("server.base_url is overridden by {}", SERVER_URL_ENV));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&config).map_err(|e| eyre!("Failed to serialize config: {}", e))?;
            output.json(&serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": config_path.exists(),
                "config": value,
                "valid": problem.is_none(),
            }));
        }
    }

    if let Some(problem) = problem {
        output.warn(format!("Configuration is not usable: {}", problem));
    }
    Ok(())
}

fn init_config(config_path: &Path, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        output.warn(format!("Configuration already exists at {}", config_path.display()));
        output.info("Use --force to overwrite it with the defaults.");
        return Ok(());
    }

    Config::default()
        .save_to_file(config_path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_path.display(), e))?;
    tracing::info!("Wrote default configuration to {}", config_path.display());
    output.success(format!("Configuration written to {}", config_path.display()));
    Ok(())
}
