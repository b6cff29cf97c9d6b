use super::context::AppContext;
use super::ui;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment, Table};
use reel_core::{catalog_stats, LoadState, MovieCatalog, ReviewStore};
use serde_json::json;

const OVERVIEW_WIDTH: usize = 60;

fn shorten(text: &str) -> String {
    if text.chars().count() <= OVERVIEW_WIDTH {
        return text.to_string();
    }
    let cut: String = text.chars().take(OVERVIEW_WIDTH - 1).collect();
    format!("{}…", cut.trim_end())
}

pub async fn run_movies(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut catalog = MovieCatalog::new(ctx.gateway.clone());
    let mut store = ReviewStore::new(ctx.gateway.clone());

    let spinner = ui::spinner("Loading movies...");
    let movies_state = catalog.load().await;
    let reviews_state = store.load().await;
    spinner.finish_and_clear();

    if let LoadState::Failed(message) = movies_state {
        return Err(eyre!(message));
    }
    // counts are extra; the list is still useful without them
    if let LoadState::Failed(message) = &reviews_state {
        output.warn(format!("Review counts unavailable: {}", message));
    }

    let rows = catalog_stats(store.reviews(), catalog.movies());

    if output.is_json() {
        let movies: Vec<_> = rows
            .iter()
            .map(|(movie, stats)| json!({ "movie": movie, "stats": stats }))
            .collect();
        output.json(&json!({ "movies": movies }));
        return Ok(());
    }

    if rows.is_empty() {
        output.info("No movies available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Reviews").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Positive").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Negative").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Overview").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for (movie, stats) in &rows {
        table.add_row(vec![
            Cell::new(&movie.title),
            Cell::new(stats.total).set_alignment(CellAlignment::Right),
            Cell::new(stats.positive).fg(comfy_table::Color::Green).set_alignment(CellAlignment::Right),
            Cell::new(stats.negative).fg(comfy_table::Color::Red).set_alignment(CellAlignment::Right),
            Cell::new(shorten(&movie.overview)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.block(table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_long_overview() {
        assert_eq!(shorten("short"), "short");
        let long = "word ".repeat(30);
        let short = shorten(&long);
        assert!(short.ends_with('…'));
        assert!(short.chars().count() <= OVERVIEW_WIDTH);
    }
}
