use super::context::AppContext;
use crate::output::Output;
use clap::Args;
use color_eyre::Result;
use comfy_table::{Cell, Color, Table};
use reel_config::Config;
use reel_core::ReviewBoard;
use reel_models::{FilterCriteria, MovieFilter, Review, Sentiment, SentimentFilter, SortOrder};
use serde_json::json;

/// Filter and sort flags shared by the commands that address review rows.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Only reviews with this sentiment: all, positive or negative
    #[arg(long, default_value = "all")]
    pub sentiment: SentimentFilter,

    /// Only reviews of this movie (exact title)
    #[arg(long)]
    pub movie: Option<String>,

    /// latest or oldest first [default: reviews.default_sort from config]
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl FilterArgs {
    pub fn criteria(&self, config: &Config) -> FilterCriteria {
        FilterCriteria::new(
            self.sentiment.clone(),
            MovieFilter::from_option(self.movie.clone()),
            self.sort.unwrap_or(config.reviews.default_sort),
        )
    }
}

fn sentiment_cell(sentiment: &Sentiment) -> Cell {
    let cell = Cell::new(sentiment.as_str());
    match sentiment {
        Sentiment::Positive => cell.fg(Color::Green),
        Sentiment::Negative => cell.fg(Color::Red),
        Sentiment::Other(_) => cell.fg(Color::Yellow),
    }
}

/// Numbered table of reviews; numbering starts at `first_row`
pub fn review_table(rows: &[Review], first_row: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Movie").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Review").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Sentiment").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Posted").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for (offset, review) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(first_row + offset),
            Cell::new(review.title()),
            Cell::new(&review.review),
            sentiment_cell(&review.sentiment),
            Cell::new(review.timestamp.to_string()),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub async fn run_reviews(ctx: &AppContext, filter: &FilterArgs, output: &Output) -> Result<()> {
    let store = ctx.load_reviews().await?;
    let mut board = ReviewBoard::new(filter.criteria(&ctx.config));
    let options = board.movie_options(&store);
    let criteria = board.criteria().clone();
    let rows = board.view(&store);
    tracing::debug!("{} of {} reviews match", rows.len(), store.len());

    if output.is_json() {
        output.json(&json!({
            "criteria": {
                "sentiment": criteria.sentiment.to_string(),
                "movie": criteria.movie.to_string(),
                "sort": criteria.sort,
            },
            "movie_options": options,
            "total": store.len(),
            "reviews": rows,
        }));
        return Ok(());
    }

    if rows.is_empty() {
        output.info(format!("No reviews match ({} posted in total).", store.len()));
    } else {
        output.block(review_table(rows, 1));
        output.info(format!("{} of {} reviews", rows.len(), store.len()));
    }
    output.info(format!("Movies: {}", options.join(", ")));
    Ok(())
}
