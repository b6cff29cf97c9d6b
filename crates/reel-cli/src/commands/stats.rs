use super::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_stats(ctx: &AppContext, title: &str, output: &Output) -> Result<()> {
    let store = ctx.load_reviews().await?;
    let stats = reel_core::stats(store.reviews(), title);

    if output.is_json() {
        output.json(&json!({
            "title": title,
            "total": stats.total,
            "positive": stats.positive,
            "negative": stats.negative,
            "unclassified": stats.unclassified(),
        }));
        return Ok(());
    }

    if stats.total == 0 {
        output.warn(format!("No reviews for \"{}\" yet.", title));
        return Ok(());
    }

    output.info(format!(
        "{}: {} reviews, {} positive, {} negative",
        title.bold(),
        stats.total,
        stats.positive.green(),
        stats.negative.red()
    ));
    if stats.unclassified() > 0 {
        output.warn(format!("{} reviews carry an unrecognized sentiment", stats.unclassified()));
    }
    Ok(())
}
