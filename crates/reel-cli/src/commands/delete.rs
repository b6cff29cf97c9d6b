use super::context::{client_error, report_refresh, AppContext};
use super::reviews::{review_table, FilterArgs};
use super::{prompts, ui};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reel_core::{InlineEditor, ReviewBoard};
use serde_json::json;

pub async fn run_delete(ctx: &AppContext, row: usize, filter: &FilterArgs, yes: bool, output: &Output) -> Result<()> {
    let mut store = ctx.load_reviews().await?;
    let mut board = ReviewBoard::new(filter.criteria(&ctx.config));
    let review = board
        .row(&store, row)
        .ok_or_else(|| eyre!("No review at row {} ({} rows match these filters)", row, board.view(&store).len()))?;

    output.block(review_table(std::slice::from_ref(&review), row));
    if !prompts::confirm("Delete this review?", false, yes)? {
        output.warn("Review not deleted.");
        return Ok(());
    }

    let mut editor = InlineEditor::new(ctx.gateway.clone());
    let spinner = ui::spinner("Deleting review...");
    let deleted = editor.delete(&mut store, &review.key()).await;
    spinner.finish_and_clear();
    let report = deleted.map_err(|e| client_error(editor.message(), e))?;

    if output.is_json() {
        output.json(&json!({
            "type": "success",
            "movie": review.title(),
            "target": report.target.as_ref().map(|t| t.to_string()),
            "remaining": store.len(),
        }));
    } else {
        output.success(format!("Deleted review of {}", review.title()));
    }
    report_refresh(&report.refresh, output);
    Ok(())
}
