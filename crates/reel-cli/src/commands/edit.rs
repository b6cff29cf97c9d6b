use super::context::{client_error, report_refresh, AppContext};
use super::reviews::{review_table, FilterArgs};
use super::{prompts, ui};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reel_core::{InlineEditor, ReviewBoard};
use serde_json::json;

pub async fn run_edit(
    ctx: &AppContext,
    row: usize,
    filter: &FilterArgs,
    text: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut store = ctx.load_reviews().await?;
    let mut board = ReviewBoard::new(filter.criteria(&ctx.config));
    let review = board
        .row(&store, row)
        .ok_or_else(|| eyre!("No review at row {} ({} rows match these filters)", row, board.view(&store).len()))?;

    let mut editor = InlineEditor::new(ctx.gateway.clone());
    editor
        .begin_edit(&store, review.key(), review.review.clone())
        .map_err(|e| client_error(editor.message(), e))?;

    let text = match text {
        Some(text) => text,
        None => {
            output.block(review_table(std::slice::from_ref(&review), row));
            prompts::prompt_text("New text", Some(&review.review))?
        }
    };
    if text == review.review {
        editor.cancel()?;
        output.info("Text unchanged, nothing to save.");
        return Ok(());
    }
    editor.update_draft(text)?;

    let spinner = ui::spinner("Saving review...");
    let committed = editor.commit(&mut store).await;
    spinner.finish_and_clear();
    let report = committed.map_err(|e| client_error(editor.message(), e))?;

    let target = report.target.as_ref().map(|t| t.to_string()).unwrap_or_default();
    if output.is_json() {
        output.json(&json!({
            "type": "success",
            "movie": review.title(),
            "target": target,
            "ack": report.ack.message,
        }));
    } else {
        output.success(format!("Updated review of {}", review.title()));
    }
    report_refresh(&report.refresh, output);
    Ok(())
}
