use super::context::{client_error, report_refresh, AppContext};
use super::{prompts, ui};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reel_core::{LoadState, MovieCatalog, ReviewComposer, ReviewStore};
use serde_json::json;

pub async fn run_post(ctx: &AppContext, title: &str, text: Option<String>, yes: bool, output: &Output) -> Result<()> {
    let mut catalog = MovieCatalog::new(ctx.gateway.clone());
    if let LoadState::Failed(message) = catalog.load().await {
        return Err(eyre!(message));
    }
    let movie = catalog
        .find(title)
        .cloned()
        .ok_or_else(|| eyre!("No movie titled \"{}\". Run 'reelreview movies' to see the list.", title))?;

    let mut composer = ReviewComposer::new(ctx.gateway.clone()).with_config(&ctx.config.composer);
    composer.open(movie)?;

    let text = match text {
        Some(text) => text,
        None => prompts::prompt_text(&format!("Your review of {}", title), None)?,
    };
    composer.update_text(text)?;

    let spinner = ui::spinner("Predicting sentiment...");
    let predicted = composer.predict().await;
    spinner.finish_and_clear();
    let sentiment = predicted.map_err(|e| client_error(composer.message(), e))?;

    if !output.is_json() {
        output.info(format!("Predicted sentiment: {}", sentiment));
    }
    if !prompts::confirm("Post this review?", true, yes)? {
        composer.close();
        output.warn("Review not posted.");
        return Ok(());
    }

    let mut store = ReviewStore::new(ctx.gateway.clone());
    let spinner = ui::spinner("Posting review...");
    let posted = composer.post(&mut store).await;
    spinner.finish_and_clear();
    let report = posted.map_err(|e| client_error(composer.message(), e))?;

    if output.is_json() {
        output.json(&json!({
            "type": "success",
            "message": composer.message(),
            "movie": title,
            "sentiment": sentiment,
            "ack": report.ack.message,
        }));
    } else {
        output.success(composer.message().unwrap_or("Review posted."));
    }
    report_refresh(&report.refresh, output);
    Ok(())
}
