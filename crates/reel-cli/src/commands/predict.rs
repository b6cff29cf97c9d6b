use super::context::{client_error, AppContext};
use super::ui;
use crate::output::Output;
use color_eyre::Result;
use reel_core::ClientError;
use reel_gateway::RemoteGateway;
use serde_json::json;

pub async fn run_predict(ctx: &AppContext, text: &str, output: &Output) -> Result<()> {
    let spinner = ui::spinner("Predicting sentiment...");
    let result = ctx.gateway.predict(text).await;
    spinner.finish_and_clear();

    let sentiment = result.map_err(|e| client_error(Some("Prediction failed."), ClientError::from(e)))?;

    if output.is_json() {
        output.json(&json!({ "review": text, "sentiment": sentiment }));
    } else {
        output.info(format!("Predicted sentiment: {}", sentiment));
    }
    Ok(())
}
