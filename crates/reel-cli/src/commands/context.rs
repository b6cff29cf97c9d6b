use super::ui;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reel_config::{Config, PathManager};
use reel_core::{ClientError, RefreshOutcome, ReviewStore};
use reel_gateway::{create_gateway, RemoteGateway};
use std::path::PathBuf;
use std::sync::Arc;

use crate::output::Output;

/// `--config` if given, otherwise the platform config location
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathManager::default().config_file())
}

/// The configured log file, falling back to the default location when file
/// logging is requested without one
pub fn log_file(configured: Option<PathBuf>, requested: bool) -> Option<PathBuf> {
    match configured {
        Some(path) => Some(path),
        None if requested => Some(PathManager::default().default_log_file()),
        None => None,
    }
}

/// Validated configuration plus the gateway built from it.
pub struct AppContext {
    pub config: Config,
    pub gateway: Arc<dyn RemoteGateway>,
}

impl AppContext {
    pub fn new(config_path: PathBuf, loaded: anyhow::Result<Config>) -> Result<Self> {
        let config = loaded
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_path.display(), e))?;

        let gateway = create_gateway(&config).map_err(|e| eyre!("Failed to set up the review service client: {}", e))?;
        tracing::debug!("Using review service at {}", config.server.base_url);

        Ok(Self { config, gateway })
    }

    /// Store with the review list fetched. A failed fetch is an error here
    /// since every caller needs the list to do anything.
    pub async fn load_reviews(&self) -> Result<ReviewStore> {
        let mut store = ReviewStore::new(self.gateway.clone());
        let spinner = ui::spinner("Loading reviews...");
        let result = store.refresh().await;
        spinner.finish_and_clear();
        result.map_err(|e| client_error(None, e))?;
        Ok(store)
    }
}

/// Turn a core error into a report headed by the user-facing status message
pub fn client_error(message: Option<&str>, err: ClientError) -> color_eyre::Report {
    let headline = message.map(str::to_string).unwrap_or_else(|| err.user_message());
    eyre!("{} ({})", headline, err)
}

pub fn report_refresh(refresh: &RefreshOutcome, output: &Output) {
    match refresh {
        RefreshOutcome::Applied { reviews } => tracing::debug!("Review list refreshed, {} reviews", reviews),
        RefreshOutcome::Stale => tracing::debug!("Refresh response was superseded"),
        RefreshOutcome::Failed(message) => {
            output.warn(format!("The change was saved but the review list could not be refreshed: {}", message))
        }
    }
}
