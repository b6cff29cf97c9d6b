pub mod config;
pub mod paths;

pub use config::{ComposerConfig, Config, LoggingConfig, ReviewsConfig, ServerConfig, SERVER_URL_ENV};
pub use paths::PathManager;
