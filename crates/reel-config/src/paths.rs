use anyhow::Result;
use std::path::{Path, PathBuf};

/// Override for the base directory, mainly for containers and tests
pub const BASE_PATH_ENV: &str = "REELREVIEW_BASE_PATH";

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Ok(base) = std::env::var(BASE_PATH_ENV) {
            return Ok(Self::with_base(PathBuf::from(base)));
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelreview");

        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Log file used when file logging is asked for without `logging.file`
    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("reelreview.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".reelreview")))
    }
}
