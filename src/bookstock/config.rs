use crate::error::{BookstockError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PORT: u16 = 3000;

/// Configuration for bookstock, stored in config.json next to the binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookstockConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory the data.json document lives in
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory the front-end assets are served from
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Number of request worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_workers() -> usize {
    4
}

impl Default for BookstockConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
            workers: default_workers(),
        }
    }
}

impl BookstockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BookstockError::Storage)?;
        let config: BookstockConfig =
            serde_json::from_str(&content).map_err(BookstockError::Malformed)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BookstockError::Storage)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BookstockError::Malformed)?;
        fs::write(config_path, content).map_err(BookstockError::Storage)?;
        Ok(())
    }
}
