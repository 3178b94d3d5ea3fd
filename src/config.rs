//! Application configuration loaded from `stockpilot.toml`.
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/stockpilot"
//! log_dir = "/home/me/.local/share/stockpilot/logs"
//! log_filter = "stockpilot_lib=debug"
//! near_margin = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "stockpilot.toml";

pub const DEFAULT_NEAR_MARGIN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Directory holding the storage medium files.
    pub data_dir: PathBuf,
    /// Directory for `stockpilot.log`; defaults to `data_dir`.
    pub log_dir: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// How far above the critical threshold a product counts as low.
    pub near_margin: u32,
}

/// Platform data directory for StockPilot:
///   Linux    ~/.local/share/stockpilot
///   macOS    ~/Library/Application Support/stockpilot
///   Windows  %LOCALAPPDATA%\stockpilot
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_default().join("stockpilot")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_dir: None,
            log_filter: "info".to_string(),
            near_margin: DEFAULT_NEAR_MARGIN,
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Like [`Config::load`], but a missing file yields the defaults and any
    /// other failure is logged and replaced by the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn log_dir(&self) -> &Path {
        self.log_dir.as_deref().unwrap_or(&self.data_dir)
    }
}
