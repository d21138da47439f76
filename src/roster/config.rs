//! # Configuration
//!
//! Stored as `config.json` in the roster config directory (see `main.rs` for
//! how that directory is resolved). A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `origin` | `default` | Storage scope; each origin has its own theme and users |
//! | `storage_file` | `storage.json` | File name of the per-origin storage |

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ORIGIN: &str = "default";
const DEFAULT_STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_storage_file")]
    pub storage_file: String,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_storage_file() -> String {
    DEFAULT_STORAGE_FILE.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            storage_file: default_storage_file(),
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RosterError::Io)?;
        let config: RosterConfig =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RosterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RosterError::Serialization)?;
        fs::write(config_path, content).map_err(RosterError::Io)?;
        Ok(())
    }

    /// Origins become directory names, so they must be a single plain path segment.
    pub fn set_origin(&mut self, origin: &str) -> Result<()> {
        let origin = origin.trim();
        let valid = !origin.is_empty()
            && origin != "."
            && origin != ".."
            && !origin.contains(['/', '\\']);
        if !valid {
            return Err(RosterError::Api(format!("Invalid origin: '{}'", origin)));
        }
        self.origin = origin.to_string();
        Ok(())
    }

    /// `<data_dir>/<origin>/<storage_file>`
    pub fn storage_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.origin).join(&self.storage_file)
    }
}
