use std::path::{Path, PathBuf};
use std::time::Duration;

use goenv_core::InstallerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL archives are downloaded from, e.g. a corporate mirror of
    /// `https://golang.org/dl`.
    #[serde(default)]
    pub go_dist_mirror: Option<String>,

    #[serde(default)]
    pub catalog_url: Option<String>,

    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            go_dist_mirror: None,
            catalog_url: None,
            http_timeout_secs: None,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn installer_config(&self) -> InstallerConfig {
        let mut config = InstallerConfig::default();
        if let Some(mirror) = &self.go_dist_mirror {
            config.download_base_url.clone_from(mirror);
        }
        if let Some(catalog_url) = &self.catalog_url {
            config.catalog_url.clone_from(catalog_url);
        }
        config.timeout = self.http_timeout_secs.map(Duration::from_secs);
        config
    }
}
