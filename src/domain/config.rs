use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Configuration for a tour guide data directory.
///
/// Read from `config.toml` in the root directory. Every field has a default,
/// so an empty or missing file yields [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory, relative to the root, that holds the persisted stores.
    pub data_dir: PathBuf,

    /// Optional JSON asset, relative to the root, to load spots from.
    ///
    /// When unset, or when the file does not exist, the built-in seed spots
    /// are used instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spots_asset: Option<PathBuf>,

    /// Artificial delay applied before spots are returned, in milliseconds.
    pub fetch_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".tour-guide"),
            spots_asset: None,
            fetch_latency_ms: default_fetch_latency_ms(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `config.toml` from `root`, falling back to the defaults if it is
    /// missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join("config.toml");
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The simulated fetch latency.
    #[must_use]
    pub const fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

const fn default_fetch_latency_ms() -> u64 {
    150
}
