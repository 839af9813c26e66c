//! Configuration loading and management.

use std::path::{Path, PathBuf};

use collab_core::{LoaderOptions, RecordLoader};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// First field of the optional header row.
    pub header_token: String,

    /// End-date value meaning "still ongoing".
    pub open_end_token: String,

    /// Print JSON by default.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        let options = LoaderOptions::default();
        Self {
            header_token: options.header_token,
            open_end_token: options.open_end_token,
            json: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (COLLAB_*)
        figment = figment.merge(Env::prefixed("COLLAB_"));

        figment.extract()
    }

    /// Builds a record loader using the configured tokens.
    pub fn loader(&self) -> RecordLoader {
        RecordLoader::new(LoaderOptions {
            header_token: self.header_token.clone(),
            open_end_token: self.open_end_token.clone(),
        })
    }
}

/// Returns the platform-specific config directory for collab.
///
/// On Linux: `~/.config/collab`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("collab"))
}
