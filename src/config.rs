//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/alloctree/alloctree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ALLOCTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::label::DEFAULT_CURRENCY;
use crate::domain::Presenter;

/// Unified configuration for alloctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory of the snapshot store (default: platform data dir)
    pub data_dir: PathBuf,
    /// Prefix for holding amounts
    pub currency_symbol: String,
    /// Store key of the live snapshot
    pub live_key: String,
    /// Store key of manual backups
    pub backup_key: String,
    /// Name given to newly inserted nodes
    pub new_node_name: String,
    /// Chart heading
    pub chart_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            live_key: "cache".to_string(),
            backup_key: "backup".to_string(),
            new_node_name: "New node".to_string(),
            chart_title: "Fund allocation".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "alloctree")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.alloctree"))
}

/// Get the XDG config directory for alloctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "alloctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("alloctree.toml"))
}

/// Expand environment variables and `~` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())
            .map_err(config_err)?
            .set_default("currency_symbol", defaults.currency_symbol)
            .map_err(config_err)?
            .set_default("live_key", defaults.live_key)
            .map_err(config_err)?
            .set_default("backup_key", defaults.backup_key)
            .map_err(config_err)?
            .set_default("new_node_name", defaults.new_node_name)
            .map_err(config_err)?
            .set_default("chart_title", defaults.chart_title)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(
                    File::from(global_path)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(Environment::with_prefix("ALLOCTREE"));

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        settings.expand_paths();
        Ok(settings)
    }

    /// Presenter using the configured currency.
    pub fn presenter(&self) -> Presenter {
        Presenter::new(&self.currency_symbol)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# alloctree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/alloctree/alloctree.toml
#   Explicit: --config <file>
#   Env:      ALLOCTREE_* environment variables (e.g. ALLOCTREE_CURRENCY_SYMBOL)

# Directory holding the snapshot store (one JSON file per key)
# data_dir = "~/.local/share/alloctree"

# Prefix for holding amounts
# currency_symbol = "¥"

# Store keys of the live snapshot and of manual backups
# live_key = "cache"
# backup_key = "backup"

# Name of freshly inserted nodes
# new_node_name = "New node"

# Chart heading
# chart_title = "Fund allocation"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
