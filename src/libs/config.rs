//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing file or section
//! falls back to defaults, so the client works against a local development
//! server without any setup.
//!
//! ## Sections
//!
//! - **server**: base URL of the task service (`http://127.0.0.1:8000/drfapi` by default)
//! - **sync**: synchronization behaviour, currently whether emptying the trash
//!   also deletes the tasks on the server
//!
//! The `TASKSYNC_API_URL` environment variable (also read from a `.env`
//! file) overrides the configured server URL.
//!
//! ```rust,no_run
//! use tasksync::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! println!("Task server: {}", config.server().api_url);
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding [`ServerConfig::api_url`].
pub const API_URL_ENV: &str = "TASKSYNC_API_URL";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/drfapi";

/// A section offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Connection settings of the task service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL; task endpoints are `{api_url}/tasks/` and `{api_url}/tasks/{id}/`.
    pub api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Synchronization behaviour.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SyncConfig {
    /// When set, emptying the trash also issues a `DELETE` for every purged
    /// task. Otherwise the purge only affects the local list and the tasks
    /// stay on the server flagged as removed.
    #[serde(default)]
    pub purge_remote: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Effective server settings: the configured section or defaults, with
    /// the `TASKSYNC_API_URL` override applied.
    pub fn server(&self) -> ServerConfig {
        let mut server = self.server.clone().unwrap_or_default();
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                server.api_url = url.trim().to_string();
            }
        }
        server
    }

    pub fn sync(&self) -> SyncConfig {
        self.sync.clone().unwrap_or_default()
    }

    /// Runs the interactive setup, starting from the current configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: Message::ConfigModuleServer.to_string(),
            },
            ConfigModule {
                key: "sync".to_string(),
                name: Message::ConfigModuleSync.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                    });
                }
                "sync" => {
                    let default = config.sync.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleSync);
                    config.sync = Some(SyncConfig {
                        purge_remote: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPurgeRemote.to_string())
                            .default(default.purge_remote)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
