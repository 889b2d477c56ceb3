use anyhow::{Context, Result};
use directories::ProjectDirs;
use linecore::Settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::try_exists;

const DEFAULT_TAB_SIZE: usize = 4;
const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: usize,
    /// Insert spaces instead of a tab character.
    pub use_spaces: bool,
    pub highlighting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub status_timeout_secs: u64,
    pub show_clock: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            use_spaces: false,
            highlighting: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_timeout_secs: DEFAULT_STATUS_TIMEOUT_SECS,
            show_clock: true,
        }
    }
}

impl Config {
    /// Load from the user's config location, creating it with defaults when missing.
    pub async fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path).await,
            None => {
                log::warn!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if !try_exists(config_path).await? {
            log::info!("Config file does not exist, creating default");
            return Ok(Self::write_default(config_path).await);
        }

        let content = tokio::fs::read_to_string(config_path)
            .await
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        if content.trim().is_empty() {
            log::warn!("Config file is empty, creating new one");
            return Ok(Self::write_default(config_path).await);
        }

        match serde_json::from_str::<Self>(&content) {
            Ok(mut config) => {
                config.validate();
                log::info!("Loaded config from: {}", config_path.display());
                Ok(config)
            }
            Err(json_err) => {
                log::error!("Failed to parse config file: {}", json_err);

                let backup_path = config_path.with_extension("bak");
                match tokio::fs::copy(config_path, &backup_path).await {
                    Ok(_) => log::info!("Backed up broken config to: {}", backup_path.display()),
                    Err(e) => log::warn!("Failed to backup broken config: {}", e),
                }

                Ok(Self::write_default(config_path).await)
            }
        }
    }

    /// Defaults, written to `config_path` if possible. A failed write is logged.
    async fn write_default(config_path: &Path) -> Self {
        let default_config = Self::default();
        if let Err(e) = default_config.save_to(config_path).await {
            log::warn!("Failed to write default config: {:#}", e);
        }
        default_config
    }

    pub async fn save_to(&self, config_path: &Path) -> Result<()> {
        let mut config_to_save = self.clone();
        config_to_save.validate();

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(&config_to_save)
            .context("Failed to serialize config")?;
        tokio::fs::write(config_path, content)
            .await
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        log::info!("Saved config to: {}", config_path.display());
        Ok(())
    }

    /// Replace out-of-range values with defaults. Returns whether anything changed.
    pub fn validate(&mut self) -> bool {
        let mut has_issues = false;

        if self.editor.tab_size == 0 || self.editor.tab_size > 16 {
            log::warn!("Invalid tab size: {}, using default", self.editor.tab_size);
            self.editor.tab_size = DEFAULT_TAB_SIZE;
            has_issues = true;
        }

        if self.ui.status_timeout_secs == 0 {
            log::warn!("Status timeout must be positive, using default");
            self.ui.status_timeout_secs = DEFAULT_STATUS_TIMEOUT_SECS;
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }
        has_issues
    }

    /// The immutable settings every buffer of the session shares.
    pub fn settings(&self) -> Settings {
        Settings::new(
            self.editor.tab_size,
            self.editor.use_spaces,
            self.editor.highlighting,
        )
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.ui.status_timeout_secs)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("KERF_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("KERF_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the log file goes. `KERF_LOG_FILE` overrides the data directory.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("KERF_LOG_FILE") {
            return Some(PathBuf::from(path));
        }

        project_dirs().map(|dirs| dirs.data_dir().join("kerf.log"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "kerf", "kerf")
}
