use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::journal::types::NutritionGoals;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NutrilogConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub goals: NutritionGoals,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

/// Which on-disk representations a day-level write produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Structured aggregate only (`state.json`).
    Json,
    /// Per-day Markdown documents only.
    Markdown,
    /// Both, with the Markdown document preferred on load.
    Both,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Both => "both",
        }
    }

    pub fn writes_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn writes_document(&self) -> bool {
        matches!(self, Self::Markdown | Self::Both)
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "markdown" => Ok(Self::Markdown),
            "both" => Ok(Self::Both),
            _ => Err(format!("unknown storage mode: {s}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory the storage backend is rooted at. Not persisted into state.
    #[serde(skip_serializing)]
    pub data_dir: String,
    pub mode: StorageMode,
    /// Folder (relative to `data_dir`) holding day documents and backups.
    pub root: String,
    /// chrono format string for day document file names.
    pub file_pattern: String,
    pub include_summary: bool,
    pub backups_enabled: bool,
    pub max_backups: usize,
}

impl Default for NutrilogConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            goals: NutritionGoals::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_nutrilog_dir().to_string_lossy().into_owned(),
            mode: StorageMode::Both,
            root: "journal".into(),
            file_pattern: "%Y-%m-%d".into(),
            include_summary: true,
            backups_enabled: true,
            max_backups: 30,
        }
    }
}

impl StorageConfig {
    /// Path of the backup archive folder, relative to the backend root.
    pub fn backup_dir(&self) -> String {
        join_path(&self.root, "backups")
    }
}

/// Join two relative store paths with `/`, tolerating empty segments.
pub fn join_path(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

/// Returns `~/.nutrilog/`
pub fn default_nutrilog_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nutrilog")
}

/// Returns the default config file path: `~/.nutrilog/config.toml`
pub fn default_config_path() -> PathBuf {
    default_nutrilog_dir().join("config.toml")
}

impl NutrilogConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: NutrilogConfig = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            NutrilogConfig::default()
        };

        config.apply_env_overrides()?;
        config
            .goals
            .validate()
            .context("invalid [goals] section")?;
        Ok(config)
    }

    /// Apply environment variable overrides (NUTRILOG_DATA_DIR, NUTRILOG_STORAGE_MODE,
    /// NUTRILOG_LOG_LEVEL).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("NUTRILOG_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("NUTRILOG_STORAGE_MODE") {
            self.storage.mode = val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("invalid NUTRILOG_STORAGE_MODE")?;
        }
        if let Ok(val) = std::env::var("NUTRILOG_LOG_LEVEL") {
            self.server.log_level = val;
        }
        Ok(())
    }

    /// Resolve the data directory, expanding `~` if needed.
    pub fn resolved_data_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.data_dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
