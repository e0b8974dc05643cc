//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use reelcheck_gatekeeper::IngestConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input file locations
    #[serde(default)]
    pub inputs: Inputs,

    /// Target database
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Cleaned export
    #[serde(default)]
    pub export: ExportSettings,

    /// Validation settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Movie file
    #[serde(default = "default_movies")]
    pub movies: PathBuf,

    /// User file
    #[serde(default = "default_users")]
    pub users: PathBuf,

    /// Rating file
    #[serde(default = "default_ratings")]
    pub ratings: PathBuf,

    /// Postal code reference file (JSON)
    #[serde(default = "default_caps")]
    pub caps: PathBuf,
}

/// Database settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file
    #[serde(default = "default_database")]
    pub path: PathBuf,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Cleaned movie file
    #[serde(default = "default_export")]
    pub path: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (counts only) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".reelcheck").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from file or create default.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            movies: default_movies(),
            users: default_users(),
            ratings: default_ratings(),
            caps: default_caps(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            path: default_export(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            log_filter: default_log_filter(),
        }
    }
}

fn default_movies() -> PathBuf {
    PathBuf::from("data/movies.csv")
}

fn default_users() -> PathBuf {
    PathBuf::from("data/users.csv")
}

fn default_ratings() -> PathBuf {
    PathBuf::from("data/ratings.csv")
}

fn default_caps() -> PathBuf {
    PathBuf::from("data/caps.json")
}

fn default_database() -> PathBuf {
    PathBuf::from("reelcheck.db")
}

fn default_export() -> PathBuf {
    PathBuf::from("movies_clean.csv")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_log_filter() -> String {
    "info".to_string()
}
