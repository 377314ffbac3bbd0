//! Application configuration model.
//!
//! Contains the data directory layout, export settings and the default
//! WhatsApp destination.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local storage key holding the visitor collection.
pub const VISITORS_STORAGE_KEY: &str = "church-visitors";

/// Path configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Configuration for spreadsheet and CSV exports.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory where exported files are written.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Clear every visitor after a successful spreadsheet export.
    #[serde(default)]
    pub clear_after_spreadsheet: bool,
}

/// Configuration for outbound WhatsApp messages.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WhatsAppConfig {
    /// Destination used when none is given on the command line.
    #[serde(default)]
    pub default_number: Option<String>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,

    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,

    /// WhatsApp configuration.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".church-visitors")
    }

    /// Get the local storage database path.
    #[must_use]
    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir().join("local_storage.db")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// Get the exports directory path.
    #[must_use]
    pub fn exports_dir(&self) -> PathBuf {
        self.export
            .dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("exports"))
    }
}
