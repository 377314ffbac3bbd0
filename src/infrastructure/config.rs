//! Configuration file management.
//!
//! Handles loading and saving TOML configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# Church Visitors Configuration
# Auto-generated - edit as needed

[paths]
# Custom data directory (optional, defaults to ~/.church-visitors)
# data_dir = "/custom/path"

[export]
# Where spreadsheets and CSV files are written (defaults to <data_dir>/exports)
# dir = "/home/secretaria/Documentos"

# Clear the whole visitor list after a spreadsheet export.
# This cannot be undone.
clear_after_spreadsheet = false

[whatsapp]
# Number that receives the visitor list when none is given
# default_number = "(11) 99999-9999"
"#;

/// Load configuration for a data directory, or defaults if no file exists.
///
/// The returned configuration always points at `data_dir`.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config(data_dir: Option<&Path>) -> Result<AppConfig> {
    let data_dir = data_dir.map_or_else(AppConfig::default_data_dir, Path::to_path_buf);
    let config_path = data_dir.join("config.toml");

    let mut config = if config_path.exists() {
        load_config_from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    if config.paths.data_dir.is_none() {
        config.paths.data_dir = Some(data_dir);
    }

    Ok(config)
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Render configuration as TOML.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| AppError::Config {
        message: format!("Failed to serialize config: {e}"),
    })
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns the path of the configuration file.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(config: &AppConfig) -> Result<PathBuf> {
    let config_path = config.config_file_path();

    if !config_path.exists() {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create config directory", e))?;
        }

        fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| AppError::io("Failed to create default config", e))?;

        tracing::info!(path = %config_path.display(), "Created default configuration");
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(!config.export.clear_after_spreadsheet);
        assert!(config.paths.data_dir.is_none());
    }

    #[test]
    fn test_load_without_file_uses_data_dir() {
        let dir = tempdir().unwrap();
        let config = load_config(Some(dir.path())).unwrap();
        assert_eq!(config.data_dir(), dir.path());
        assert_eq!(config.exports_dir(), dir.path().join("exports"));
    }

    #[test]
    fn test_ensure_then_load() {
        let dir = tempdir().unwrap();
        let config = load_config(Some(dir.path())).unwrap();

        let path = ensure_config_exists(&config).unwrap();
        assert!(path.exists());

        fs::write(
            &path,
            "[export]\nclear_after_spreadsheet = true\n[whatsapp]\ndefault_number = \"11999998888\"\n",
        )
        .unwrap();

        let loaded = load_config(Some(dir.path())).unwrap();
        assert!(loaded.export.clear_after_spreadsheet);
        assert_eq!(
            loaded.whatsapp.default_number.as_deref(),
            Some("11999998888")
        );
    }

    #[test]
    fn test_render_roundtrip() {
        let config = AppConfig::default();
        let rendered = render_config(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(
            parsed.export.clear_after_spreadsheet,
            config.export.clear_after_spreadsheet
        );
    }
}
