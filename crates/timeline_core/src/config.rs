//! Application configuration: load, save, and sanitize.
//!
//! # Invariants
//! - Loading never fails; broken or missing files fall back to defaults.
//! - A missing file is created with defaults; a broken one is left alone.

use crate::export::{ExportOptions, DEFAULT_PADDING};
use crate::logging::default_log_level;
use crate::render::layout::Rgba;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "timeline";
const CONFIG_FILE_NAME: &str = "timeline.json";
const DB_FILE_NAME: &str = "timeline.sqlite3";
const MAX_EXPORT_PADDING: u32 = 512;
const DEFAULT_BACKGROUND: &str = "#ffffff";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io failed: {err}"),
            Self::Serialize(err) => write!(f, "config serialization failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite event store file.
    pub db_path: PathBuf,
    /// Directory for rolling log files. Must be absolute.
    pub log_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// List newest-created events first inside each group.
    pub newest_first: bool,
    /// Blank border around exported images, in pixels.
    pub export_padding: u32,
    /// Export background as `#rrggbb`.
    pub export_background: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_dir: data_dir.join("logs"),
            log_level: default_log_level().to_string(),
            newest_first: false,
            export_padding: DEFAULT_PADDING,
            export_background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl AppConfig {
    /// Default config file location under the platform config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any read or parse error.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(err) = config.save(path) {
                warn!(
                    "event=config_create module=config status=error path={} error={err}",
                    path.display()
                );
            }
            return config;
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|contents| {
                serde_json::from_str::<AppConfig>(&contents).map_err(ConfigError::from)
            });
        let mut config = match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "event=config_load module=config status=error path={} error={err}",
                    path.display()
                );
                Self::default()
            }
        };
        config.sanitize();
        config
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamps out-of-range values and repairs malformed ones.
    pub fn sanitize(&mut self) {
        self.export_padding = self.export_padding.min(MAX_EXPORT_PADDING);
        if parse_hex_color(&self.export_background).is_none() {
            warn!(
                "event=config_sanitize module=config status=repaired field=export_background value={}",
                self.export_background
            );
            self.export_background = DEFAULT_BACKGROUND.to_string();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level().to_string();
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            padding: self.export_padding,
            background: parse_hex_color(&self.export_background)
                .unwrap_or(ExportOptions::default().background),
        }
    }
}

/// Parses `#rrggbb` into an opaque color.
pub fn parse_hex_color(value: &str) -> Option<Rgba> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, 0xff])
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{parse_hex_color, AppConfig};

    #[test]
    fn load_or_create_writes_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("timeline.json");

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        std::fs::write(&path, r#"{ "newest_first": true, "export_padding": 9000 }"#).unwrap();

        let config = AppConfig::load_or_create(&path);
        assert!(config.newest_first);
        assert_eq!(config.export_padding, 512);
        assert_eq!(config.export_background, "#ffffff");
    }

    #[test]
    fn broken_file_falls_back_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn sanitize_repairs_background_color() {
        let mut config = AppConfig {
            export_background: "blue".to_string(),
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.export_background, "#ffffff");
        assert_eq!(config.export_options().background, [0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn parse_hex_color_accepts_only_rrggbb() {
        assert_eq!(parse_hex_color("#2563eb"), Some([0x25, 0x63, 0xeb, 0xff]));
        assert_eq!(parse_hex_color("2563eb"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
