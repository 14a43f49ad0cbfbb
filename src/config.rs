//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$HEADERORDER_CONFIG` (environment variable)
//! 2. `~/.config/headerorder/config.toml` (Linux/macOS)
//!    `%APPDATA%\headerorder\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::header::{DisplayStyle, HeaderOrder};
use crate::render::legacy::DEFAULT_IGNORED_HEADERS;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "HEADERORDER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Header display settings.
    pub headers: HeadersConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Header display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadersConfig {
    /// Fields to show, in display order. Empty turns reordering off.
    pub order: HeaderOrder,
    /// Fields hidden by the legacy copier (`X-*` style prefixes allowed).
    pub ignored: Vec<String>,
    /// If non-empty, the legacy copier shows only these fields.
    pub displayed: Vec<String>,
    /// Default display style: "normal" or "full".
    pub style: DisplayStyle,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            order: HeaderOrder::default(),
            ignored: DEFAULT_IGNORED_HEADERS.iter().map(|s| s.to_string()).collect(),
            displayed: Vec::new(),
            style: DisplayStyle::Normal,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Config::default(),
    }
}

/// Load configuration from a specific file, falling back to defaults on error.
pub fn load_config_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "Loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read config file, using defaults"
            );
            Config::default()
        }
    }
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<PathBuf> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("headerorder").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("headerorder")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("headerorder.log")
}
