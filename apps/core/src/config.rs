use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hotkey::DEFAULT_SHORTCUT;
use crate::recent::DEFAULT_RECENT_CAPACITY;
use crate::settings::{validate_hotkey, validate_recent_capacity, validate_storage_prefix};

pub const DEFAULT_STORAGE_PREFIX: &str = "tprt-ss";
pub const DEFAULT_REST_NAMESPACE: &str = "tprt-site-switcher";
pub const DEFAULT_MENU_FLIP_THRESHOLD_PX: u32 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] json5::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("failed to encode config: {0}")]
    EncodeJson(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_prefix: String,
    pub recent_capacity: usize,
    pub shortcut: String,
    pub menu_flip_threshold_px: u32,
    pub rest_namespace: String,
    pub mac_shortcut_labels: bool,
    pub preferences_path: PathBuf,
    pub log_dir: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            shortcut: DEFAULT_SHORTCUT.to_string(),
            menu_flip_threshold_px: DEFAULT_MENU_FLIP_THRESHOLD_PX,
            rest_namespace: DEFAULT_REST_NAMESPACE.to_string(),
            mac_shortcut_labels: cfg!(target_os = "macos"),
            preferences_path: base.join("preferences.sqlite3"),
            log_dir: base.join("logs"),
            config_path: base.join("config.toml"),
        }
    }
}

impl Config {
    pub fn sites_route(&self) -> String {
        format!("/{}/v1/sites", self.rest_namespace)
    }
}

/// `SITESWITCH_HOME` wins; otherwise a fixed folder under the temp dir.
pub fn stable_app_data_dir() -> PathBuf {
    match std::env::var_os("SITESWITCH_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::temp_dir().join("siteswitch"),
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    validate_storage_prefix(&cfg.storage_prefix)?;
    validate_recent_capacity(cfg.recent_capacity)?;
    validate_hotkey(&cfg.shortcut)?;

    if cfg.rest_namespace.trim().is_empty() || cfg.rest_namespace.contains('/') {
        return Err("rest_namespace must be a single non-empty path segment".into());
    }

    if cfg.preferences_path.as_os_str().is_empty() {
        return Err("preferences_path is required".into());
    }

    if cfg.log_dir.as_os_str().is_empty() {
        return Err("log_dir is required".into());
    }

    Ok(())
}

/// Loads the config at `path` (or the default location). A missing file yields
/// defaults; `.json`/`.json5` files are parsed as JSON5, anything else as TOML.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    if !config_path.exists() {
        return Ok(Config {
            config_path,
            ..Config::default()
        });
    }

    let raw = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;

    let mut cfg: Config = if is_json_path(&config_path) {
        json5::from_str(&raw)?
    } else {
        toml::from_str(&raw)?
    };
    cfg.config_path = config_path;
    cfg.shortcut = validate_hotkey(&cfg.shortcut).map_err(ConfigError::Invalid)?;
    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

/// Writes TOML, or JSON when the config path has a JSON extension.
pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let encoded = if is_json_path(&cfg.config_path) {
        serde_json::to_string_pretty(cfg)?
    } else {
        toml::to_string_pretty(cfg)?
    };
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Write {
        path: cfg.config_path.clone(),
        source,
    })
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false)
}
