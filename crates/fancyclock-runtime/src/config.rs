use crate::controller::{ControllerOptions, DEFAULT_INTERVAL};
use crate::{Error, Result};
use fancyclock_types::{FormatStyle, LocaleProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. FANCYCLOCK_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.fancyclock/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("FANCYCLOCK_CONFIG")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("fancyclock").join(CONFIG_FILE_NAME));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".fancyclock").join(CONFIG_FILE_NAME));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub time_style: FormatStyle,
    pub date_style: FormatStyle,
    pub show_date: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_style: FormatStyle::Medium,
            date_style: FormatStyle::Full,
            show_date: true,
            pattern: None,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            locale: None,
        }
    }
}

impl DisplayConfig {
    /// Resolve into controller options. The locale falls back to the
    /// environment when the config leaves it unset.
    pub fn to_options(&self) -> Result<ControllerOptions> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidInterval(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        let locale = LocaleProfile::resolve(self.locale.as_deref())?;

        Ok(ControllerOptions {
            time_style: self.time_style,
            date_style: self.date_style,
            pattern: self.pattern.clone(),
            show_date: self.show_date,
            locale,
            interval: Duration::from_millis(self.interval_ms),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter level: error, warn, info, debug or trace
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Configured log file with a leading `~/` expanded.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().map(|path| match path.to_str() {
            Some(text) => expand_tilde(text),
            None => path.to_path_buf(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }
}
