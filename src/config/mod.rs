//! Run configuration
//!
//! Built-in defaults, overlaid by an optional TOML file, then the
//! `INFLATION_WATCH_API_KEY` environment variable, then command-line flags
//! (applied by the binary).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::charts::DEFAULT_BAR_CHART_PATH;
use crate::error::InflationError;
use crate::history::DEFAULT_API_BASE_URL;
use crate::scraping::{DEFAULT_SCRAPE_BASE_URL, DEFAULT_USER_AGENT, VALUE_CELL_SELECTOR};

pub const API_KEY_ENV_VAR: &str = "INFLATION_WATCH_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const CONFIG_FILENAME: &str = "config.toml";

/// Which outputs a run produces. Console output is always printed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Console lines and table only
    Console,
    /// Console plus the latest-values bar chart
    #[default]
    BarChart,
    /// Bar chart plus historical trend charts (needs an API key)
    Historical,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Console => "console",
            OutputMode::BarChart => "bar-chart",
            OutputMode::Historical => "historical",
        }
    }

    pub fn draws_bar_chart(&self) -> bool {
        !matches!(self, OutputMode::Console)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub mode: OutputMode,
    pub timeout_secs: u64,
    pub bar_chart_path: PathBuf,
    /// Directory the trend charts are written into
    pub trend_dir: PathBuf,
    pub scrape_base_url: String,
    pub api_base_url: String,
    pub user_agent: String,
    pub selector: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            mode: OutputMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bar_chart_path: PathBuf::from(DEFAULT_BAR_CHART_PATH),
            trend_dir: PathBuf::from("."),
            scrape_base_url: DEFAULT_SCRAPE_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selector: VALUE_CELL_SELECTOR.to_string(),
        }
    }
}

/// On-disk shape; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    mode: Option<OutputMode>,
    timeout_secs: Option<u64>,
    bar_chart_path: Option<PathBuf>,
    trend_dir: Option<PathBuf>,
    scrape_base_url: Option<String>,
    api_base_url: Option<String>,
    user_agent: Option<String>,
    selector: Option<String>,
}

/// `<config_home>/inflation-watch/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .map(|dir| dir.join("inflation-watch").join(CONFIG_FILENAME))
}

impl AppConfig {
    /// Load configuration for a run.
    ///
    /// An explicit path must exist; the default path is used only when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_api_key(std::env::var(API_KEY_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(content).context("Failed to parse TOML")?;
        let defaults = Self::default();

        let config = Self {
            api_key: file.api_key.or(defaults.api_key),
            mode: file.mode.unwrap_or(defaults.mode),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
            bar_chart_path: file.bar_chart_path.unwrap_or(defaults.bar_chart_path),
            trend_dir: file.trend_dir.unwrap_or(defaults.trend_dir),
            scrape_base_url: file.scrape_base_url.unwrap_or(defaults.scrape_base_url),
            api_base_url: file.api_base_url.unwrap_or(defaults.api_base_url),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
            selector: file.selector.unwrap_or(defaults.selector),
        };
        config.validate()?;
        Ok(config)
    }

    /// A non-blank environment value replaces the file key
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|v| !v.trim().is_empty()) {
            debug!("Using API key from {}", API_KEY_ENV_VAR);
            self.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(
                InflationError::Config("timeout_secs must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    /// The API key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cpi_trend_path(&self) -> PathBuf {
        self.trend_dir.join("cpi_trend.svg")
    }

    pub fn ppi_wpi_trend_path(&self) -> PathBuf {
        self.trend_dir.join("ppi_wpi_trend.svg")
    }
}
