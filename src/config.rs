//! Settings - YAML config file under the home directory plus environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::EndpointCatalog;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    DEFAULT_LOOKBACK_DAYS, DEFAULT_PATH_PREFIX, DEFAULT_TIMEOUT_MS, MAX_LOOKBACK_DAYS,
};

/// What to do with a response that arrives after a newer fetch was dispatched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Only the most recently dispatched request may update the display
    #[default]
    Latest,
    /// Every response is applied in arrival order
    LastResponseWins,
}

/// Runtime settings. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub path_prefix: String,
    /// Sent as a bearer token when present
    pub token: Option<String>,
    pub timeout_ms: u64,
    pub lookback_days: u32,
    pub stale_responses: StalePolicy,
    /// Replaces the builtin endpoint list
    pub catalog_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: String::from(DEFAULT_BASE_URL),
            path_prefix: String::from(DEFAULT_PATH_PREFIX),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            stale_responses: StalePolicy::default(),
            catalog_file: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: String::from(DEFAULT_LOG_LEVEL),
        }
    }
}

impl Settings {
    /// `~/.oura-explorer/config.yaml`
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load the config file and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::config_path())?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `OURA_*` overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("OURA_API_BASE_URL") {
            self.base_url = url;
        }
        if let Some(prefix) = lookup("OURA_PATH_PREFIX") {
            self.path_prefix = prefix;
        }
        if let Some(token) = lookup("OURA_PAT") {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(days) = lookup("OURA_LOOKBACK_DAYS") {
            self.lookback_days = days
                .trim()
                .parse()
                .with_context(|| format!("OURA_LOOKBACK_DAYS is not a day count: {}", days))?;
        }
        self.validate()
    }

    /// Reject values the date arithmetic cannot handle
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days > MAX_LOOKBACK_DAYS {
            bail!(
                "lookback_days {} is out of range (at most {})",
                self.lookback_days,
                MAX_LOOKBACK_DAYS
            );
        }
        Ok(())
    }

    /// The endpoint catalog these settings select
    pub fn catalog(&self) -> Result<EndpointCatalog> {
        match &self.catalog_file {
            Some(path) => EndpointCatalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display())),
            None => Ok(EndpointCatalog::builtin()),
        }
    }
}
