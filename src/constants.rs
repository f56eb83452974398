//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend proxy the explorer talks to by default
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Route under which the proxy exposes the Oura collections
pub const DEFAULT_PATH_PREFIX: &str = "/oura_data";

/// Upstream API, for use with a personal access token and an empty prefix
pub const OURA_API_URL: &str = "https://api.ouraring.com/v2/usercollection";

/// Transport timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

/// Days between the default range start and today
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Upper bound accepted from the config file and environment
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".oura-explorer";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const DEFAULT_LOG_FILE: &str = "oura-explorer.log";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application name
pub const APP_NAME: &str = "Oura Explorer";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
