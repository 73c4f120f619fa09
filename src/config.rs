//! Configuration System
//!
//! Endpoint paths, session storage keys, navigation targets, poll cadences and chart
//! styling all live here and are handed to each component at construction.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend location and REST endpoint paths
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    /// Prepended to every endpoint path. Empty means same-origin (browser).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_register_path")]
    pub register: String,

    #[serde(default = "default_login_path")]
    pub login: String,

    #[serde(default = "default_logout_path")]
    pub logout: String,

    #[serde(default = "default_enumerate_path")]
    pub enumerate: String,

    /// Prefix for `/{domain}` metric endpoints
    #[serde(default = "default_stats_path")]
    pub stats: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_register_path() -> String {
    "/api/v1/auth/register".to_string()
}

fn default_login_path() -> String {
    "/api/v1/auth/login".to_string()
}

fn default_logout_path() -> String {
    "/api/v1/auth/logout".to_string()
}

fn default_enumerate_path() -> String {
    "/api/v1/services/enumerate".to_string()
}

fn default_stats_path() -> String {
    "/api/v1/stats".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            register: default_register_path(),
            login: default_login_path(),
            logout: default_logout_path(),
            enumerate: default_enumerate_path(),
            stats: default_stats_path(),
            request_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    /// Same-origin endpoints, as served to the browser front-end
    pub fn same_origin() -> Self {
        Self {
            base_url: String::new(),
            ..Self::default()
        }
    }

    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Endpoint path for a metrics domain (`memory`, `cpu`, ...)
    pub fn stats_path(&self, domain: &str) -> String {
        format!(
            "{}/{}",
            self.stats.trim_end_matches('/'),
            urlencoding::encode(domain)
        )
    }
}

/// Session storage keys and the CLI's session file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,

    #[serde(default = "default_user_key")]
    pub user_key: String,

    #[serde(default = "default_role_key")]
    pub role_key: String,

    /// Where the CLI keeps its session between invocations
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_token_key() -> String {
    "AVALANCHE_TOKEN".to_string()
}

fn default_user_key() -> String {
    "AVALANCHE_USER".to_string()
}

fn default_role_key() -> String {
    "AVALANCHE_ROLE".to_string()
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("avalanche").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./avalanche_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            user_key: default_user_key(),
            role_key: default_role_key(),
            file: default_session_file(),
        }
    }
}

/// Where the dashboard sends the user after auth events
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NavigationConfig {
    #[serde(default = "default_landing_path")]
    pub landing: String,

    #[serde(default = "default_login_page")]
    pub login: String,
}

fn default_landing_path() -> String {
    "/".to_string()
}

fn default_login_page() -> String {
    "/ac/login".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            landing: default_landing_path(),
            login: default_login_page(),
        }
    }
}

/// Poll cadences
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PollingConfig {
    #[serde(default = "default_connections_interval")]
    pub connections_interval_ms: u64,

    /// Used when a chart element carries no usable frequency attribute
    #[serde(default = "default_chart_frequency")]
    pub default_chart_frequency_ms: u64,
}

fn default_connections_interval() -> u64 {
    1000
}

fn default_chart_frequency() -> u64 {
    1000
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            connections_interval_ms: default_connections_interval(),
            default_chart_frequency_ms: default_chart_frequency(),
        }
    }
}

impl PollingConfig {
    pub fn connections_interval(&self) -> Duration {
        Duration::from_millis(self.connections_interval_ms)
    }

    pub fn default_chart_frequency(&self) -> Duration {
        Duration::from_millis(self.default_chart_frequency_ms)
    }
}

/// Shared chart styling
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChartsConfig {
    #[serde(default = "default_chart_height")]
    pub height: u32,

    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Palette for disk charts (two series)
    #[serde(default = "default_disk_palette")]
    pub disk_palette: Vec<String>,

    #[serde(default = "default_loading_text")]
    pub loading_text: String,
}

fn default_chart_height() -> u32 {
    240
}

fn default_palette() -> Vec<String> {
    // tabler purple, info, primary
    vec![
        "#ae3ec9".to_string(),
        "#4299e1".to_string(),
        "#206bc4".to_string(),
    ]
}

fn default_disk_palette() -> Vec<String> {
    vec!["#206bc4".to_string(), "#d63939".to_string()]
}

fn default_loading_text() -> String {
    "Loading graph".to_string()
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            height: default_chart_height(),
            palette: default_palette(),
            disk_palette: default_disk_palette(),
            loading_text: default_loading_text(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Configuration for the browser front-end: same-origin endpoints
    pub fn browser() -> Self {
        Self {
            api: ApiConfig::same_origin(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("avalanche").join("config.toml")),
            Some(PathBuf::from("/etc/avalanche/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("AVALANCHE_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("AVALANCHE_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.api.request_timeout_ms = Some(ms);
            }
        }

        if let Ok(file) = std::env::var("AVALANCHE_SESSION_FILE") {
            self.session.file = file;
        }

        if let Ok(level) = std::env::var("AVALANCHE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AVALANCHE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Avalanche Dashboard Configuration
#
# Environment variables override these settings:
# - AVALANCHE_API_URL
# - AVALANCHE_REQUEST_TIMEOUT_MS
# - AVALANCHE_SESSION_FILE
# - AVALANCHE_LOG_LEVEL
# - AVALANCHE_LOG_FORMAT

[api]
# Avalanche backend
base_url = "http://localhost:8080"

register = "/api/v1/auth/register"
login = "/api/v1/auth/login"
logout = "/api/v1/auth/logout"
enumerate = "/api/v1/services/enumerate"
stats = "/api/v1/stats"

# Optional request timeout (ms). Unset waits indefinitely.
# request_timeout_ms = 5000

[session]
token_key = "AVALANCHE_TOKEN"
user_key = "AVALANCHE_USER"
role_key = "AVALANCHE_ROLE"

# Session file used by the CLI
# file = "~/.local/share/avalanche/session.json"

[navigation]
landing = "/"
login = "/ac/login"

[polling]
# Pending connection list refresh (ms)
connections_interval_ms = 1000

# Chart refresh when an element has no frequency attribute (ms)
default_chart_frequency_ms = 1000

[charts]
height = 240
palette = ["#ae3ec9", "#4299e1", "#206bc4"]
disk_palette = ["#206bc4", "#d63939"]
loading_text = "Loading graph"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
