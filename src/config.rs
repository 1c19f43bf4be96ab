//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::ui::Locale;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Evaluation backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extra headers sent with every request, on top of the JSON content type
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            headers: BTreeMap::new(),
        }
    }
}

impl ApiConfig {
    /// Client configuration for these settings
    pub fn client_config(&self) -> ClientConfig {
        self.headers
            .iter()
            .fold(ClientConfig::new(&self.base_url), |config, (k, v)| {
                config.header(k, v)
            })
    }
}

/// Display settings for the CLI output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    /// Locale used to format entry times
    #[serde(default)]
    pub locale: Locale,
}

/// Static SPA host settings
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5173
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("./digital-economy-ui/dist")
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl HostConfig {
    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("digital-economy").join("config.toml")),
            Some(PathBuf::from("/etc/digital-economy/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// First candidate that exists and parses, else defaults with env overrides
    pub fn load_first(config_paths: &[PathBuf]) -> Self {
        for path_opt in config_paths {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check the settings that would otherwise only fail later
    ///
    /// A malformed base URL is reported here, at startup, rather than on the
    /// first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url {:?}: {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be pretty or json, got {}",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = lookup("DIGITAL_ECONOMY_API_URL") {
            self.api.base_url = url;
        }

        // UI overrides
        if let Some(locale) = lookup("DIGITAL_ECONOMY_LOCALE") {
            match locale.parse() {
                Ok(l) => self.ui.locale = l,
                Err(e) => tracing::warn!("Ignoring DIGITAL_ECONOMY_LOCALE: {}", e),
            }
        }

        // Host overrides
        if let Some(host) = lookup("DIGITAL_ECONOMY_HOST") {
            self.host.host = host;
        }
        if let Some(port) = lookup("DIGITAL_ECONOMY_PORT") {
            if let Ok(p) = port.parse() {
                self.host.port = p;
            }
        }
        if let Some(dir) = lookup("DIGITAL_ECONOMY_DIST_DIR") {
            self.host.dist_dir = PathBuf::from(dir);
        }

        // Logging overrides
        if let Some(level) = lookup("DIGITAL_ECONOMY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DIGITAL_ECONOMY_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Digital Economy Dashboard Configuration
#
# Environment variables override these settings:
# - DIGITAL_ECONOMY_API_URL
# - DIGITAL_ECONOMY_LOCALE
# - DIGITAL_ECONOMY_HOST
# - DIGITAL_ECONOMY_PORT
# - DIGITAL_ECONOMY_DIST_DIR
# - DIGITAL_ECONOMY_LOG_LEVEL
# - DIGITAL_ECONOMY_LOG_FORMAT

[api]
# Evaluation backend base URL
base_url = "http://localhost:8080/api/evaluation"

# Extra headers for every request (Content-Type: application/json is always sent)
# headers = { "X-Client" = "dashboard" }

[ui]
# Locale for entry times printed by `records`: zh-CN or en-US
locale = "zh-CN"

[host]
# Static host address for the compiled front-end
host = "127.0.0.1"
port = 5173

# Directory containing index.html and the wasm bundle
dist_dir = "./digital-economy-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
