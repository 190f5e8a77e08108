//! TOML Configuration File Support
//!
//! Centralized configuration loading for whiskers, supporting a TOML
//! configuration file at `~/.config/whiskers/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - `$XDG_CONFIG_HOME/whiskers/config.toml` (typically `~/.config/whiskers/config.toml`)
//! - `WHISKERS_CONFIG` overrides the path
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://api.thecatapi.com"
//! api_key = "live_..."
//! timeout_secs = 30
//!
//! [flow]
//! page_size = 10
//! clear_before_fetch = true
//!
//! [surface]
//! carousel_interval_ms = 3000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default TheCatAPI base URL
pub const DEFAULT_BASE_URL: &str = "https://api.thecatapi.com";

/// Default number of images requested per breed
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size accepted
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// API section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Catalog base URL
    pub base_url: Option<String>,

    /// TheCatAPI key
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Flow section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowToml {
    /// Images requested per breed
    pub page_size: Option<u32>,

    /// Clear the carousel before the image search is sent
    pub clear_before_fetch: Option<bool>,
}

/// Surface section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceToml {
    /// Carousel auto-advance interval in milliseconds
    pub carousel_interval_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiskersToml {
    /// API configuration section
    pub api: ApiToml,

    /// Flow configuration section
    pub flow: FlowToml,

    /// Surface configuration section
    pub surface: SurfaceToml,
}

// =============================================================================
// Effective Configuration
// =============================================================================

/// Remote catalog connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL (scheme and host, no path)
    pub base_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Create configuration from environment variables only
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = WhiskersConfig::default();
        apply_env_config(&mut config, &|key: &str| std::env::var(key).ok());
        config.api
    }
}

/// Synchronization flow settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowConfig {
    /// Images requested per breed
    pub page_size: u32,
    /// Clear the carousel before the image search is sent
    ///
    /// When `false`, clearing is deferred until the search response is in
    /// hand, so a failed search leaves the previous carousel visible.
    pub clear_before_fetch: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            clear_before_fetch: true,
        }
    }
}

/// Presentation surface settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Carousel auto-advance interval
    pub carousel_interval: Duration,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            carousel_interval: Duration::from_millis(3000),
        }
    }
}

/// Centralized configuration for whiskers
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug, Default)]
pub struct WhiskersConfig {
    /// Remote catalog settings
    pub api: ApiConfig,

    /// Flow settings
    pub flow: FlowConfig,

    /// Surface settings
    pub surface: SurfaceConfig,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::Default
    }
}

impl WhiskersConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flow.page_size == 0 || self.flow.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "flow.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.flow.page_size
            )));
        }

        let base_url = self.api.base_url.as_str();
        let host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"));
        if host.map_or(true, str::is_empty) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an absolute http(s) URL, got {base_url:?}"
            )));
        }

        if self.api.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.surface.carousel_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "surface.carousel_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$WHISKERS_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/whiskers/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WHISKERS_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("whiskers").join("config.toml"))
}

/// Get the log file path
///
/// Returns `$XDG_STATE_HOME/whiskers/whiskers.log`, or a file in the temp
/// directory on platforms without a state directory.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|p| p.join("whiskers"))
        .unwrap_or_else(std::env::temp_dir)
        .join("whiskers.log")
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<WhiskersConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<WhiskersConfig, ConfigError> {
    load_config_with(path.as_deref(), &|key: &str| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
fn load_config_with(
    path: Option<&Path>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<WhiskersConfig, ConfigError> {
    // Start with defaults
    let mut config = WhiskersConfig::default();

    // Try to load from file
    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: WhiskersToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, env);

    config.validate()?;

    tracing::debug!(
        source = %config.source,
        base_url = %config.api.base_url,
        page_size = config.flow.page_size,
        clear_before_fetch = config.flow.clear_before_fetch,
        "Effective configuration"
    );

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut WhiskersConfig, toml: &WhiskersToml) {
    // API settings
    if let Some(ref url) = toml.api.base_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(ref key) = toml.api.api_key {
        config.api.api_key.clone_from(key);
    }
    if let Some(secs) = toml.api.timeout_secs {
        config.api.timeout = Duration::from_secs(secs);
    }

    // Flow settings
    if let Some(size) = toml.flow.page_size {
        config.flow.page_size = size;
    }
    if let Some(clear) = toml.flow.clear_before_fetch {
        config.flow.clear_before_fetch = clear;
    }

    // Surface settings
    if let Some(ms) = toml.surface.carousel_interval_ms {
        config.surface.carousel_interval = Duration::from_millis(ms);
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value, "Ignoring unparseable environment variable");
    }
    parsed
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value, "Ignoring unrecognized flag value");
            None
        }
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut WhiskersConfig, env: &dyn Fn(&str) -> Option<String>) {
    if let Some(url) = env("WHISKERS_API_URL") {
        config.api.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(key) = env("WHISKERS_API_KEY").or_else(|| env("CAT_API_KEY")) {
        config.api.api_key = key;
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("WHISKERS_TIMEOUT_SECS") {
        if let Some(secs) = parse_env::<u64>("WHISKERS_TIMEOUT_SECS", &value) {
            config.api.timeout = Duration::from_secs(secs);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("WHISKERS_PAGE_SIZE") {
        if let Some(size) = parse_env::<u32>("WHISKERS_PAGE_SIZE", &value) {
            config.flow.page_size = size;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("WHISKERS_CLEAR_BEFORE_FETCH") {
        if let Some(flag) = parse_flag("WHISKERS_CLEAR_BEFORE_FETCH", &value) {
            config.flow.clear_before_fetch = flag;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("WHISKERS_CAROUSEL_INTERVAL_MS") {
        if let Some(ms) = parse_env::<u64>("WHISKERS_CAROUSEL_INTERVAL_MS", &value) {
            config.surface.carousel_interval = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
