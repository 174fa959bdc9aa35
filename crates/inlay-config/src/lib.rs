//! Configuration management for inlay.
//!
//! Parses `inlay.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `resolver.user_agent`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override resolver enabled flag.
    pub resolver_enabled: Option<bool>,
    /// Override resolver timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override resolver user agent.
    pub user_agent: Option<String>,
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "inlay.toml";

/// Default resolver timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound for `resolver.timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback resolver configuration.
    pub resolver: ResolverConfig,
    /// Markdown rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Fallback resolver configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Whether profile links may trigger a network lookup.
    pub enabled: bool,
    /// Lookup timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with lookups.
    pub user_agent: String,
}

impl ResolverConfig {
    /// Lookup timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("inlay/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`resolver.user_agent`").
        field: String,
        /// Error message (e.g., "${`INLAY_AGENT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `inlay.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(enabled) = settings.resolver_enabled {
            self.resolver.enabled = enabled;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.resolver.timeout_secs = timeout_secs;
        }
        if let Some(user_agent) = &settings.user_agent {
            self.resolver.user_agent.clone_from(user_agent);
        }
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_resolver()
    }

    /// Validate resolver configuration.
    fn validate_resolver(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.resolver.user_agent, "resolver.user_agent")?;

        let timeout = self.resolver.timeout_secs;
        if timeout == 0 {
            return Err(ConfigError::Validation(
                "resolver.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "resolver.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.resolver.user_agent =
            expand::expand_env(&self.resolver.user_agent, "resolver.user_agent")?;
        Ok(())
    }
}
