//! Service configuration
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing or broken TOML file is never fatal: the defaults apply and
//! the returned [`ConfigSource`] says what happened, to be logged once
//! tracing is up (the file itself names the log level). A missing
//! endpoint URL is not fatal either; data routes report it instead.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variables holding the endpoint URL, in priority order
pub const ENDPOINT_ENV_VARS: [&str; 2] =
    ["CASTING_ENDPOINT_URL", "NEXT_PUBLIC_APPS_SCRIPT_URL"];

/// Environment variable holding the listen port
pub const PORT_ENV_VAR: &str = "CASTING_PORT";

const CONFIG_DIR_NAME: &str = "casting-catalog";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub bind: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::LOG_LEVEL.to_string()
}

/// Values used when nothing else sets them
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const PORT: u16 = 5730;
    pub const BIND: &'static str = "127.0.0.1";
    pub const LOG_LEVEL: &'static str = "info";
}

/// Command-line values; `None` defers to the lower tiers
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint_url: Option<String>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Outcome of looking for the TOML config file
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Loaded(PathBuf),
    Failed { path: PathBuf, error: String },
    NotFound,
}

impl ConfigSource {
    /// Report the outcome; call after the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::Loaded(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Failed { path, error } => warn!(
                "Could not load config file {}: {}; using defaults",
                path.display(),
                error
            ),
            ConfigSource::NotFound => info!("No config file found, using defaults"),
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    endpoint_url: Option<String>,
    pub port: u16,
    pub bind: String,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve every setting from the overrides, the environment, the
    /// TOML file and the compiled defaults
    ///
    /// The file is `overrides.config_path` when given, else
    /// [`default_config_path`].
    pub fn load(overrides: ConfigOverrides) -> (Self, ConfigSource) {
        let toml_path = overrides.config_path.clone().or_else(default_config_path);
        let (toml_config, source) = load_toml_tier(toml_path.as_deref());
        (Self::from_sources(overrides, toml_config), source)
    }

    /// Resolve with an already loaded TOML config
    pub fn from_sources(overrides: ConfigOverrides, toml_config: TomlConfig) -> Self {
        let endpoint_url = resolve_endpoint_url(
            overrides.endpoint_url.as_deref(),
            toml_config.endpoint_url.as_deref(),
        );
        let port = resolve_port(overrides.port, toml_config.port);
        let bind = non_empty(overrides.bind)
            .or_else(|| non_empty(toml_config.bind))
            .unwrap_or_else(|| CompiledDefaults::BIND.to_string());

        Self {
            endpoint_url,
            port,
            bind,
            log_level: toml_config.logging.level,
        }
    }

    /// Endpoint URL, or a configuration error naming the variables to set
    pub fn endpoint_url(&self) -> Result<&str> {
        self.endpoint_url.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "Sheets endpoint URL is not configured (set --endpoint-url or {})",
                ENDPOINT_ENV_VARS[0]
            ))
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", self.bind, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_sources(ConfigOverrides::default(), TomlConfig::default())
    }
}

/// Endpoint URL: CLI, then [`ENDPOINT_ENV_VARS`], then TOML
pub fn resolve_endpoint_url(cli_arg: Option<&str>, toml_value: Option<&str>) -> Option<String> {
    if let Some(url) = cli_arg.filter(|u| !u.trim().is_empty()) {
        return Some(url.trim().to_string());
    }

    for var in ENDPOINT_ENV_VARS {
        if let Ok(url) = std::env::var(var) {
            if !url.trim().is_empty() {
                return Some(url.trim().to_string());
            }
        }
    }

    toml_value
        .filter(|u| !u.trim().is_empty())
        .map(|u| u.trim().to_string())
}

/// Listen port: CLI, then [`PORT_ENV_VAR`], then TOML, then default
pub fn resolve_port(cli_arg: Option<u16>, toml_value: Option<u16>) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }

    if let Ok(text) = std::env::var(PORT_ENV_VAR) {
        match text.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring invalid {}='{}'", PORT_ENV_VAR, text),
        }
    }

    toml_value.unwrap_or(CompiledDefaults::PORT)
}

/// Platform config file location, if one exists
///
/// Linux checks `~/.config/casting-catalog/config.toml` and then
/// `/etc/casting-catalog/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load the config file at `path`, falling back to defaults on any failure
pub fn load_toml_tier(path: Option<&Path>) -> (TomlConfig, ConfigSource) {
    let Some(path) = path else {
        return (TomlConfig::default(), ConfigSource::NotFound);
    };

    match load_toml_config(path) {
        Ok(config) => (config, ConfigSource::Loaded(path.to_path_buf())),
        Err(e) => (
            TomlConfig::default(),
            ConfigSource::Failed {
                path: path.to_path_buf(),
                error: e.to_string(),
            },
        ),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_all_keys() {
        let config: TomlConfig = toml::from_str(
            r#"
            endpoint_url = "https://script.example/exec"
            port = 8080
            bind = "0.0.0.0"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint_url.as_deref(), Some("https://script.example/exec"));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_toml_empty_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_logging_table_without_level() {
        let config: TomlConfig = toml::from_str("[logging]\n").unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let config = ServiceConfig {
            endpoint_url: None,
            port: 1,
            bind: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
        };
        match config.endpoint_url() {
            Err(Error::Config(msg)) => assert!(msg.contains("CASTING_ENDPOINT_URL")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig {
            endpoint_url: None,
            port: 5730,
            bind: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5730");

        let bad = ServiceConfig {
            bind: "localhost:80".to_string(),
            ..config
        };
        assert!(matches!(bad.socket_addr(), Err(Error::Config(_))));
    }
}
