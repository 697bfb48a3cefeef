//! # Configuration Management
//!
//! This module loads runtime settings from `tide-config.toml`, a `.env` file
//! and the process environment. It provides a centralized way to configure
//! the listening address and the tide-timings source.
//!
//! ## Precedence
//! 1. Built-in defaults (port 8080, the NEA tide-timings page)
//! 2. `tide-config.toml`, or the file named by `TIDE_CONFIG`
//! 3. `PORT` and `SECRET_JWT` from the environment (`.env` is loaded first)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default config file, relative to the working directory
pub const CONFIG_FILE: &str = "tide-config.toml";

/// Default listening port when neither the file nor `PORT` sets one
pub const DEFAULT_PORT: u16 = 8080;

/// Published tide timings page
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.nea.gov.sg/corporate-functions/weather/tide-timings";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream page configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Shared secret from `SECRET_JWT`; never read from or written to the file
    #[serde(skip)]
    pub secret_jwt: Option<String>,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g. "0.0.0.0")
    pub host: String,
    /// TCP port
    pub port: u16,
}

/// Upstream tide-timings page configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page to scrape
    pub url: String,
    /// `User-Agent` sent with every fetch
    pub user_agent: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: "tide-timings-scraper/1.0".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Config {
    /// Load `.env`, the config file and environment overrides.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Config loaded from .env"),
            Err(e) if e.not_found() => {
                info!(".env file not found, relying on environment variables")
            }
            Err(e) => warn!(error = %e, "Ignoring unreadable .env file"),
        }

        let path = env::var("TIDE_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = Self::load_from_path(path);
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded configuration file");
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Invalid config file format, using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `PORT` and `SECRET_JWT` overrides from `lookup`.
    ///
    /// An unparsable `PORT` is reported and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(
                    value = %value,
                    port = self.server.port,
                    "Invalid PORT, keeping configured port"
                ),
            },
            None => info!(port = self.server.port, "PORT not set, using configured port"),
        }

        self.secret_jwt = lookup("SECRET_JWT").filter(|value| !value.is_empty());
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
