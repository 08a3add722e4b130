//! Configuration management for loadspec
//!
//! Loads configuration with priority:
//! 1. An explicitly given config file
//! 2. loadspec.toml in the current directory or one of its parents
//! 3. Defaults
//!
//! String values written as `${VAR_NAME}` are replaced by the environment
//! variable of that name when it is set.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "loadspec.toml";

/// loadspec configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoadspecConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP ingestion server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted upload request, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Logging and tracing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoadspecConfig {
    /// Load configuration from loadspec.toml if one is found, else defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file.
    ///
    /// An explicit path must exist. Without one, a missing loadspec.toml
    /// yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::find_config_file()? {
                Some(found) => found,
                None => {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading configuration from: {:?}", config_path);

        let contents = fs::read_to_string(&config_path)?;
        let mut config = Self::from_toml_str(&contents).map_err(|e| match e {
            Error::ConfigParse { source, .. } => Error::ConfigParse {
                path: config_path.display().to_string(),
                source,
            },
            other => other,
        })?;

        config.resolve_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: "<inline>".to_string(),
            source,
        })
    }

    /// Find loadspec.toml by searching current directory and parents
    fn find_config_file() -> Result<Option<PathBuf>> {
        let mut current = env::current_dir()?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(Some(config_path));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Resolve ${VAR_NAME} references to environment variables
    fn resolve_env_vars(&mut self) {
        for value in [
            &mut self.server.host,
            &mut self.observability.log_level,
            &mut self.observability.service_name,
        ] {
            if let Some(resolved) = Self::resolve_env_var(value) {
                *value = resolved;
            }
        }
    }

    /// Resolve a single ${VAR_NAME} reference
    fn resolve_env_var(value: &str) -> Option<String> {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            env::var(var_name).ok()
        } else {
            Some(value.to_string())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.max_upload_bytes == 0 {
            return Err(Error::config_error("server.max_upload_bytes must be non-zero"));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "loadspec".to_string()
}
