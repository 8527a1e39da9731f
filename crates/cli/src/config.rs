//! # CLI Configuration
//!
//! Settings are resolved in layers, later layers winning:
//! 1. built-in defaults (public endpoints, 30 second timeout)
//! 2. a YAML file (`--config <path>`, or `crmtext.yml` in the working directory),
//!    with `${VAR}` placeholders substituted from the environment
//! 3. `CRMTEXT_*` environment variables, e.g. `CRMTEXT_API_KEY`

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use crmtext::types::{DEFAULT_INDEX_ENDPOINT, DEFAULT_SENTIMENT_ENDPOINT, DEFAULT_TIMEOUT};
use crmtext::ClientConfig;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use std::{env, fs, path::Path};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "crmtext.yml";
pub const ENV_PREFIX: &str = "CRMTEXT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(#[from] config::ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("API key is missing. Set `api_key` in the config file or CRMTEXT_API_KEY.")]
    MissingApiKey,
    #[error("`timeout_secs` must be greater than zero.")]
    InvalidTimeout,
}

/// The resolved configuration, mapping directly to `crmtext.yml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub index_name: String,
    pub sentiment_endpoint: String,
    pub index_endpoint: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            index_name: self.index_name.clone(),
            sentiment_endpoint: self.sentiment_endpoint.clone(),
            index_endpoint: self.index_endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

// Reads a file and replaces `${VAR}` with the variable's value (empty if unset).
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("placeholder regex is valid");
    let expanded = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

/// Loads the configuration from defaults, an optional YAML file and the environment.
///
/// An explicit `config_path_override` must exist; the default `crmtext.yml`
/// is optional. The API key must be set by one of the layers and the timeout
/// must be non-zero.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("sentiment_endpoint", DEFAULT_SENTIMENT_ENDPOINT)?
        .set_default("index_endpoint", DEFAULT_INDEX_ENDPOINT)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT.as_secs() as i64)?;

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute(DEFAULT_CONFIG_FILE)? {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    if config.api_key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }
    Ok(config)
}
