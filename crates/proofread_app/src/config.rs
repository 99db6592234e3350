//! Process configuration: an optional RON file, environment overrides, and
//! provider credentials.
//!
//! Example `proofread.ron`:
//!
//! ```ron
//! (
//!     bind: "0.0.0.0:8080",
//!     log: (destination: Both, level: "debug", file: "proofread.log"),
//!     gemini: (model: Some("gemini-2.5-pro")),
//! )
//! ```

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use proofread_engine::ProviderSettings;
use proofread_logging::LogDestination;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "PROOFREAD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "proofread.ron";
pub const BIND_VAR: &str = "PROOFREAD_BIND";
pub const LOG_LEVEL_VAR: &str = "PROOFREAD_LOG";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
pub const OPENAI_MODEL_VAR: &str = "OPENAI_MODEL";
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid bind address {value:?}: {message}")]
    Bind { value: String, message: String },
    #[error("{var} environment variable not set")]
    MissingCredential { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    pub log: LogConfig,
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            log: LogConfig::default(),
            gemini: ProviderConfig::default(),
            openai: ProviderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: "info".to_string(),
            file: PathBuf::from("./proofread.log"),
        }
    }
}

/// Fields left out of the file keep the values of the provider's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
}

impl ProviderConfig {
    /// Overlay this configuration on `defaults`.
    pub fn settings(&self, defaults: ProviderSettings) -> ProviderSettings {
        ProviderSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            model: self.model.clone().unwrap_or(defaults.model),
            connect_timeout: self
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_response_bytes: self.max_response_bytes.unwrap_or(defaults.max_response_bytes),
        }
    }
}

impl AppConfig {
    /// Load the file named by `PROOFREAD_CONFIG` (or `proofread.ron`), then
    /// apply environment overrides.
    ///
    /// A missing default file is not an error; a missing file that was named
    /// explicitly is.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let (path, required) = match lookup(CONFIG_PATH_VAR) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        let mut config = Self::load_file(&path, required)?;
        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn load_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        if let Some(bind) = non_empty(BIND_VAR) {
            self.bind = bind;
        }
        if let Some(level) = non_empty(LOG_LEVEL_VAR) {
            self.log.level = level;
        }
        if let Some(model) = non_empty(GEMINI_MODEL_VAR) {
            self.gemini.model = Some(model);
        }
        if let Some(model) = non_empty(OPENAI_MODEL_VAR) {
            self.openai.model = Some(model);
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|err: std::net::AddrParseError| ConfigError::Bind {
            value: self.bind.clone(),
            message: err.to_string(),
        })
    }

    pub fn gemini_settings(&self) -> ProviderSettings {
        self.gemini.settings(ProviderSettings::gemini())
    }

    pub fn openai_settings(&self) -> ProviderSettings {
        self.openai.settings(ProviderSettings::openai())
    }
}

/// API keys read from the environment. Never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// The Gemini key is required; the OpenAI key is optional.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let gemini_api_key = non_empty(GEMINI_KEY_VAR).ok_or(ConfigError::MissingCredential {
            var: GEMINI_KEY_VAR,
        })?;
        Ok(Self {
            gemini_api_key,
            openai_api_key: non_empty(OPENAI_KEY_VAR),
        })
    }
}
