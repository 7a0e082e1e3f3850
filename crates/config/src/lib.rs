//! Configuration management for the voice CI control surface
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (`VOICE_CI__` prefix, `__` section separator)

pub mod settings;

pub use settings::{
    load_settings, load_settings_from, DispatchConfig, JenkinsConfig, NluConfig,
    ObservabilityConfig, ResolverSettings, RuntimeEnvironment, ServerConfig, Settings,
    SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
