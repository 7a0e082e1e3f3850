//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use voice_ci_core::Locale;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Locale of messages and speech output
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub server: ServerConfig,

    /// CI server connection
    #[serde(default)]
    pub jenkins: JenkinsConfig,

    /// NLU service connection
    #[serde(default)]
    pub nlu: NluConfig,

    /// Fuzzy name resolution thresholds
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Intent gate and slot extraction
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Speech transcript post-processing
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_endpoints()?;
        self.validate_resolver()?;
        self.validate_dispatch()?;
        self.validate_speech()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }
        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    fn validate_endpoints(&self) -> Result<(), ConfigError> {
        if !self.jenkins.stub {
            validate_http_url("jenkins.url", &self.jenkins.url)?;
        } else if self.environment.is_strict() {
            return Err(ConfigError::InvalidValue {
                field: "jenkins.stub".to_string(),
                message: format!(
                    "Stub CI server is not allowed in {:?}",
                    self.environment
                ),
            });
        }
        validate_http_url("nlu.endpoint", &self.nlu.endpoint)?;
        if self.jenkins.timeout_seconds == 0 || self.nlu.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds".to_string(),
                message: "Collaborator timeouts must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    fn validate_resolver(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("resolver.direct_threshold", self.resolver.direct_threshold),
            (
                "resolver.transliterated_threshold",
                self.resolver.transliterated_threshold,
            ),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("Must be between 0 and 100, got {}", value),
                });
            }
        }
        Ok(())
    }

    fn validate_dispatch(&self) -> Result<(), ConfigError> {
        let dispatch = &self.dispatch;
        if !(0.0..=1.0).contains(&dispatch.confidence_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.confidence_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    dispatch.confidence_threshold
                ),
            });
        }
        if !(0.0..=1.0).contains(&dispatch.min_entity_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.min_entity_confidence".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    dispatch.min_entity_confidence
                ),
            });
        }
        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        let cutoff = self.speech.number_word_cutoff;
        if !(cutoff > 0.0 && cutoff <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "speech.number_word_cutoff".to_string(),
                message: format!("Must be in (0.0, 1.0], got {}", cutoff),
            });
        }
        Ok(())
    }
}

fn validate_http_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("Expected an http(s) URL, got '{}'", url),
        })
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_request_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Jenkins connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JenkinsConfig {
    /// Base URL, e.g. `http://localhost:8080`
    #[serde(default = "default_jenkins_url")]
    pub url: String,

    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u64,

    /// Serve commands from the in-memory stub instead of a live server
    #[serde(default)]
    pub stub: bool,
}

fn default_jenkins_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_collaborator_timeout() -> u64 {
    30
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            url: default_jenkins_url(),
            timeout_seconds: default_collaborator_timeout(),
            stub: false,
        }
    }
}

/// NLU service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluConfig {
    /// Rasa HTTP endpoint; requests go to `{endpoint}/model/parse`
    #[serde(default = "default_nlu_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u64,
}

fn default_nlu_endpoint() -> String {
    "http://localhost:5005".to_string()
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            endpoint: default_nlu_endpoint(),
            timeout_seconds: default_collaborator_timeout(),
        }
    }
}

/// Fuzzy resolution thresholds, 0-100
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Minimum score against the names as they are
    #[serde(default = "default_direct_threshold")]
    pub direct_threshold: u8,

    /// Minimum score against the transliterated names
    #[serde(default = "default_transliterated_threshold")]
    pub transliterated_threshold: u8,
}

fn default_direct_threshold() -> u8 {
    70
}

fn default_transliterated_threshold() -> u8 {
    60
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            direct_threshold: default_direct_threshold(),
            transliterated_threshold: default_transliterated_threshold(),
        }
    }
}

/// Intent gate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Intents at or below this confidence fall back to `unknown_action`
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Entities below this confidence are not turned into slots
    #[serde(default)]
    pub min_entity_confidence: f64,
}

fn default_confidence_threshold() -> f64 {
    0.75
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            min_entity_confidence: 0.0,
        }
    }
}

/// Speech transcript settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Minimum similarity for a transcript token to be read as a number word
    #[serde(default = "default_number_word_cutoff")]
    pub number_word_cutoff: f64,
}

fn default_number_word_cutoff() -> f64 {
    0.75
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            number_word_cutoff: default_number_word_cutoff(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
///
/// Priority: env vars (`VOICE_CI__SECTION__KEY`) > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from a specific config directory
pub fn load_settings_from(dir: &str, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name(&format!("{}/default", dir)).required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("{}/{}", dir, env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("VOICE_CI")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.locale, Locale::Russian);
        assert_eq!(settings.resolver.direct_threshold, 70);
        assert_eq!(settings.resolver.transliterated_threshold, 60);
        assert!((settings.dispatch.confidence_threshold - 0.75).abs() < f64::EPSILON);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        let mut settings = Settings::default();
        settings.resolver.direct_threshold = 101;
        assert!(settings.validate_resolver().is_err());

        settings.resolver.direct_threshold = 80;
        assert!(settings.validate_resolver().is_ok());

        settings.dispatch.confidence_threshold = 1.5;
        assert!(settings.validate_dispatch().is_err());
    }

    #[test]
    fn test_number_word_cutoff_validation() {
        let mut settings = Settings::default();
        settings.speech.number_word_cutoff = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_url_validation() {
        let mut settings = Settings::default();
        settings.jenkins.url = "localhost:8080".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("jenkins.url"));

        // stub mode skips the URL check
        settings.jenkins.stub = true;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_strict_environments() {
        assert!(!RuntimeEnvironment::Development.is_strict());
        assert!(RuntimeEnvironment::Staging.is_strict());
        assert!(RuntimeEnvironment::Production.is_strict());
    }

    #[test]
    fn test_stub_rejected_in_production() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.jenkins.stub = true;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let json = r#"{"locale": "en", "jenkins": {"url": "https://ci.example.com"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.locale, Locale::English);
        assert_eq!(settings.jenkins.url, "https://ci.example.com");
        assert_eq!(settings.jenkins.timeout_seconds, 30);
        assert_eq!(settings.server.port, 5000);
    }

    #[test]
    fn test_load_without_files() {
        let settings = load_settings_from("does-not-exist", Some("test")).unwrap();
        assert_eq!(settings.nlu.endpoint, "http://localhost:5005");
    }
}
