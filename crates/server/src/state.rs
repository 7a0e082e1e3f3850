//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use voice_ci_clients::{
    JenkinsClient, JenkinsClientConfig, RasaConfig, RasaNluClient, StubCiServer,
};
use voice_ci_commands::{DispatcherConfig, IntentDispatcher};
use voice_ci_config::Settings;
use voice_ci_core::{CiServer, NluEngine};
use voice_ci_text_processing::{NumberWordParser, TextNormalizer};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    pub dispatcher: Arc<IntentDispatcher>,
    /// Speech transcript post-processing
    pub transcript: NumberWordParser,
    pub normalizer: TextNormalizer,
}

impl AppState {
    /// Create state around explicit collaborators
    pub fn new(config: Settings, nlu: Arc<dyn NluEngine>, ci: Arc<dyn CiServer>) -> Self {
        let dispatcher = IntentDispatcher::new(nlu, ci, DispatcherConfig::from_settings(&config));
        Self {
            transcript: NumberWordParser::with_cutoff(
                config.locale,
                config.speech.number_word_cutoff,
            ),
            normalizer: TextNormalizer::new(config.locale),
            dispatcher: Arc::new(dispatcher),
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Create state with the collaborators named in `config`
    pub fn from_settings(config: Settings) -> Result<Self, ServerError> {
        let ci = build_ci_server(&config)?;
        let nlu: Arc<dyn NluEngine> = Arc::new(
            RasaNluClient::new(RasaConfig {
                endpoint: config.nlu.endpoint.clone(),
                timeout: Duration::from_secs(config.nlu.timeout_seconds),
            })
            .map_err(|e| ServerError::Internal(e.to_string()))?,
        );
        Ok(Self::new(config, nlu, ci))
    }
}

fn build_ci_server(config: &Settings) -> Result<Arc<dyn CiServer>, ServerError> {
    if config.jenkins.stub {
        tracing::warn!("Using the in-memory CI server");
        return Ok(Arc::new(StubCiServer::demo()));
    }

    let client = JenkinsClient::new(JenkinsClientConfig {
        base_url: config.jenkins.url.clone(),
        timeout: Duration::from_secs(config.jenkins.timeout_seconds),
    })
    .map_err(|e| ServerError::Internal(e.to_string()))?;
    tracing::info!(url = %config.jenkins.url, "Using Jenkins server");
    Ok(Arc::new(client))
}
