//! Rasa NLU over HTTP
//!
//! Talks to a Rasa server started with `--enable-api`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use voice_ci_core::{NluEngine, NluError, NluResult};

/// Configuration for the Rasa client
#[derive(Debug, Clone)]
pub struct RasaConfig {
    /// Server endpoint, e.g. `http://localhost:5005`
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for RasaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5005".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

/// NLU backed by a Rasa server
#[derive(Debug, Clone)]
pub struct RasaNluClient {
    config: RasaConfig,
    client: Client,
}

impl RasaNluClient {
    pub fn new(config: RasaConfig) -> Result<Self, NluError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NluError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn parse_url(&self) -> String {
        format!("{}/model/parse", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl NluEngine for RasaNluClient {
    async fn parse(&self, text: &str) -> Result<NluResult, NluError> {
        let response = self
            .client
            .post(self.parse_url())
            .json(&ParseRequest { text: text.trim() })
            .send()
            .await
            .map_err(|e| NluError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NluError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let result: NluResult = response
            .json()
            .await
            .map_err(|e| NluError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            intent = ?result.intent.as_ref().map(|i| i.name.as_str()),
            entities = result.entities.len(),
            "NLU parse complete"
        );
        Ok(result)
    }

    fn name(&self) -> &str {
        "rasa"
    }
}
