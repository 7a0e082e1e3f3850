//! HTTP Endpoints
//!
//! REST API for text and speech commands.

use std::time::{Duration, Instant};

use axum::{
    extract::{Json, Request, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::metrics::{metrics_handler, record_request, record_request_latency};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let (cors_layer, timeout) = {
        let config = state.config.read();
        (
            build_cors_layer(&config.server.cors_origins, config.server.cors_enabled),
            Duration::from_secs(config.server.timeout_seconds),
        )
    };

    Router::new()
        // Commands
        .route("/parse", post(parse_text))
        .route("/parse/speech", post(parse_speech))

        // Text utilities
        .route("/transcript", post(transcript))
        .route("/normalize", post(normalize))

        // Health check
        .route("/health", get(health_check))

        // Prometheus metrics
        .route("/metrics", get(metrics_handler))

        // Middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %uuid::Uuid::new_v4(),
                )
            }),
        )
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Text command request
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Command response: display text and speech text
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandReply {
    pub message: String,
    pub for_tts: String,
}

/// Speech transcription request
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub transcription: Option<String>,
}

/// Speech command response
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechReply {
    pub message: String,
    pub for_tts: String,
    /// Transcription after number words were turned into numerals
    pub recognized_text: String,
}

fn observe<T>(endpoint: &'static str, start: Instant, result: &Result<T, ServerError>) {
    let status = match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    record_request(endpoint, status);
    record_request_latency(endpoint, start.elapsed());
}

async fn run_command(state: &AppState, text: &str) -> Result<CommandReply, ServerError> {
    let outcome = state.dispatcher.process(text).await?;
    Ok(CommandReply {
        message: outcome.response.message,
        for_tts: outcome.response.for_tts,
    })
}

/// Text command endpoint
async fn parse_text(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandReply>, ServerError> {
    let start = Instant::now();
    let result = run_command(&state, request.text.as_deref().unwrap_or_default()).await;
    observe("/parse", start, &result);
    result.map(Json)
}

/// Speech command endpoint
///
/// Number words in the transcription become numerals before the NLU sees it.
async fn parse_speech(
    State(state): State<AppState>,
    Json(request): Json<SpeechRequest>,
) -> Result<Json<SpeechReply>, ServerError> {
    let start = Instant::now();
    let recognized_text = state
        .transcript
        .parse(request.transcription.as_deref().unwrap_or_default());
    tracing::debug!(recognized = %recognized_text, "Transcription normalized");

    let result = run_command(&state, &recognized_text)
        .await
        .map(|reply| SpeechReply {
            message: reply.message,
            for_tts: reply.for_tts,
            recognized_text,
        });
    observe("/parse/speech", start, &result);
    result.map(Json)
}

/// Number-word normalization of a transcription
async fn transcript(
    State(state): State<AppState>,
    Json(request): Json<SpeechRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let transcription = request
        .transcription
        .ok_or_else(|| ServerError::InvalidRequest("Transcription not provided".to_string()))?;
    Ok(Json(serde_json::json!({
        "text": state.transcript.parse(&transcription),
    })))
}

/// Speech-safe form of arbitrary text
async fn normalize(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let text = request
        .text
        .ok_or_else(|| ServerError::InvalidRequest("Text not provided".to_string()))?;
    Ok(Json(serde_json::json!({
        "for_tts": state.normalizer.normalize(&text),
    })))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let locale = state.config.read().locale;
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "locale": locale.code(),
    }))
}
