//! HTTP contract tests against the in-memory collaborators

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use voice_ci_clients::{ScriptedNlu, StubCiServer};
use voice_ci_config::Settings;
use voice_ci_core::{NluEntity, NluError, NluIntent, NluResult};
use voice_ci_server::{create_router, AppState};

fn app_with(nlu: ScriptedNlu) -> axum::Router {
    let state = AppState::new(
        Settings::default(),
        Arc::new(nlu),
        Arc::new(StubCiServer::demo()),
    );
    create_router(state)
}

fn scripted() -> ScriptedNlu {
    ScriptedNlu::new()
        .with(
            "покажи задачи",
            NluResult::new(NluIntent::new("get_all_jobs", 0.95), vec![]),
        )
        .with(
            "покажи сборку 42 задачи бэкенд",
            NluResult::new(
                NluIntent::new("get_build_info", 0.9),
                vec![
                    NluEntity::new("build_number", "42", 0.99),
                    NluEntity::new("job_name", "бэкенд", 0.9),
                ],
            ),
        )
        .with(
            "сотри диск",
            NluResult::new(NluIntent::new("wipe_disk", 0.99), vec![]),
        )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let resp = app_with(scripted())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["locale"], "ru");
}

#[tokio::test]
async fn test_parse_returns_message_and_tts() {
    let resp = app_with(scripted())
        .oneshot(post_json("/parse", json!({"text": "покажи задачи"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(
        body["message"],
        "Представляю вам список задач на сервере Jenkins: deploy, backend, frontend"
    );
    let for_tts = body["for_tts"].as_str().unwrap();
    let spoken = "Представляю вам список задач на сервере Дженкинс : деплой ,";
    assert!(for_tts.starts_with(spoken));
}

#[tokio::test]
async fn test_parse_missing_text_is_bad_request() {
    let resp = app_with(scripted())
        .oneshot(post_json("/parse", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Text not provided");
}

#[tokio::test]
async fn test_parse_unregistered_intent_is_bad_request() {
    let resp = app_with(scripted())
        .oneshot(post_json("/parse", json!({"text": "сотри диск"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Intent not supported: wipe_disk");
}

#[tokio::test]
async fn test_low_confidence_is_a_normal_response() {
    let nlu = ScriptedNlu::new().with(
        "эээ",
        NluResult::new(NluIntent::new("get_all_jobs", 0.2), vec![]),
    );
    let resp = app_with(nlu)
        .oneshot(post_json("/parse", json!({"text": "эээ"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Простите, не понял ваш запрос");
}

#[tokio::test]
async fn test_nlu_failure_is_bad_gateway() {
    let resp = app_with(ScriptedNlu::failing(NluError::Network("refused".into())))
        .oneshot(post_json("/parse", json!({"text": "покажи задачи"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_speech_numbers_become_numerals() {
    let resp = app_with(scripted())
        .oneshot(post_json(
            "/parse/speech",
            json!({"transcription": "покажи сборку сорок два задачи бэкенд"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["recognized_text"], "покажи сборку 42 задачи бэкенд");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Номер сборки: 42"));
    assert!(message.contains("Результат сборки: FAILURE"));
    assert!(body["for_tts"].as_str().unwrap().contains("сорок два"));
}

#[tokio::test]
async fn test_transcript_endpoint() {
    let resp = app_with(scripted())
        .oneshot(post_json(
            "/transcript",
            json!({"transcription": "останови сборку семь"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["text"], "останови сборку 7");
}

#[tokio::test]
async fn test_normalize_endpoint() {
    let resp = app_with(scripted())
        .oneshot(post_json("/normalize", json!({"text": "Jenkins 2.401.3"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["for_tts"],
        "Дженкинс два точка четыреста один точка три"
    );
}
