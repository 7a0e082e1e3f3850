//! End-to-end dispatch against the in-memory collaborators

use std::sync::Arc;

use voice_ci_clients::{ScriptedNlu, StubCiServer};
use voice_ci_commands::{
    CommandIntent, DispatchError, DispatchState, DispatcherConfig, IntentDispatcher,
};
use voice_ci_core::{CiError, NluEntity, NluIntent, NluResult};

fn dispatcher_with(nlu: ScriptedNlu, ci: Arc<StubCiServer>) -> IntentDispatcher {
    IntentDispatcher::new(Arc::new(nlu), ci, DispatcherConfig::default())
}

fn intent(name: &str, confidence: f64, entities: Vec<NluEntity>) -> NluResult {
    NluResult::new(NluIntent::new(name, confidence), entities)
}

#[tokio::test]
async fn test_confidence_gate_boundary() {
    let nlu = ScriptedNlu::new()
        .with("покажи задачи", intent("get_all_jobs", 0.75, vec![]))
        .with("покажи все задачи", intent("get_all_jobs", 0.76, vec![]));
    let d = dispatcher_with(nlu, Arc::new(StubCiServer::demo()));

    let at = d.process("покажи задачи").await.unwrap();
    assert_eq!(at.intent, CommandIntent::UnknownAction);
    assert_eq!(at.state, DispatchState::Unknown);

    let above = d.process("покажи все задачи").await.unwrap();
    assert_eq!(above.intent, CommandIntent::GetAllJobs);
    assert_eq!(above.state, DispatchState::Recognized);
    assert!(above.response.message.contains("deploy, backend, frontend"));
}

#[tokio::test]
async fn test_wrong_script_name_resolves_to_live_job() {
    let nlu = ScriptedNlu::new().with(
        "запусти деплой",
        intent(
            "trigger_job_build",
            0.93,
            vec![NluEntity::new("job_name", "деплой", 0.88)],
        ),
    );
    let ci = Arc::new(StubCiServer::demo());
    let d = dispatcher_with(nlu, ci.clone());

    let outcome = d.process("запусти деплой").await.unwrap();
    assert_eq!(outcome.response.message, "Задача deploy была запущена.");
    assert_eq!(outcome.response.for_tts, "Задача деплой была запущена .");
    assert_eq!(ci.triggered(), vec![("deploy".to_string(), true)]);
}

#[tokio::test]
async fn test_unmatched_name_reports_missing_job() {
    let nlu = ScriptedNlu::new().with(
        "информация о задаче мониторинг",
        intent(
            "get_job_info",
            0.9,
            vec![NluEntity::new("job_name", "мониторинг", 0.9)],
        ),
    );
    let d = dispatcher_with(nlu, Arc::new(StubCiServer::demo()));

    let outcome = d.process("информация о задаче мониторинг").await.unwrap();
    assert_eq!(
        outcome.response.message,
        "Задача с именем мониторинг не существует."
    );
}

#[tokio::test]
async fn test_entity_fallback_feeds_handler() {
    let nlu = ScriptedNlu::new().with(
        "параметры бэкенд",
        intent(
            "get_job_parameters",
            0.9,
            vec![
                NluEntity::new("job_name", "deploy", 0.4),
                NluEntity::new("parameter_name", "BRANCH", 0.2),
            ],
        ),
    );
    let mut config = DispatcherConfig::default();
    config.dispatch.min_entity_confidence = 0.5;
    let d = IntentDispatcher::new(Arc::new(nlu), Arc::new(StubCiServer::demo()), config);

    let outcome = d.process("параметры бэкенд").await.unwrap();
    assert_eq!(outcome.slots.len(), 1);
    assert_eq!(outcome.slots.job_name(), Some("deploy"));
    assert!(outcome.response.message.starts_with("Параметры задачи:\nBRANCH"));
}

#[tokio::test]
async fn test_unregistered_intent_is_an_error() {
    let nlu = ScriptedNlu::new().with("удали всё", intent("delete_everything", 0.99, vec![]));
    let d = dispatcher_with(nlu, Arc::new(StubCiServer::demo()));

    let err = d.process("удали всё").await.unwrap_err();
    assert!(matches!(err, DispatchError::UnregisteredIntent(_)));
    assert_eq!(err.to_string(), "Intent not supported: delete_everything");
}

#[tokio::test]
async fn test_provider_error_becomes_message() {
    let nlu = ScriptedNlu::new().with("статус сервера", intent("get_server_info", 0.97, vec![]));
    let ci = Arc::new(StubCiServer::demo());
    ci.fail_with(CiError::Api {
        status: 503,
        message: "Jenkins is restarting".into(),
    });
    let d = dispatcher_with(nlu, ci);

    let outcome = d.process("статус сервера").await.unwrap();
    assert_eq!(
        outcome.response.message,
        "Ошибка: HTTP 503: Jenkins is restarting"
    );
}

#[tokio::test]
async fn test_concurrent_commands_complete() {
    let nlu = ScriptedNlu::new()
        .with("задачи", intent("get_all_jobs", 0.9, vec![]))
        .with("сервер", intent("get_server_info", 0.9, vec![]));
    let d = Arc::new(dispatcher_with(nlu, Arc::new(StubCiServer::demo())));

    let handles: Vec<_> = ["задачи", "сервер", "задачи", "сервер"]
        .into_iter()
        .map(|text| {
            let d = d.clone();
            tokio::spawn(async move { d.process(text).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.state, DispatchState::Recognized);
    }
}
