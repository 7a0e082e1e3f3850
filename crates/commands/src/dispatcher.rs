//! Intent dispatch
//!
//! Text goes to the NLU engine, the recognized intent passes a confidence
//! gate, entities become slots, and the registered handler answers. Only one
//! command is processed at a time.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use voice_ci_config::{DispatchConfig, Settings};
use voice_ci_core::{
    CiServer, CommandResponse, Locale, NluEngine, NluIntent, NluResult, SlotMap,
};
use voice_ci_text_processing::ResolverConfig;

use crate::handlers::CommandHandlers;
use crate::intent::{CommandIntent, UNKNOWN_ACTION};
use crate::slots::extract_slots;
use crate::DispatchError;

/// Outcome of the confidence gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    /// Intent confidence above the threshold
    Recognized,
    /// Low confidence or no intent; routed to `unknown_action`
    Unknown,
}

impl DispatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchState::Recognized => "recognized",
            DispatchState::Unknown => "unknown",
        }
    }
}

/// Result of a dispatched command
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub intent: CommandIntent,
    pub state: DispatchState,
    /// Confidence reported by the NLU, 0 when it gave no intent
    pub confidence: f64,
    pub slots: SlotMap,
    pub response: CommandResponse,
}

#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    pub locale: Locale,
    pub resolver: ResolverConfig,
    pub dispatch: DispatchConfig,
}

impl DispatcherConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            locale: settings.locale,
            resolver: ResolverConfig {
                direct_threshold: settings.resolver.direct_threshold,
                transliterated_threshold: settings.resolver.transliterated_threshold,
            },
            dispatch: settings.dispatch,
        }
    }
}

/// Routes recognized commands to their handlers
pub struct IntentDispatcher {
    nlu: Arc<dyn NluEngine>,
    handlers: CommandHandlers,
    config: DispatchConfig,
    /// Held for a whole command
    serial: Mutex<()>,
}

impl IntentDispatcher {
    pub fn new(nlu: Arc<dyn NluEngine>, ci: Arc<dyn CiServer>, config: DispatcherConfig) -> Self {
        Self {
            nlu,
            handlers: CommandHandlers::new(ci, config.locale, config.resolver),
            config: config.dispatch,
            serial: Mutex::new(()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.handlers.messages().locale()
    }

    /// Understand `text` and run the matching command
    pub async fn process(&self, text: &str) -> Result<DispatchOutcome, DispatchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DispatchError::MissingText);
        }

        let _guard = self.serial.lock().await;
        let start = Instant::now();

        let nlu = self.nlu.parse(text).await.map_err(|e| {
            tracing::warn!(engine = self.nlu.name(), error = %e, "NLU request failed");
            metrics::counter!("voice_ci_nlu_errors_total").increment(1);
            e
        })?;
        let outcome = self.route(&nlu).await;

        metrics::histogram!("voice_ci_command_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        outcome
    }

    /// Run the command for an already parsed NLU result
    pub async fn dispatch(&self, nlu: &NluResult) -> Result<DispatchOutcome, DispatchError> {
        let _guard = self.serial.lock().await;
        self.route(nlu).await
    }

    /// Effective intent name and gate state
    ///
    /// Confidence at or below the threshold forces `unknown_action`.
    pub fn gate<'a>(&self, intent: Option<&'a NluIntent>) -> (&'a str, DispatchState, f64) {
        match intent {
            Some(intent)
                if !intent.name.is_empty()
                    && intent.confidence > self.config.confidence_threshold =>
            {
                (intent.name.as_str(), DispatchState::Recognized, intent.confidence)
            }
            Some(intent) => (UNKNOWN_ACTION, DispatchState::Unknown, intent.confidence),
            None => (UNKNOWN_ACTION, DispatchState::Unknown, 0.0),
        }
    }

    async fn route(&self, nlu: &NluResult) -> Result<DispatchOutcome, DispatchError> {
        let (name, state, confidence) = self.gate(nlu.intent.as_ref());
        let Some(intent) = CommandIntent::from_name(name) else {
            tracing::warn!(intent = name, confidence, "Intent has no registered handler");
            metrics::counter!("voice_ci_unregistered_intents_total").increment(1);
            return Err(DispatchError::UnregisteredIntent(name.to_string()));
        };

        let slots = extract_slots(&nlu.entities, self.config.min_entity_confidence);
        tracing::info!(
            intent = intent.as_str(),
            state = state.as_str(),
            confidence,
            slots = slots.len(),
            "Dispatching command"
        );
        metrics::counter!(
            "voice_ci_commands_total",
            "intent" => intent.as_str(),
            "state" => state.as_str()
        )
        .increment(1);

        let response = self.handlers.handle(intent, &slots).await;
        Ok(DispatchOutcome {
            intent,
            state,
            confidence,
            slots,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ci_clients::{ScriptedNlu, StubCiServer};
    use voice_ci_core::{NluEntity, NluError};

    fn dispatcher() -> IntentDispatcher {
        IntentDispatcher::new(
            Arc::new(ScriptedNlu::new()),
            Arc::new(StubCiServer::demo()),
            DispatcherConfig::default(),
        )
    }

    #[test]
    fn test_gate_boundary() {
        let d = dispatcher();
        let at = NluIntent::new("get_all_jobs", 0.75);
        assert_eq!(d.gate(Some(&at)).0, UNKNOWN_ACTION);
        assert_eq!(d.gate(Some(&at)).1, DispatchState::Unknown);

        let above = NluIntent::new("get_all_jobs", 0.76);
        assert_eq!(d.gate(Some(&above)).0, "get_all_jobs");
        assert_eq!(d.gate(Some(&above)).1, DispatchState::Recognized);
    }

    #[test]
    fn test_gate_without_intent() {
        let d = dispatcher();
        assert_eq!(d.gate(None), (UNKNOWN_ACTION, DispatchState::Unknown, 0.0));
        let empty = NluIntent::new("", 0.99);
        assert_eq!(d.gate(Some(&empty)).1, DispatchState::Unknown);
    }

    #[tokio::test]
    async fn test_low_confidence_ignores_declared_name() {
        let d = dispatcher();
        // an unregistered name below the gate is still a normal unknown outcome
        let nlu = NluResult::new(NluIntent::new("format_disk", 0.5), vec![]);
        let outcome = d.dispatch(&nlu).await.unwrap();
        assert_eq!(outcome.intent, CommandIntent::UnknownAction);
        assert_eq!(outcome.response.message, "Простите, не понял ваш запрос");
    }

    #[tokio::test]
    async fn test_unregistered_intent() {
        let d = dispatcher();
        let nlu = NluResult::new(NluIntent::new("format_disk", 0.99), vec![]);
        let err = d.dispatch(&nlu).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnregisteredIntent(ref name) if name == "format_disk"
        ));
    }

    #[tokio::test]
    async fn test_slots_reach_handler() {
        let d = dispatcher();
        let nlu = NluResult::new(
            NluIntent::new("get_build_info", 0.9),
            vec![
                NluEntity::new("job_name", "backend", 0.9),
                NluEntity::new("build_number", "42", 0.9),
            ],
        );
        let outcome = d.dispatch(&nlu).await.unwrap();
        assert_eq!(outcome.state, DispatchState::Recognized);
        assert_eq!(outcome.slots.len(), 2);
        assert!(outcome.response.message.contains("Номер сборки: 42"));
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let d = dispatcher();
        assert!(matches!(d.process("   ").await, Err(DispatchError::MissingText)));
    }

    #[tokio::test]
    async fn test_nlu_failure_propagates() {
        let d = IntentDispatcher::new(
            Arc::new(ScriptedNlu::failing(NluError::Network("refused".into()))),
            Arc::new(StubCiServer::demo()),
            DispatcherConfig::default(),
        );
        assert!(matches!(d.process("покажи задачи").await, Err(DispatchError::Nlu(_))));
    }
}
