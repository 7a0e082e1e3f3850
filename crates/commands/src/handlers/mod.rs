//! Command handlers
//!
//! One handler per registered intent. Each handler fetches what it needs from
//! the CI server on every call, resolves spoken names against the names it
//! just fetched, and produces a display message. `handle` pairs that message
//! with its speech form.
//!
//! Handlers never fail: missing slots, unknown names and CI errors all turn
//! into a localized message.

mod builds;
mod jobs;
mod server;

use std::sync::Arc;

use voice_ci_core::{CiError, CiServer, CommandResponse, Locale, SlotMap};
use voice_ci_text_processing::{NameResolver, ResolverConfig, TextNormalizer};

use crate::intent::CommandIntent;
use crate::messages::Messages;

/// A message that ends the handler early
type Reply = String;

/// Handler set bound to one CI server and locale
pub struct CommandHandlers {
    ci: Arc<dyn CiServer>,
    resolver: NameResolver,
    normalizer: TextNormalizer,
    messages: Messages,
}

impl CommandHandlers {
    pub fn new(ci: Arc<dyn CiServer>, locale: Locale, resolver: ResolverConfig) -> Self {
        let normalizer = TextNormalizer::new(locale);
        Self {
            ci,
            resolver: NameResolver::new(normalizer, resolver),
            normalizer,
            messages: Messages::new(locale),
        }
    }

    pub fn messages(&self) -> Messages {
        self.messages
    }

    /// Run the handler registered for `intent`
    pub async fn handle(&self, intent: CommandIntent, slots: &SlotMap) -> CommandResponse {
        let message = match intent {
            CommandIntent::GetServerInfo => self.get_server_info().await,
            CommandIntent::GetAllJobs => self.get_all_jobs().await,
            CommandIntent::GetJobInfo => self.get_job_info(slots).await,
            CommandIntent::TriggerJobBuild => self.trigger_job_build(slots).await,
            CommandIntent::StopJobBuild => self.stop_job_build(slots).await,
            CommandIntent::GetBuildsList => self.get_builds_list(slots).await,
            CommandIntent::GetBuildInfo => self.get_build_info(slots).await,
            CommandIntent::GetJobBuildConsoleOutput => {
                self.get_job_build_console_output(slots).await
            }
            CommandIntent::GetJobParameters => self.get_job_parameters(slots).await,
            CommandIntent::GetJobParameterValue => self.get_job_parameter_value(slots).await,
            CommandIntent::UnknownAction => self.messages.unknown_action(),
        };
        self.respond(message)
    }

    fn respond(&self, message: String) -> CommandResponse {
        let for_tts = self.normalizer.normalize(&message);
        CommandResponse::new(message, for_tts)
    }

    /// Resolve the job name slot against the live job list
    async fn resolve_job(&self, slots: &SlotMap) -> Result<String, Reply> {
        let query = slots
            .job_name()
            .ok_or_else(|| self.messages.missing_job_name())?;

        let jobs = self
            .ci
            .list_jobs()
            .await
            .map_err(|e| self.provider_error("list_jobs", &e))?;
        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();

        match self.resolver.resolve(query, &names) {
            Some(resolution) => {
                metrics::counter!(
                    "voice_ci_name_resolutions_total",
                    "tier" => resolution.tier.as_str()
                )
                .increment(1);
                Ok(resolution.name)
            }
            None => {
                metrics::counter!("voice_ci_name_resolutions_total", "tier" => "none").increment(1);
                tracing::info!(query, candidates = names.len(), "No job matches spoken name");
                Err(self.messages.job_not_found(query))
            }
        }
    }

    fn build_number(&self, slots: &SlotMap) -> Result<u32, Reply> {
        let raw = slots
            .build_number()
            .ok_or_else(|| self.messages.missing_build_number())?;
        raw.parse::<u32>()
            .map_err(|_| self.messages.invalid_build_number(raw))
    }

    fn provider_error(&self, operation: &'static str, error: &CiError) -> Reply {
        self.record_provider_error(operation, error);
        self.messages.provider_error(&error.to_string())
    }

    fn record_provider_error(&self, operation: &'static str, error: &CiError) {
        tracing::warn!(
            provider = self.ci.name(),
            operation,
            kind = error.kind(),
            error = %error,
            "CI server call failed"
        );
        metrics::counter!(
            "voice_ci_provider_errors_total",
            "operation" => operation,
            "kind" => error.kind()
        )
        .increment(1);
    }

    fn decode_url(&self, url: Option<&str>) -> String {
        match url {
            Some(url) => urlencoding::decode(url)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| url.to_string()),
            None => self.messages.no_url().to_string(),
        }
    }

    fn or_no_information<T: ToString>(&self, value: Option<T>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| self.messages.no_information().to_string())
    }
}
