//! Job handlers

use voice_ci_core::{BuildRef, CiError, SlotMap};

use super::CommandHandlers;
use crate::messages::JobInfoView;

impl CommandHandlers {
    pub(super) async fn get_job_info(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let info = match self.ci.job_info(&job).await {
            Ok(info) => info,
            Err(CiError::NotFound(_)) => return self.messages.job_not_found(&job),
            Err(e) => return self.provider_error("job_info", &e),
        };

        let number =
            |build: &Option<BuildRef>| self.or_no_information(build.as_ref().map(|b| b.number));
        let view = JobInfoView {
            name: info
                .name
                .clone()
                .unwrap_or_else(|| self.messages.unknown().to_string()),
            description: info
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(self.messages.no_description())
                .to_string(),
            url: self.decode_url(info.url.as_deref()),
            buildable: self.messages.yes_no(info.buildable).to_string(),
            color: info
                .color
                .clone()
                .unwrap_or_else(|| self.messages.unknown().to_string()),
            first_build: number(&info.first_build),
            last_build: number(&info.last_build),
            last_completed_build: number(&info.last_completed_build),
            last_failed_build: number(&info.last_failed_build),
            last_stable_build: number(&info.last_stable_build),
            last_successful_build: number(&info.last_successful_build),
            last_unstable_build: number(&info.last_unstable_build),
            last_unsuccessful_build: number(&info.last_unsuccessful_build),
            next_build_number: self.or_no_information(info.next_build_number),
            concurrent_build: self.messages.yes_no(info.concurrent_build).to_string(),
        };
        self.messages.job_info(&view)
    }

    pub(super) async fn trigger_job_build(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };

        let triggered = match self.ci.job_info(&job).await {
            Ok(info) => self.ci.build_job(&job, info.is_parameterized()).await,
            Err(e) => Err(e),
        };

        match triggered {
            Ok(()) => {
                tracing::info!(job = %job, "Build triggered");
                self.messages.job_triggered(&job)
            }
            Err(e) => {
                self.record_provider_error("build_job", &e);
                self.messages.trigger_failed(&job, &e.to_string())
            }
        }
    }

    pub(super) async fn get_job_parameters(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let info = match self.ci.job_info(&job).await {
            Ok(info) => info,
            Err(CiError::NotFound(_)) => return self.messages.job_not_found(&job),
            Err(e) => return self.provider_error("job_info", &e),
        };

        let parameters: Vec<(String, String)> = info
            .parameters()
            .iter()
            .map(|p| {
                let description = p
                    .description
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or(self.messages.no_description());
                (p.name.clone(), description.to_string())
            })
            .collect();
        self.messages.job_parameters(&parameters)
    }

    pub(super) async fn get_job_parameter_value(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let Some(query) = slots.parameter_name() else {
            return self.messages.missing_parameter_name();
        };
        let info = match self.ci.job_info(&job).await {
            Ok(info) => info,
            Err(CiError::NotFound(_)) => return self.messages.job_not_found(&job),
            Err(e) => return self.provider_error("job_info", &e),
        };

        let parameters = info.parameters();
        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
        let Some(resolution) = self.resolver.resolve(query, &names) else {
            tracing::info!(job = %job, query, "No parameter matches spoken name");
            return self.messages.parameter_not_found();
        };

        let parameter = &parameters[resolution.index];
        match parameter.default_value() {
            Some(value) => self.messages.parameter_value(&parameter.name, &value),
            None => self.messages.parameter_without_default(&parameter.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use voice_ci_clients::StubCiServer;
    use voice_ci_core::{
        BuildInfo, CiError, CiServer, JobInfo, JobSummary, Locale, ServerInfo, Slot, SlotMap,
    };
    use voice_ci_text_processing::ResolverConfig;

    use crate::handlers::CommandHandlers;
    use crate::intent::CommandIntent;

    fn handlers_for(ci: Arc<StubCiServer>) -> CommandHandlers {
        CommandHandlers::new(ci as Arc<dyn CiServer>, Locale::Russian, ResolverConfig::default())
    }

    fn job(name: &str) -> SlotMap {
        SlotMap::new().with(Slot::JobName(name.into()))
    }

    #[tokio::test]
    async fn test_job_info_placeholders() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let response = h.handle(CommandIntent::GetJobInfo, &job("frontend")).await;
        let message = response.message;
        assert!(message.starts_with("Информация о задаче frontend:\n"));
        assert!(message.contains("Описание: Нет описания.\n"));
        assert!(message.contains("Первая сборка: Нет информации.\n"));
        assert!(message.contains("Возможность запуска сборки: да.\n"));
        assert!(message.contains("Можно ли запустить параллельные сборки: нет.\n"));
    }

    #[tokio::test]
    async fn test_job_info_fields() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let message = h.handle(CommandIntent::GetJobInfo, &job("deploy")).await.message;
        assert!(message.contains("Описание: Production rollout.\n"));
        assert!(message.contains("Последняя сборка: 2.\n"));
        assert!(message.contains("Последняя завершенная сборка: 1.\n"));
        assert!(message.contains("Номер следующей сборки: 3.\n"));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let response = h.handle(CommandIntent::GetJobInfo, &job("инфраструктура")).await;
        assert_eq!(response.message, "Задача с именем инфраструктура не существует.");
    }

    #[tokio::test]
    async fn test_trigger_parameterized_job() {
        let ci = Arc::new(StubCiServer::demo());
        let h = handlers_for(ci.clone());
        let response = h.handle(CommandIntent::TriggerJobBuild, &job("deploy")).await;
        assert_eq!(response.message, "Задача deploy была запущена.");

        h.handle(CommandIntent::TriggerJobBuild, &job("backend")).await;
        assert_eq!(
            ci.triggered(),
            vec![("deploy".to_string(), true), ("backend".to_string(), false)]
        );
    }

    /// Delegates to the demo server but rejects every build request
    struct RejectingBuilds(StubCiServer);

    #[async_trait]
    impl CiServer for RejectingBuilds {
        async fn server_info(&self) -> Result<ServerInfo, CiError> {
            self.0.server_info().await
        }
        async fn list_jobs(&self) -> Result<Vec<JobSummary>, CiError> {
            self.0.list_jobs().await
        }
        async fn job_info(&self, name: &str) -> Result<JobInfo, CiError> {
            self.0.job_info(name).await
        }
        async fn build_info(&self, name: &str, number: u32) -> Result<BuildInfo, CiError> {
            self.0.build_info(name, number).await
        }
        async fn build_console_output(&self, name: &str, number: u32) -> Result<String, CiError> {
            self.0.build_console_output(name, number).await
        }
        async fn stop_build(&self, name: &str, number: u32) -> Result<(), CiError> {
            self.0.stop_build(name, number).await
        }
        async fn build_job(&self, _name: &str, _parameterized: bool) -> Result<(), CiError> {
            Err(CiError::Api {
                status: 500,
                message: "boom".into(),
            })
        }
        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[tokio::test]
    async fn test_trigger_failure_message() {
        let h = CommandHandlers::new(
            Arc::new(RejectingBuilds(StubCiServer::demo())),
            Locale::Russian,
            ResolverConfig::default(),
        );
        let response = h.handle(CommandIntent::TriggerJobBuild, &job("deploy")).await;
        assert_eq!(
            response.message,
            "Произошла ошибка при запуске задачи deploy: HTTP 500: boom"
        );
    }

    #[tokio::test]
    async fn test_provider_error_during_resolution() {
        let ci = Arc::new(StubCiServer::demo());
        ci.fail_with(CiError::Network("timed out".into()));
        let h = handlers_for(ci);
        let response = h.handle(CommandIntent::TriggerJobBuild, &job("deploy")).await;
        assert_eq!(response.message, "Ошибка: Network error: timed out");
    }

    #[tokio::test]
    async fn test_job_parameters() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let message = h.handle(CommandIntent::GetJobParameters, &job("deploy")).await.message;
        assert_eq!(
            message,
            "Параметры задачи:\nBRANCH: Git branch.\nENVIRONMENT: Target environment.\n"
        );

        let message = h.handle(CommandIntent::GetJobParameters, &job("backend")).await.message;
        assert_eq!(message, "Для этой задачи не определены параметры.");
    }

    #[tokio::test]
    async fn test_parameter_value_resolved_across_scripts() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let slots = job("deploy").with(Slot::ParameterName("бранч".into()));
        let message = h.handle(CommandIntent::GetJobParameterValue, &slots).await.message;
        assert_eq!(message, "Значение параметра BRANCH: main");
    }

    #[tokio::test]
    async fn test_parameter_not_found() {
        let h = handlers_for(Arc::new(StubCiServer::demo()));
        let slots = job("deploy").with(Slot::ParameterName("timeout".into()));
        let message = h.handle(CommandIntent::GetJobParameterValue, &slots).await.message;
        assert_eq!(message, "Параметр с таким именем не найден.");

        let message = h
            .handle(CommandIntent::GetJobParameterValue, &job("deploy"))
            .await
            .message;
        assert_eq!(message, "Назовите, пожалуйста, имя параметра.");
    }
}
