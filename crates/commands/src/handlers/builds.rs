//! Build handlers

use voice_ci_core::{CiError, SlotMap};

use super::CommandHandlers;
use crate::messages::BuildInfoView;

impl CommandHandlers {
    pub(super) async fn stop_job_build(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let number = match self.build_number(slots) {
            Ok(number) => number,
            Err(reply) => return reply,
        };

        match self.ci.stop_build(&job, number).await {
            Ok(()) => {
                tracing::info!(job = %job, number, "Build stopped");
                self.messages.build_stopped(&job, number)
            }
            Err(CiError::NotFound(_)) => self.messages.build_not_found(&job, number),
            Err(e) => {
                self.record_provider_error("stop_build", &e);
                self.messages.stop_failed(&job, number, &e.to_string())
            }
        }
    }

    pub(super) async fn get_builds_list(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let info = match self.ci.job_info(&job).await {
            Ok(info) => info,
            Err(CiError::NotFound(_)) => return self.messages.job_not_found(&job),
            Err(e) => return self.provider_error("job_info", &e),
        };

        let mut builds = Vec::with_capacity(info.builds.len());
        for build_ref in &info.builds {
            let build = match self.ci.build_info(&job, build_ref.number).await {
                Ok(build) => build,
                Err(e) => return self.provider_error("build_info", &e),
            };
            let result = build
                .result
                .unwrap_or_else(|| self.messages.in_progress().to_string());
            builds.push((build_ref.number, result, self.decode_url(build.url.as_deref())));
        }
        self.messages.builds_list(&builds)
    }

    pub(super) async fn get_build_info(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let number = match self.build_number(slots) {
            Ok(number) => number,
            Err(reply) => return reply,
        };
        let build = match self.ci.build_info(&job, number).await {
            Ok(build) => build,
            Err(CiError::NotFound(_)) => return self.messages.build_not_found(&job, number),
            Err(e) => return self.provider_error("build_info", &e),
        };

        let result = match (build.result, build.building) {
            (Some(result), _) => result,
            (None, true) => self.messages.in_progress().to_string(),
            (None, false) => self.messages.no_information().to_string(),
        };
        let view = BuildInfoView {
            number: self.or_no_information(build.number),
            result,
            url: self.decode_url(build.url.as_deref()),
            started: self.or_no_information(
                build
                    .timestamp
                    .and_then(|ms| self.messages.format_timestamp(ms)),
            ),
            duration: self.or_no_information(
                build.duration.map(|ms| self.messages.format_duration(ms)),
            ),
            building: build.building,
        };
        self.messages.build_info(&view)
    }

    pub(super) async fn get_job_build_console_output(&self, slots: &SlotMap) -> String {
        let job = match self.resolve_job(slots).await {
            Ok(job) => job,
            Err(reply) => return reply,
        };
        let number = match self.build_number(slots) {
            Ok(number) => number,
            Err(reply) => return reply,
        };

        match self.ci.build_console_output(&job, number).await {
            Ok(output) => self.messages.console_output(&job, number, &output),
            Err(CiError::NotFound(_)) => self.messages.build_not_found(&job, number),
            Err(e) => self.provider_error("build_console_output", &e),
        }
    }
}
