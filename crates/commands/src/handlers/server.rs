//! Server-wide handlers

use super::CommandHandlers;

impl CommandHandlers {
    pub(super) async fn get_server_info(&self) -> String {
        let info = match self.ci.server_info().await {
            Ok(info) => info,
            Err(e) => return self.provider_error("server_info", &e),
        };

        let version = self.or_no_information(info.version.as_deref());
        let mode = self.or_no_information(info.mode.as_deref());
        let executors = self.or_no_information(info.num_executors);

        self.messages.server_info(
            &version,
            &mode,
            &executors,
            info.quieting_down,
            &info.job_names(),
        )
    }

    pub(super) async fn get_all_jobs(&self) -> String {
        match self.ci.list_jobs().await {
            Ok(jobs) => {
                let names: Vec<String> = jobs.into_iter().map(|j| j.name).collect();
                self.messages.all_jobs(&names)
            }
            Err(e) => self.provider_error("list_jobs", &e),
        }
    }
}
