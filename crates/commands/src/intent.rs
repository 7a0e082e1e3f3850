//! Command intent registry
//!
//! The closed set of intents with a handler. Lookup by name is the only way
//! in; a name outside this set is an unregistered intent.

use serde::{Deserialize, Serialize};
use voice_ci_core::SlotKind;

/// Name of the fallback intent
pub const UNKNOWN_ACTION: &str = "unknown_action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandIntent {
    GetServerInfo,
    GetAllJobs,
    GetJobInfo,
    TriggerJobBuild,
    StopJobBuild,
    GetBuildsList,
    GetBuildInfo,
    GetJobBuildConsoleOutput,
    GetJobParameters,
    GetJobParameterValue,
    UnknownAction,
}

impl CommandIntent {
    pub const ALL: [CommandIntent; 11] = [
        CommandIntent::GetServerInfo,
        CommandIntent::GetAllJobs,
        CommandIntent::GetJobInfo,
        CommandIntent::TriggerJobBuild,
        CommandIntent::StopJobBuild,
        CommandIntent::GetBuildsList,
        CommandIntent::GetBuildInfo,
        CommandIntent::GetJobBuildConsoleOutput,
        CommandIntent::GetJobParameters,
        CommandIntent::GetJobParameterValue,
        CommandIntent::UnknownAction,
    ];

    /// Registry lookup by NLU intent name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandIntent::GetServerInfo => "get_server_info",
            CommandIntent::GetAllJobs => "get_all_jobs",
            CommandIntent::GetJobInfo => "get_job_info",
            CommandIntent::TriggerJobBuild => "trigger_job_build",
            CommandIntent::StopJobBuild => "stop_job_build",
            CommandIntent::GetBuildsList => "get_builds_list",
            CommandIntent::GetBuildInfo => "get_build_info",
            CommandIntent::GetJobBuildConsoleOutput => "get_job_build_console_output",
            CommandIntent::GetJobParameters => "get_job_parameters",
            CommandIntent::GetJobParameterValue => "get_job_parameter_value",
            CommandIntent::UnknownAction => UNKNOWN_ACTION,
        }
    }

    /// Slots the handler needs
    pub fn required_slots(&self) -> &'static [SlotKind] {
        match self {
            CommandIntent::GetServerInfo
            | CommandIntent::GetAllJobs
            | CommandIntent::UnknownAction => &[],
            CommandIntent::GetJobInfo
            | CommandIntent::TriggerJobBuild
            | CommandIntent::GetBuildsList
            | CommandIntent::GetJobParameters => &[SlotKind::JobName],
            CommandIntent::StopJobBuild
            | CommandIntent::GetBuildInfo
            | CommandIntent::GetJobBuildConsoleOutput => {
                &[SlotKind::JobName, SlotKind::BuildNumber]
            }
            CommandIntent::GetJobParameterValue => &[SlotKind::JobName, SlotKind::ParameterName],
        }
    }
}

impl std::fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for intent in CommandIntent::ALL {
            assert_eq!(CommandIntent::from_name(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn test_unregistered() {
        assert_eq!(CommandIntent::from_name("delete_job"), None);
        assert_eq!(CommandIntent::from_name(""), None);
        assert_eq!(
            CommandIntent::from_name(UNKNOWN_ACTION),
            Some(CommandIntent::UnknownAction)
        );
    }

    #[test]
    fn test_required_slots() {
        assert!(CommandIntent::GetAllJobs.required_slots().is_empty());
        assert_eq!(
            CommandIntent::GetBuildInfo.required_slots(),
            &[SlotKind::JobName, SlotKind::BuildNumber]
        );
    }
}
