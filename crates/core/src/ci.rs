//! CI server data model
//!
//! Field names follow the Jenkins JSON API (camelCase). Every field a server
//! may omit is optional so that handlers can substitute a placeholder.

use serde::{Deserialize, Serialize};

/// Top-level server information (`GET /api/json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Server version; Jenkins reports it in the `X-Jenkins` header
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub num_executors: Option<u32>,
    #[serde(default)]
    pub quieting_down: bool,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

impl ServerInfo {
    pub fn job_names(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.name.clone()).collect()
    }
}

/// Job entry as listed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Reference to a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRef {
    pub number: u32,
    #[serde(default)]
    pub url: Option<String>,
}

/// Detailed job information (`GET /job/{name}/api/json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub first_build: Option<BuildRef>,
    #[serde(default)]
    pub last_build: Option<BuildRef>,
    #[serde(default)]
    pub last_completed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_failed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_stable_build: Option<BuildRef>,
    #[serde(default)]
    pub last_successful_build: Option<BuildRef>,
    #[serde(default)]
    pub last_unstable_build: Option<BuildRef>,
    #[serde(default)]
    pub last_unsuccessful_build: Option<BuildRef>,
    #[serde(default)]
    pub next_build_number: Option<u32>,
    #[serde(default)]
    pub concurrent_build: bool,
    #[serde(default)]
    pub builds: Vec<BuildRef>,
    #[serde(default)]
    pub property: Vec<JobProperty>,
}

impl JobInfo {
    /// Parameter definitions from the first property that declares any
    pub fn parameters(&self) -> &[ParameterDefinition] {
        self.property
            .iter()
            .find_map(|p| p.parameter_definitions.as_deref())
            .unwrap_or(&[])
    }

    pub fn is_parameterized(&self) -> bool {
        !self.parameters().is_empty()
    }
}

/// Job property; only parameter definitions are of interest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProperty {
    #[serde(default)]
    pub parameter_definitions: Option<Vec<ParameterDefinition>>,
}

/// Build parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub default_parameter_value: Option<ParameterValue>,
}

impl ParameterDefinition {
    /// Default value rendered as text, if the definition carries one
    pub fn default_value(&self) -> Option<String> {
        let value = self.default_parameter_value.as_ref()?.value.as_ref()?;
        Some(match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Build details (`GET /job/{name}/{number}/api/json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub number: Option<u32>,
    /// `SUCCESS`, `FAILURE`, ...; null while building
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Start time, epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub building: bool,
}
