//! CI server collaborator

use crate::ci::{BuildInfo, JobInfo, JobSummary, ServerInfo};
use crate::error::CiError;
use async_trait::async_trait;

/// CI automation server interface
///
/// Every call queries live state; implementations must not cache.
///
/// Implementations:
/// - `JenkinsClient` - Jenkins JSON API over HTTP
/// - `StubCiServer` - in-memory fixture for tests and offline runs
#[async_trait]
pub trait CiServer: Send + Sync {
    /// Server-wide information including the job list
    async fn server_info(&self) -> Result<ServerInfo, CiError>;

    /// Names and status of all jobs
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, CiError>;

    async fn job_info(&self, name: &str) -> Result<JobInfo, CiError>;

    async fn build_info(&self, name: &str, number: u32) -> Result<BuildInfo, CiError>;

    async fn build_console_output(&self, name: &str, number: u32) -> Result<String, CiError>;

    async fn stop_build(&self, name: &str, number: u32) -> Result<(), CiError>;

    /// Queue a build; parameterized jobs are started with their default values
    async fn build_job(&self, name: &str, parameterized: bool) -> Result<(), CiError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
