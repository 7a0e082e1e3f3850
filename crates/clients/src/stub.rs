//! In-memory collaborators
//!
//! Used by tests and by offline runs (`jenkins.stub = true`).

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use voice_ci_core::{
    BuildInfo, BuildRef, CiError, CiServer, JobInfo, JobProperty, JobSummary, NluEngine,
    NluError, NluResult, ParameterDefinition, ParameterValue, ServerInfo,
};

#[derive(Debug, Clone)]
struct StubJob {
    info: JobInfo,
    builds: Vec<StubBuild>,
}

#[derive(Debug, Clone)]
struct StubBuild {
    info: BuildInfo,
    console: String,
}

/// In-memory CI server
///
/// Records state-changing calls so tests can assert on them.
#[derive(Debug, Default)]
pub struct StubCiServer {
    version: Option<String>,
    jobs: RwLock<Vec<StubJob>>,
    failure: RwLock<Option<CiError>>,
    triggered: RwLock<Vec<(String, bool)>>,
    stopped: RwLock<Vec<(String, u32)>>,
}

impl StubCiServer {
    pub fn new() -> Self {
        Self {
            version: Some("2.401.3".to_string()),
            ..Default::default()
        }
    }

    /// Sample server with a few jobs, builds and parameters
    pub fn demo() -> Self {
        let deploy = JobInfo {
            name: Some("deploy".into()),
            description: Some("Production rollout".into()),
            url: Some("http://localhost:8080/job/deploy/".into()),
            buildable: true,
            color: Some("blue".into()),
            property: vec![JobProperty {
                parameter_definitions: Some(vec![
                    parameter("BRANCH", "Git branch", Some("main")),
                    parameter("ENVIRONMENT", "Target environment", Some("staging")),
                ]),
            }],
            ..Default::default()
        };
        let backend = JobInfo {
            name: Some("backend".into()),
            url: Some("http://localhost:8080/job/backend/".into()),
            buildable: true,
            color: Some("red".into()),
            ..Default::default()
        };
        let frontend = JobInfo {
            name: Some("frontend".into()),
            url: Some("http://localhost:8080/job/frontend/".into()),
            buildable: true,
            color: Some("notbuilt".into()),
            ..Default::default()
        };

        Self::new()
            .with_job(deploy)
            .with_build(
                "deploy",
                build(1, Some("SUCCESS"), false),
                "Deploying main\nFinished: SUCCESS",
            )
            .with_build("deploy", build(2, None, true), "Deploying main")
            .with_job(backend)
            .with_build("backend", build(41, Some("SUCCESS"), false), "Finished: SUCCESS")
            .with_build(
                "backend",
                build(42, Some("FAILURE"), false),
                "error: tests failed\nFinished: FAILURE",
            )
            .with_job(frontend)
    }

    pub fn with_job(self, info: JobInfo) -> Self {
        self.jobs.write().push(StubJob {
            info,
            builds: Vec::new(),
        });
        self
    }

    /// Add a build to a job, updating the job's build references
    pub fn with_build(self, job: &str, mut info: BuildInfo, console: impl Into<String>) -> Self {
        {
            let mut jobs = self.jobs.write();
            if let Some(stub) = jobs.iter_mut().find(|j| j.info.name.as_deref() == Some(job)) {
                if info.url.is_none() {
                    if let (Some(job_url), Some(number)) = (&stub.info.url, info.number) {
                        info.url = Some(format!("{}{}/", job_url, number));
                    }
                }
                if let Some(number) = info.number {
                    let build_ref = BuildRef {
                        number,
                        url: info.url.clone(),
                    };
                    stub.info.builds.insert(0, build_ref.clone());
                    if stub.info.first_build.is_none() {
                        stub.info.first_build = Some(build_ref.clone());
                    }
                    stub.info.last_build = Some(build_ref.clone());
                    stub.info.next_build_number = Some(number + 1);
                    if !info.building {
                        stub.info.last_completed_build = Some(build_ref.clone());
                        match info.result.as_deref() {
                            Some("SUCCESS") => {
                                stub.info.last_successful_build = Some(build_ref.clone());
                                stub.info.last_stable_build = Some(build_ref);
                            }
                            Some(_) => {
                                stub.info.last_failed_build = Some(build_ref.clone());
                                stub.info.last_unsuccessful_build = Some(build_ref);
                            }
                            None => {}
                        }
                    }
                }
                stub.builds.push(StubBuild {
                    info,
                    console: console.into(),
                });
            }
        }
        self
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: CiError) {
        *self.failure.write() = Some(error);
    }

    /// Builds queued through `build_job`, with their parameterized flag
    pub fn triggered(&self) -> Vec<(String, bool)> {
        self.triggered.read().clone()
    }

    /// Builds stopped through `stop_build`
    pub fn stopped(&self) -> Vec<(String, u32)> {
        self.stopped.read().clone()
    }

    fn check_failure(&self) -> Result<(), CiError> {
        match self.failure.read().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn with_stub_job<T>(
        &self,
        name: &str,
        f: impl FnOnce(&StubJob) -> Result<T, CiError>,
    ) -> Result<T, CiError> {
        self.check_failure()?;
        let jobs = self.jobs.read();
        let job = jobs
            .iter()
            .find(|j| j.info.name.as_deref() == Some(name))
            .ok_or_else(|| CiError::NotFound(name.to_string()))?;
        f(job)
    }

    fn find_build<'a>(job: &'a StubJob, name: &str, number: u32) -> Result<&'a StubBuild, CiError> {
        job.builds
            .iter()
            .find(|b| b.info.number == Some(number))
            .ok_or_else(|| CiError::NotFound(format!("{} #{}", name, number)))
    }
}

fn parameter(name: &str, description: &str, default: Option<&str>) -> ParameterDefinition {
    ParameterDefinition {
        name: name.to_string(),
        description: Some(description.to_string()),
        kind: Some("StringParameterDefinition".to_string()),
        default_parameter_value: Some(ParameterValue {
            value: default.map(|v| serde_json::Value::String(v.to_string())),
        }),
    }
}

fn build(number: u32, result: Option<&str>, building: bool) -> BuildInfo {
    BuildInfo {
        number: Some(number),
        result: result.map(str::to_string),
        url: None,
        timestamp: Some(1_700_000_000_000 + i64::from(number) * 3_600_000),
        duration: Some(if building { 0 } else { 95_000 }),
        building,
    }
}

#[async_trait]
impl CiServer for StubCiServer {
    async fn server_info(&self) -> Result<ServerInfo, CiError> {
        self.check_failure()?;
        let jobs = self.list_jobs().await?;
        Ok(ServerInfo {
            version: self.version.clone(),
            mode: Some("NORMAL".to_string()),
            num_executors: Some(2),
            quieting_down: false,
            jobs,
        })
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, CiError> {
        self.check_failure()?;
        Ok(self
            .jobs
            .read()
            .iter()
            .filter_map(|j| {
                let name = j.info.name.clone()?;
                Some(JobSummary {
                    name,
                    url: j.info.url.clone(),
                    color: j.info.color.clone(),
                })
            })
            .collect())
    }

    async fn job_info(&self, name: &str) -> Result<JobInfo, CiError> {
        self.with_stub_job(name, |job| Ok(job.info.clone()))
    }

    async fn build_info(&self, name: &str, number: u32) -> Result<BuildInfo, CiError> {
        self.with_stub_job(name, |job| {
            Self::find_build(job, name, number).map(|b| b.info.clone())
        })
    }

    async fn build_console_output(&self, name: &str, number: u32) -> Result<String, CiError> {
        self.with_stub_job(name, |job| {
            Self::find_build(job, name, number).map(|b| b.console.clone())
        })
    }

    async fn stop_build(&self, name: &str, number: u32) -> Result<(), CiError> {
        self.with_stub_job(name, |job| Self::find_build(job, name, number).map(|_| ()))?;
        self.stopped.write().push((name.to_string(), number));
        Ok(())
    }

    async fn build_job(&self, name: &str, parameterized: bool) -> Result<(), CiError> {
        self.with_stub_job(name, |_| Ok(()))?;
        self.triggered.write().push((name.to_string(), parameterized));
        Ok(())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// NLU answering from a fixed text -> result script
///
/// Unscripted text yields a result without an intent.
#[derive(Debug, Default)]
pub struct ScriptedNlu {
    script: HashMap<String, NluResult>,
    failure: Option<NluError>,
}

impl ScriptedNlu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: impl Into<String>, result: NluResult) -> Self {
        self.script.insert(text.into(), result);
        self
    }

    /// NLU that fails every request
    pub fn failing(error: NluError) -> Self {
        Self {
            script: HashMap::new(),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl NluEngine for ScriptedNlu {
    async fn parse(&self, text: &str) -> Result<NluResult, NluError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut result = self.script.get(text.trim()).cloned().unwrap_or_default();
        result.text = text.to_string();
        Ok(result)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
