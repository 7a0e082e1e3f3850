//! Jenkins JSON API client
//!
//! Every call goes to the server; nothing is cached between calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use voice_ci_core::{BuildInfo, CiError, CiServer, JobInfo, JobSummary, ServerInfo};

/// Header carrying the Jenkins version
const VERSION_HEADER: &str = "X-Jenkins";
/// Longest error body quoted back in an error
const MAX_ERROR_BODY: usize = 200;

/// Configuration for the Jenkins client
#[derive(Debug, Clone)]
pub struct JenkinsClientConfig {
    /// Base URL, e.g. `http://localhost:8080`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for JenkinsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Jenkins server over its JSON REST API
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    base_url: Url,
    client: Client,
}

impl JenkinsClient {
    pub fn new(config: JenkinsClientConfig) -> Result<Self, voice_ci_core::Error> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            voice_ci_core::Error::Config(format!(
                "Invalid Jenkins URL '{}': {}",
                config.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(voice_ci_core::Error::Config(format!(
                "Jenkins URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| voice_ci_core::Error::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL under the base with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CiError::InvalidResponse("Jenkins base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a job, expanding folders (`team/deploy` -> `job/team/job/deploy`)
    fn job_endpoint(&self, name: &str, rest: &[&str]) -> Result<Url, CiError> {
        let mut segments = Vec::new();
        for part in name.split('/').filter(|p| !p.is_empty()) {
            segments.push("job");
            segments.push(part);
        }
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    async fn get(&self, url: Url, what: &str) -> Result<Response, CiError> {
        tracing::debug!(%url, "Jenkins GET");
        let response = self.client.get(url).send().await.map_err(network_error)?;
        check_status(response, what).await
    }

    async fn post(&self, url: Url, what: &str) -> Result<Response, CiError> {
        tracing::debug!(%url, "Jenkins POST");
        let response = self.client.post(url).send().await.map_err(network_error)?;
        check_status(response, what).await
    }
}

fn network_error(err: reqwest::Error) -> CiError {
    CiError::Network(err.to_string())
}

fn invalid_response(err: reqwest::Error) -> CiError {
    CiError::InvalidResponse(err.to_string())
}

async fn check_status(response: Response, what: &str) -> Result<Response, CiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(CiError::NotFound(what.to_string()));
    }
    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        if body.chars().count() > MAX_ERROR_BODY {
            body = body.chars().take(MAX_ERROR_BODY).collect();
        }
        return Err(CiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

#[async_trait]
impl CiServer for JenkinsClient {
    async fn server_info(&self) -> Result<ServerInfo, CiError> {
        let mut url = self.endpoint(&["api", "json"])?;
        url.set_query(Some("tree=mode,numExecutors,quietingDown,jobs[name,url,color]"));

        let response = self.get(url, "server").await?;
        let version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut info: ServerInfo = response.json().await.map_err(invalid_response)?;
        if info.version.is_none() {
            info.version = version;
        }
        Ok(info)
    }

    async fn list_jobs(&self) -> Result<Vec<JobSummary>, CiError> {
        let mut url = self.endpoint(&["api", "json"])?;
        url.set_query(Some("tree=jobs[name,url,color]"));

        let info: ServerInfo = self
            .get(url, "server")
            .await?
            .json()
            .await
            .map_err(invalid_response)?;
        Ok(info.jobs)
    }

    async fn job_info(&self, name: &str) -> Result<JobInfo, CiError> {
        let url = self.job_endpoint(name, &["api", "json"])?;
        self.get(url, name)
            .await?
            .json()
            .await
            .map_err(invalid_response)
    }

    async fn build_info(&self, name: &str, number: u32) -> Result<BuildInfo, CiError> {
        let number = number.to_string();
        let url = self.job_endpoint(name, &[&number, "api", "json"])?;
        self.get(url, &format!("{} #{}", name, number))
            .await?
            .json()
            .await
            .map_err(invalid_response)
    }

    async fn build_console_output(&self, name: &str, number: u32) -> Result<String, CiError> {
        let number = number.to_string();
        let url = self.job_endpoint(name, &[&number, "consoleText"])?;
        self.get(url, &format!("{} #{}", name, number))
            .await?
            .text()
            .await
            .map_err(invalid_response)
    }

    async fn stop_build(&self, name: &str, number: u32) -> Result<(), CiError> {
        let number = number.to_string();
        let url = self.job_endpoint(name, &[&number, "stop"])?;
        self.post(url, &format!("{} #{}", name, number)).await?;
        tracing::info!(job = %name, build = %number, "Requested build stop");
        Ok(())
    }

    async fn build_job(&self, name: &str, parameterized: bool) -> Result<(), CiError> {
        let action = if parameterized {
            "buildWithParameters"
        } else {
            "build"
        };
        let url = self.job_endpoint(name, &[action])?;
        self.post(url, name).await?;
        tracing::info!(job = %name, parameterized, "Queued build");
        Ok(())
    }

    fn name(&self) -> &str {
        "jenkins"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> JenkinsClient {
        JenkinsClient::new(JenkinsClientConfig {
            base_url: "http://ci.local:8080/jenkins/".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_job_endpoint_encodes_names() {
        let url = client().job_endpoint("my job", &["api", "json"]).unwrap();
        assert_eq!(url.as_str(), "http://ci.local:8080/jenkins/job/my%20job/api/json");
    }

    #[test]
    fn test_job_endpoint_folders() {
        let url = client().job_endpoint("team/deploy", &["7", "stop"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://ci.local:8080/jenkins/job/team/job/deploy/7/stop"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = JenkinsClient::new(JenkinsClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
