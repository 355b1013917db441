//! Jira REST client.
//!
//! Implements [`VersionDirectory`] and [`ReleaseInvoker`] against the
//! Jira REST API v2:
//! - `GET  /rest/api/2/project/{key}/versions`
//! - `PUT  /rest/api/2/version/{id}`

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

use super::auth::Credentials;
use super::{ReleaseInvoker, Version, VersionDirectory};

/// Blocking client for a single Jira site.
pub struct JiraClient {
    base_url: Url,
    credentials: Option<Credentials>,
    client: Client,
    timeout: Duration,
}

/// Body of the version update call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseUpdate {
    released: bool,
    release_date: String,
}

impl JiraClient {
    /// Create a client with the default 30-second timeout.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        Self::with_timeout(base_url, credentials, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(
        base_url: &str,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid tracker URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid tracker URL '{}'", base_url);
        }

        let client = Client::builder()
            .user_agent(concat!("jira-release/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            credentials,
            client,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join REST path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid tracker URL '{}'", self.base_url))?
            .pop_if_empty()
            .extend(["rest", "api", "2"])
            .extend(segments);
        Ok(url)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.credentials {
            Some(credentials) => credentials.apply(request),
            None => request,
        }
    }

    fn find_version_id(&self, project_key: &str, release_name: &str) -> Result<String> {
        let versions = self.list_versions(project_key)?;
        let mut matching = versions.into_iter().filter(|v| v.name == release_name);

        match (matching.next(), matching.next()) {
            (Some(version), None) => Ok(version.id),
            (None, _) => bail!(
                "Version '{}' does not exist in project {}",
                release_name,
                project_key
            ),
            (Some(_), Some(_)) => bail!(
                "Version name '{}' is not unique in project {}",
                release_name,
                project_key
            ),
        }
    }
}

impl VersionDirectory for JiraClient {
    fn list_versions(&self, project_key: &str) -> Result<Vec<Version>> {
        let url = self.endpoint(&["project", project_key, "versions"])?;
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url.clone()))
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => bail!("Project {} not found at {}", project_key, self.base_url),
            status => bail!("HTTP {} fetching {}", status, url),
        }

        response
            .json::<Vec<Version>>()
            .with_context(|| format!("Failed to parse versions from {}", url))
    }
}

impl ReleaseInvoker for JiraClient {
    fn release_version(&self, project_key: &str, release_name: &str) -> Result<()> {
        let id = self.find_version_id(project_key, release_name)?;
        let url = self.endpoint(&["version", &id])?;
        let body = ReleaseUpdate {
            released: true,
            release_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        };
        tracing::debug!("PUT {} {:?}", url, body);

        let response = self
            .authorize(self.client.put(url.clone()))
            .json(&body)
            .send()
            .with_context(|| format!("Failed to update {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().unwrap_or_default();
            bail!("HTTP {} updating {}: {}", status, url, detail.trim());
        }

        Ok(())
    }
}
