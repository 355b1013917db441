//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `.jira-release.yml` file format.

use serde::{Deserialize, Serialize};

/// Root configuration structure for `.jira-release.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Issue tracker connection settings.
    pub site: SiteConfig,

    /// Project key template, e.g. `${JIRA_PROJECT}`.
    pub project_key: String,

    /// Release name template, e.g. `${BUILD_VERSION}`.
    pub release: String,
}

impl ReleaseConfig {
    /// The templates the release engine expands on every build.
    pub fn templates(&self) -> ReleaseTemplates {
        ReleaseTemplates {
            project_key: self.project_key.clone(),
            release_name: self.release.clone(),
        }
    }
}

/// The user-supplied pair of templates evaluated per build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTemplates {
    /// Template resolving to the tracker project key.
    pub project_key: String,
    /// Template resolving to the version name to release.
    pub release_name: String,
}

impl ReleaseTemplates {
    /// Create templates from borrowed strings.
    pub fn new(project_key: impl Into<String>, release_name: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            release_name: release_name.into(),
        }
    }
}

/// Issue tracker site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the tracker, e.g. `https://jira.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Authentication settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: None,
            auth: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// How requests to the tracker are authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Authentication scheme.
    #[serde(rename = "type", default)]
    pub auth_type: AuthType,

    /// Account name, required for basic auth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Environment variable holding the API token or password.
    pub token_env: String,
}

/// Supported authentication schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// HTTP basic auth with username and API token.
    #[default]
    Basic,
    /// `Authorization: Bearer <token>` (personal access tokens).
    Bearer,
}
