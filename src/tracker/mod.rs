//! Issue tracker collaborators.
//!
//! The release engine only talks to the tracker through two traits:
//! - [`VersionDirectory`] lists the versions of a project
//! - [`ReleaseInvoker`] flips one version to released
//!
//! [`JiraClient`] implements both over the Jira REST API.

pub mod auth;
pub mod jira;

pub use auth::{resolve_auth, Credentials};
pub use jira::JiraClient;

use serde::{Deserialize, Serialize};

/// A release milestone as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Tracker-side identifier.
    #[serde(default)]
    pub id: String,
    /// Version name, matched exactly against the release name.
    pub name: String,
    /// Whether the version is already released.
    #[serde(default)]
    pub released: bool,
}

impl Version {
    /// Create a version without a tracker id.
    pub fn new(name: impl Into<String>, released: bool) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            released,
        }
    }
}

/// Source of a project's version set.
pub trait VersionDirectory {
    /// Return every version known for `project_key`.
    ///
    /// Fails if the project is unknown or the tracker is unreachable.
    fn list_versions(&self, project_key: &str) -> anyhow::Result<Vec<Version>>;
}

/// Performs the remote "mark as released" transition.
pub trait ReleaseInvoker {
    /// Mark `release_name` in `project_key` as released.
    fn release_version(&self, project_key: &str, release_name: &str) -> anyhow::Result<()>;
}

impl<T: VersionDirectory + ?Sized> VersionDirectory for &T {
    fn list_versions(&self, project_key: &str) -> anyhow::Result<Vec<Version>> {
        (**self).list_versions(project_key)
    }
}

impl<T: ReleaseInvoker + ?Sized> ReleaseInvoker for &T {
    fn release_version(&self, project_key: &str, release_name: &str) -> anyhow::Result<()> {
        (**self).release_version(project_key, release_name)
    }
}
