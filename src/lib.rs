//! jira-release - mark an issue-tracker version as released after a build.
//!
//! Run at the end of a CI build, the action expands a templated project key
//! and release name, finds the single version with that exact name and
//! releases it unless it already is. Any failure fails the build.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, validation and template expansion
//! - [`error`] - Error types and result aliases
//! - [`release`] - Release decision engine and build reporting
//! - [`tracker`] - Issue tracker collaborators and the Jira REST client
//! - [`ui`] - Build log output
//!
//! # Example
//!
//! ```
//! use jira_release::config::{BuildEnvironment, ReleaseTemplates};
//! use jira_release::release::{evaluate, Outcome};
//! use jira_release::tracker::{ReleaseInvoker, Version, VersionDirectory};
//!
//! struct Fixed;
//!
//! impl VersionDirectory for Fixed {
//!     fn list_versions(&self, _project: &str) -> anyhow::Result<Vec<Version>> {
//!         Ok(vec![Version::new("1.2.0", true)])
//!     }
//! }
//!
//! impl ReleaseInvoker for Fixed {
//!     fn release_version(&self, _project: &str, _name: &str) -> anyhow::Result<()> {
//!         unreachable!("already released")
//!     }
//! }
//!
//! let templates = ReleaseTemplates::new("PROJ", "${VERSION}");
//! let env = BuildEnvironment::new().with_var("VERSION", "1.2.0");
//! let outcome = evaluate(&templates, &env, &Fixed, &Fixed);
//! assert!(matches!(outcome, Outcome::AlreadyReleased(_)));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod release;
pub mod tracker;
pub mod ui;

pub use error::{ReleaseError, Result};
