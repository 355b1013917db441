//! Error types for release operations.
//!
//! This module defines [`ReleaseError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Tracker collaborators return `anyhow::Result`; the release engine wraps
//!   their failures into the typed variants below and keeps the original
//!   error as the `source`
//! - Use `anyhow::Error` (via `ReleaseError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for release operations.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The release name (or project key) resolved to an empty string.
    #[error("Invalid release configuration: {message}")]
    Configuration {
        message: String,
        project_key: String,
        release_name: String,
    },

    /// A template could not be expanded against the build environment.
    #[error("Failed to expand '{template}'")]
    Expansion {
        template: String,
        #[source]
        source: anyhow::Error,
    },

    /// The version set of a project could not be retrieved.
    #[error("Unable to list versions of project {project_key}")]
    Lookup {
        project_key: String,
        release_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Zero or several versions carry the requested name.
    #[error("Expected exactly one version named '{release_name}' in project {project_key}, found {matches}")]
    AmbiguousOrMissingVersion {
        project_key: String,
        release_name: String,
        matches: usize,
    },

    /// The tracker rejected or failed the release call.
    #[error("Release of version '{release_name}' in project {project_key} failed")]
    ReleaseInvocation {
        project_key: String,
        release_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A collaborator panicked while the release was evaluated.
    #[error("Release aborted: {message}")]
    Panicked { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReleaseError {
    /// Walk the `source` chain, outermost first, excluding `self`.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }

    /// The `(release_name, project_key)` this error is about, once expanded.
    pub fn target(&self) -> Option<(&str, &str)> {
        match self {
            ReleaseError::Configuration {
                project_key,
                release_name,
                ..
            }
            | ReleaseError::Lookup {
                project_key,
                release_name,
                ..
            }
            | ReleaseError::AmbiguousOrMissingVersion {
                project_key,
                release_name,
                ..
            }
            | ReleaseError::ReleaseInvocation {
                project_key,
                release_name,
                ..
            } => Some((release_name.as_str(), project_key.as_str())),
            _ => None,
        }
    }
}

/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;
