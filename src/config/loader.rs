//! Configuration file discovery and loading.

use crate::config::schema::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".jira-release.yml";

/// Default config location for a directory.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load a single config file and parse it into [`ReleaseConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ReleaseConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReleaseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReleaseError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`ReleaseConfig`].
///
/// An empty document yields the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ReleaseConfig> {
    if content.trim().is_empty() {
        return Ok(ReleaseConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ReleaseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, `.jira-release.yml` in `root`
/// is used when present; otherwise everything comes from the command line.
pub fn load_config(root: &Path, config_override: Option<&Path>) -> Result<ReleaseConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let path = default_config_path(root);
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
        Ok(ReleaseConfig::default())
    }
}
