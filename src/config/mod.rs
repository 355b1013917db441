//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Template expansion in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use jira_release::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(".jira-release.yml"),
//!     "site:\n  url: https://jira.example.com\nproject_key: PROJ\nrelease: ${VERSION}\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.project_key, "PROJ");
//! ```

pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, BuildEnvironment, Expander,
    Segment,
};
pub use loader::{default_config_path, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{AuthConfig, AuthType, ReleaseConfig, ReleaseTemplates, SiteConfig};
pub use validator::{validate, validate_config, ValidationError};
