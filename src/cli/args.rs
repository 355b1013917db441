//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{AuthConfig, AuthType, ReleaseConfig};

/// Mark an issue-tracker version as released after a build.
#[derive(Debug, Parser)]
#[command(name = "jira-release")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .jira-release.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Release the configured version unless it is already released
    Release(ReleaseArgs),

    /// Print the expanded project key and release name
    Resolve(TemplateArgs),
}

/// Template inputs shared by every command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplateArgs {
    /// Project key, may reference variables like ${JIRA_PROJECT}
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// Release name, may reference variables like ${BUILD_VERSION}
    #[arg(long, env = "JIRA_RELEASE")]
    pub release: Option<String>,

    /// Extra build variable (repeatable)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,
}

impl TemplateArgs {
    /// Overlay the templates given on the command line onto `config`.
    pub fn apply(&self, config: &mut ReleaseConfig) {
        if let Some(project_key) = &self.project_key {
            config.project_key = project_key.clone();
        }
        if let Some(release) = &self.release {
            config.release = release.clone();
        }
    }
}

/// Authentication scheme selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    /// Username and API token
    Basic,
    /// Personal access token
    Bearer,
}

impl From<AuthArg> for AuthType {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::Basic => AuthType::Basic,
            AuthArg::Bearer => AuthType::Bearer,
        }
    }
}

/// Arguments for the `release` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub templates: TemplateArgs,

    /// Tracker base URL
    #[arg(long, env = "JIRA_URL")]
    pub url: Option<String>,

    /// Account name for basic auth
    #[arg(long, env = "JIRA_USER")]
    pub user: Option<String>,

    /// Environment variable holding the API token
    #[arg(long, value_name = "VAR")]
    pub token_env: Option<String>,

    /// Authentication scheme
    #[arg(long, value_enum)]
    pub auth: Option<AuthArg>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ReleaseArgs {
    /// Overlay command-line values onto `config`.
    ///
    /// Auth settings given on the command line are merged into the file's
    /// auth block, creating one when a token variable is named.
    pub fn apply(&self, config: &mut ReleaseConfig) {
        self.templates.apply(config);

        let site = &mut config.site;
        if let Some(url) = &self.url {
            site.url = Some(url.clone());
        }
        if let Some(timeout) = self.timeout {
            site.timeout_secs = timeout;
        }

        if let Some(token_env) = &self.token_env {
            let auth = site.auth.get_or_insert_with(|| AuthConfig {
                auth_type: AuthType::default(),
                username: None,
                token_env: String::new(),
            });
            auth.token_env = token_env.clone();
        }
        if let Some(auth) = site.auth.as_mut() {
            if let Some(user) = &self.user {
                auth.username = Some(user.clone());
            }
            if let Some(auth_type) = self.auth {
                auth.auth_type = auth_type.into();
            }
        }
    }
}
