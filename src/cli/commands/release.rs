//! Release command implementation.
//!
//! The `jira-release release` command is the post-build action: it loads the
//! site settings, connects to the tracker and runs the release engine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::ReleaseArgs;
use crate::config::{load_config, validate, BuildEnvironment, ReleaseConfig};
use crate::error::{ReleaseError, Result};
use crate::release::{evaluate, report};
use crate::tracker::{resolve_auth, JiraClient};
use crate::ui::BuildListener;

use super::dispatcher::{Command, CommandResult};

/// The release command implementation.
pub struct ReleaseCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: ReleaseArgs,
}

impl ReleaseCommand {
    /// Create a new release command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>, args: ReleaseArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Load the config file and overlay the command-line values.
    fn load(&self) -> Result<ReleaseConfig> {
        let mut config = load_config(&self.working_dir, self.config_path.as_deref())?;
        self.args.apply(&mut config);
        validate(&config)?;
        Ok(config)
    }

    fn connect(&self, config: &ReleaseConfig, env: &BuildEnvironment) -> Result<JiraClient> {
        let site = &config.site;
        let url = site
            .url
            .as_deref()
            .ok_or_else(|| ReleaseError::ConfigValidationError {
                message: "site.url is required".to_string(),
            })?;

        let credentials = match &site.auth {
            Some(auth) => Some(resolve_auth(auth, &env.overrides)?),
            None => None,
        };
        tracing::debug!("Connecting to {} with {:?}", url, credentials);

        let client =
            JiraClient::with_timeout(url, credentials, Duration::from_secs(site.timeout_secs))?;
        Ok(client)
    }
}

impl Command for ReleaseCommand {
    fn execute(&self, listener: &mut dyn BuildListener) -> Result<CommandResult> {
        let config = self.load()?;
        let env = BuildEnvironment::from_process().with_overrides(&self.args.templates.env)?;
        let client = self.connect(&config, &env)?;

        let outcome = evaluate(&config.templates(), &env, &client, &client);
        Ok(report(&outcome, listener).into())
    }
}
