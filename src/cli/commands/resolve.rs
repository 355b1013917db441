//! Resolve command implementation.
//!
//! `jira-release resolve` expands the project key and release name the same
//! way `release` does, without contacting the tracker. Placeholders that
//! stay unexpanded are listed as warnings.

use std::path::{Path, PathBuf};

use crate::cli::args::TemplateArgs;
use crate::config::{extract_variables, load_config, BuildEnvironment};
use crate::error::Result;
use crate::release::{report, resolve, Outcome};
use crate::ui::BuildListener;

use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: TemplateArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>, args: TemplateArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, listener: &mut dyn BuildListener) -> Result<CommandResult> {
        let mut config = load_config(&self.working_dir, self.config_path.as_deref())?;
        self.args.apply(&mut config);
        let env = BuildEnvironment::from_process().with_overrides(&self.args.env)?;

        match resolve(&config.templates(), &env) {
            Ok(request) => {
                listener.message(&format!("project_key: {}", request.project_key));
                listener.message(&format!("release: {}", request.release_name));

                let mut undefined: Vec<String> = extract_variables(&request.project_key)
                    .into_iter()
                    .chain(extract_variables(&request.release_name))
                    .filter(|name| env.resolve(name).is_none())
                    .collect();
                undefined.sort();
                undefined.dedup();
                for name in undefined {
                    tracing::warn!("Variable {} is not defined", name);
                    listener.message(&format!("warning: ${{{}}} is not defined", name));
                }

                Ok(CommandResult::success())
            }
            Err(err) => Ok(report(&Outcome::Failed(err), listener).into()),
        }
    }
}
