//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::release::BuildResult;
use crate::ui::BuildListener;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing its build log to `listener`.
    fn execute(&self, listener: &mut dyn BuildListener) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit code for the process, codes outside `0..=255` map to 1.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

impl From<BuildResult> for CommandResult {
    fn from(result: BuildResult) -> Self {
        match result {
            BuildResult::Unchanged => Self::success(),
            BuildResult::Failure => Self::failure(i32::from(result.exit_code())),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving config relative to `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, listener: &mut dyn BuildListener) -> Result<CommandResult> {
        let config_path = cli.config.as_deref();
        match &cli.command {
            Commands::Release(args) => {
                let cmd =
                    super::release::ReleaseCommand::new(&self.working_dir, config_path, args.clone());
                cmd.execute(listener)
            }
            Commands::Resolve(args) => {
                let cmd =
                    super::resolve::ResolveCommand::new(&self.working_dir, config_path, args.clone());
                cmd.execute(listener)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn process_exit_code_clamps_out_of_range_codes() {
        assert_eq!(CommandResult::success().process_exit_code(), 0);
        assert_eq!(CommandResult::failure(2).process_exit_code(), 2);
        assert_eq!(CommandResult::failure(256).process_exit_code(), 1);
        assert_eq!(CommandResult::failure(-1).process_exit_code(), 1);
    }

    #[test]
    fn command_result_from_build_result() {
        assert!(CommandResult::from(BuildResult::Unchanged).success);
        let failed = CommandResult::from(BuildResult::Failure);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, 1);
    }

    #[test]
    fn dispatcher_keeps_working_dir() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/ci/workspace"));
        assert_eq!(dispatcher.working_dir(), Path::new("/ci/workspace"));
    }
}
