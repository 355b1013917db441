//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AuthArg, Cli, Commands, ReleaseArgs, TemplateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
