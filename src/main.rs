//! jira-release CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use jira_release::cli::{Cli, CommandDispatcher};
use jira_release::ui::{BuildListener, OutputMode, ReleaseTheme, TerminalListener};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, the build log carries the outcome
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("jira_release=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jira_release=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("jira-release starting with args: {:?}", cli);

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut listener = if cli.no_color {
        TerminalListener::with_theme(mode, ReleaseTheme::plain())
    } else {
        TerminalListener::new(mode)
    };

    let working_dir = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::new(working_dir);

    match dispatcher.dispatch(&cli, &mut listener) {
        Ok(result) => ExitCode::from(result.process_exit_code()),
        Err(e) => {
            listener.fatal_error(&format!("Error: {}", e));
            for cause in e.causes() {
                listener.trace(&cause);
            }
            ExitCode::from(1)
        }
    }
}
