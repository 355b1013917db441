//! Build log output.
//!
//! This module provides:
//! - [`BuildListener`] trait, the sink the release outcome is reported to
//! - [`TerminalListener`] writing styled lines to stdout/stderr
//! - [`MockListener`] capturing lines for assertions
//!
//! # Example
//!
//! ```
//! use jira_release::ui::{BuildListener, MockListener};
//!
//! let mut log = MockListener::new();
//! log.success("Released version 1.2.0 in project PROJ");
//! assert_eq!(log.successes().len(), 1);
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockListener;
pub use terminal::TerminalListener;
pub use theme::{should_use_colors, ReleaseTheme};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every line.
    #[default]
    Normal,
    /// Show errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows non-error lines.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Sink for lines destined to the build log.
pub trait BuildListener {
    /// A neutral informational line.
    fn message(&mut self, msg: &str);

    /// The action changed tracker state successfully.
    fn success(&mut self, msg: &str);

    /// The action completed without needing to change anything.
    fn skipped(&mut self, msg: &str);

    /// A fatal error, the build will be marked failed.
    fn fatal_error(&mut self, msg: &str);

    /// One line of diagnostic context following a fatal error.
    fn trace(&mut self, line: &str);
}
