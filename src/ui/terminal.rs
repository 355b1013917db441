//! Terminal build log.

use super::theme::{should_use_colors, ReleaseTheme};
use super::{BuildListener, OutputMode};

/// Writes build log lines to the terminal.
///
/// Errors and their traces go to stderr, everything else to stdout.
pub struct TerminalListener {
    mode: OutputMode,
    theme: ReleaseTheme,
}

impl TerminalListener {
    /// Create a listener, picking colors based on the terminal.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ReleaseTheme::new()
        } else {
            ReleaseTheme::plain()
        };
        Self { mode, theme }
    }

    /// Create a listener with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: ReleaseTheme) -> Self {
        Self { mode, theme }
    }

    /// Get the current output mode.
    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }
}

impl BuildListener for TerminalListener {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    fn fatal_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn trace(&mut self, line: &str) {
        eprintln!("{}", self.theme.format_trace(line));
    }
}
