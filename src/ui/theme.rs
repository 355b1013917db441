//! Visual theme and styling.

use console::Style;

/// Styles for build log lines.
#[derive(Debug, Clone)]
pub struct ReleaseTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for "nothing to do" messages (dim).
    pub skipped: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for cause lines under an error (dim).
    pub trace: Style,
}

impl Default for ReleaseTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            skipped: Style::new().dim(),
            error: Style::new().red().bold(),
            trace: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            skipped: Style::new(),
            error: Style::new(),
            trace: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.skipped.apply_to(format!("○ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format one line of an error's cause chain.
    pub fn format_trace(&self, line: &str) -> String {
        format!("{}", self.trace.apply_to(format!("    caused by: {}", line)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
