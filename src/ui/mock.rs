//! Mock build log for testing.
//!
//! `MockListener` implements [`BuildListener`] and captures every line
//! for later assertion.

use super::BuildListener;

/// Captures build log lines by kind.
#[derive(Debug, Default)]
pub struct MockListener {
    messages: Vec<String>,
    successes: Vec<String>,
    skipped: Vec<String>,
    errors: Vec<String>,
    traces: Vec<String>,
}

impl MockListener {
    /// Create an empty listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational lines.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Success lines.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// "Nothing to do" lines.
    pub fn skipped_lines(&self) -> &[String] {
        &self.skipped
    }

    /// Fatal error lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Cause-chain lines.
    pub fn traces(&self) -> &[String] {
        &self.traces
    }
}

impl BuildListener for MockListener {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skipped.push(msg.to_string());
    }

    fn fatal_error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn trace(&mut self, line: &str) {
        self.traces.push(line.to_string());
    }
}
