//! Variable expansion for release templates.
//!
//! The project key and release name are templates expanded against the
//! build environment every time the action runs.
//!
//! # Syntax
//!
//! - `${VARIABLE}` - replaced with the variable's value
//! - `$VARIABLE` - same, the name runs over `[A-Za-z0-9_]`
//! - `$$` - produces a literal `$`
//!
//! Variables the environment does not define are left in the output exactly
//! as written, so `release-${UNSET}` stays `release-${UNSET}`.
//!
//! # Example
//!
//! ```
//! use jira_release::config::{BuildEnvironment, Expander};
//!
//! let env = BuildEnvironment::new().with_var("BUILD_VERSION", "1.2.0");
//! assert_eq!(env.expand("v${BUILD_VERSION}").unwrap(), "v1.2.0");
//! ```

use std::collections::{HashMap, HashSet};

/// Expands placeholders in a template string.
///
/// Implementations own the policy for undefined placeholders.
pub trait Expander {
    /// Expand every placeholder in `template`.
    fn expand(&self, template: &str) -> anyhow::Result<String>;
}

/// A segment of a template string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference, `braced` for `${name}` and bare for `$name`
    Variable { name: String, braced: bool },
}

impl Segment {
    fn variable(name: &str, braced: bool) -> Self {
        Segment::Variable {
            name: name.to_string(),
            braced,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a template into literal and variable segments.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                current_literal.push('$');
            }
            Some('{') => {
                chars.next(); // consume {

                let mut var_name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    var_name.push(c);
                }

                if closed && !var_name.is_empty() {
                    if !current_literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                    }
                    segments.push(Segment::variable(&var_name, true));
                } else {
                    // `${}` or an unterminated `${...` is plain text
                    current_literal.push_str("${");
                    current_literal.push_str(&var_name);
                    if closed {
                        current_literal.push('}');
                    }
                }
            }
            Some(next) if is_name_char(next) => {
                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    var_name.push(c);
                    chars.next();
                }

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                segments.push(Segment::variable(&var_name, false));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names referenced by a template.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable { name, .. } => Some(name),
            _ => None,
        })
        .collect()
}

/// Variables visible to a build.
///
/// Resolution order:
/// 1. Explicit overrides (`--env KEY=VALUE`)
/// 2. Process environment
#[derive(Debug, Clone, Default)]
pub struct BuildEnvironment {
    /// Values set on the command line.
    pub overrides: HashMap<String, String>,

    /// Variables inherited from the CI runner.
    pub env: HashMap<String, String>,
}

impl BuildEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            env: std::env::vars().collect(),
            ..Default::default()
        }
    }

    /// Add an override variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Add override variables from `KEY=VALUE` pairs.
    pub fn with_overrides<I, S>(mut self, pairs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Expected KEY=VALUE, got '{}'", pair))?;
            if key.is_empty() {
                anyhow::bail!("Empty variable name in '{}'", pair);
            }
            self.overrides.insert(key.to_string(), value.to_string());
        }
        Ok(self)
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.overrides
            .get(name)
            .or_else(|| self.env.get(name))
            .map(String::as_str)
    }
}

impl Expander for BuildEnvironment {
    fn expand(&self, template: &str) -> anyhow::Result<String> {
        let mut result = String::with_capacity(template.len());

        for segment in parse_interpolation(template) {
            match segment {
                Segment::Literal(text) => result.push_str(&text),
                Segment::Variable { name, braced } => match self.resolve(&name) {
                    Some(value) => result.push_str(value),
                    None if braced => {
                        tracing::debug!("Variable ${{{}}} is not defined, kept literal", name);
                        result.push_str("${");
                        result.push_str(&name);
                        result.push('}');
                    }
                    None => {
                        tracing::debug!("Variable ${} is not defined, kept literal", name);
                        result.push('$');
                        result.push_str(&name);
                    }
                },
            }
        }

        Ok(result)
    }
}
