//! Configuration validation rules.
//!
//! This module validates the connection settings:
//! - A site URL must be set and use http or https
//! - The request timeout must be positive
//! - Auth needs a token variable, basic auth also needs a username
//!
//! The project key and release templates are deliberately not checked here.
//! They are resolved per build and an empty result fails that build.

use crate::config::schema::{AuthType, ReleaseConfig};
use crate::error::{ReleaseError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ReleaseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let site = &config.site;

    match site.url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::new(
            "missing-url",
            "site.url is required (or pass --url / JIRA_URL)",
        )),
        Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
            errors.push(ValidationError::new(
                "invalid-url",
                format!("site.url '{}' must start with http:// or https://", url),
            ));
        }
        Some(_) => {}
    }

    if site.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "invalid-timeout",
            "site.timeout_secs must be greater than zero",
        ));
    }

    if let Some(auth) = &site.auth {
        if auth.token_env.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-token-env",
                "site.auth.token_env must name an environment variable",
            ));
        }
        let has_username = auth
            .username
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty());
        if auth.auth_type == AuthType::Basic && !has_username {
            errors.push(ValidationError::new(
                "missing-username",
                "site.auth.username is required for basic auth",
            ));
        }
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every problem found.
pub fn validate(config: &ReleaseConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ReleaseError::ConfigValidationError { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::AuthConfig;

    fn config_with_url(url: &str) -> ReleaseConfig {
        let mut config = ReleaseConfig::default();
        config.site.url = Some(url.to_string());
        config
    }

    fn rules(config: &ReleaseConfig) -> Vec<String> {
        validate_config(config).into_iter().map(|e| e.rule).collect()
    }

    #[test]
    fn valid_minimal_config() {
        assert!(validate(&config_with_url("https://jira.example.com")).is_ok());
    }

    #[test]
    fn missing_url_is_reported() {
        assert_eq!(rules(&ReleaseConfig::default()), vec!["missing-url"]);
    }

    #[test]
    fn non_http_url_is_reported() {
        assert_eq!(rules(&config_with_url("jira.example.com")), vec!["invalid-url"]);
    }

    #[test]
    fn zero_timeout_is_reported() {
        let mut config = config_with_url("https://jira.example.com");
        config.site.timeout_secs = 0;
        assert_eq!(rules(&config), vec!["invalid-timeout"]);
    }

    #[test]
    fn basic_auth_requires_username() {
        let mut config = config_with_url("https://jira.example.com");
        config.site.auth = Some(AuthConfig {
            auth_type: AuthType::Basic,
            username: None,
            token_env: "JIRA_TOKEN".to_string(),
        });
        assert_eq!(rules(&config), vec!["missing-username"]);
    }

    #[test]
    fn bearer_auth_needs_only_token() {
        let mut config = config_with_url("https://jira.example.com");
        config.site.auth = Some(AuthConfig {
            auth_type: AuthType::Bearer,
            username: None,
            token_env: "JIRA_PAT".to_string(),
        });
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn empty_templates_are_not_a_validation_error() {
        let config = config_with_url("https://jira.example.com");
        assert!(config.release.is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn validate_joins_all_messages() {
        let mut config = ReleaseConfig::default();
        config.site.timeout_secs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("site.url"));
        assert!(err.contains("timeout_secs"));
    }
}
