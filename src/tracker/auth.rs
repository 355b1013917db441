//! Tracker authentication.

use crate::config::schema::{AuthConfig, AuthType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// Credentials attached to every tracker request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic auth.
    Basic { username: String, token: String },
    /// `Authorization: Bearer <token>`.
    Bearer { token: String },
}

impl std::fmt::Debug for Credentials {
    // Tokens never reach logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("token", &"***")
                .finish(),
            Credentials::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

impl Credentials {
    /// Apply these credentials to a request.
    pub fn apply(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match self {
            Credentials::Basic { username, token } => request.basic_auth(username, Some(token)),
            Credentials::Bearer { token } => request.bearer_auth(token),
        }
    }
}

/// Resolve credentials from config settings.
///
/// The token is looked up in `env_vars` first, then in the process
/// environment.
///
/// # Errors
///
/// Fails when the token variable is unset or basic auth lacks a username.
pub fn resolve_auth(auth: &AuthConfig, env_vars: &HashMap<String, String>) -> Result<Credentials> {
    let token = env_vars
        .get(&auth.token_env)
        .cloned()
        .or_else(|| std::env::var(&auth.token_env).ok())
        .ok_or_else(|| anyhow!("Environment variable {} is not set", auth.token_env))?;

    match auth.auth_type {
        AuthType::Basic => {
            let username = auth
                .username
                .clone()
                .ok_or_else(|| anyhow!("Basic auth requires a username"))?;
            Ok(Credentials::Basic { username, token })
        }
        AuthType::Bearer => Ok(Credentials::Bearer { token }),
    }
}
