//! Authenticator implementation
//!
//! Exchanges application credentials for a session token. Every call
//! performs a fresh request; nothing is cached here.

use super::types::{Credentials, SessionToken};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};

/// Anything that can hand the fetcher a session token
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Obtain a session token for one report call
    async fn session_token(&self) -> Result<SessionToken>;
}

/// Authenticator for the application authorization endpoint
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Caller-supplied credentials
    credentials: Credentials,
    /// Authorization endpoint URL
    auth_url: String,
    /// HTTP client for the token request
    http_client: HttpClient,
}

impl Authenticator {
    /// Create an authenticator with its own HTTP client
    pub fn new(credentials: Credentials, auth_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(credentials, auth_url, HttpClient::new()?))
    }

    /// Create an authenticator sharing an existing HTTP client
    pub fn with_client(
        credentials: Credentials,
        auth_url: impl Into<String>,
        http_client: HttpClient,
    ) -> Self {
        Self {
            credentials,
            auth_url: auth_url.into(),
            http_client,
        }
    }

    /// Create an authenticator from settings
    pub fn from_settings(settings: &Settings, http_client: HttpClient) -> Self {
        Self::with_client(
            settings.credentials.clone(),
            settings.auth_url.clone(),
            http_client,
        )
    }

    /// Current credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Mutable access to the credentials, for the setters
    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Authorization endpoint URL
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Exchange the stored credentials for a session token
    ///
    /// Fails without sending anything if a credential is unset or empty.
    pub async fn authenticate(&self) -> Result<SessionToken> {
        let missing = self.credentials.missing_fields();
        if !missing.is_empty() {
            return Err(Error::auth(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }

        debug!(url = %self.auth_url, "Requesting session token");

        let config = RequestConfig::new().form(&self.credentials.form_fields());
        let response: AuthorizeResponse = self
            .http_client
            .request_json(Method::POST, &self.auth_url, config)
            .await
            .map_err(|e| {
                warn!("Authorization request failed: {e}");
                Error::auth_caused_by("authorization request failed", e)
            })?;

        match response.token {
            Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
            _ => Err(Error::auth("response did not contain a Token")),
        }
    }
}

#[async_trait]
impl SessionProvider for Authenticator {
    async fn session_token(&self) -> Result<SessionToken> {
        self.authenticate().await
    }
}

/// A token obtained elsewhere, handed out unchanged on every call
#[derive(Debug, Clone)]
pub struct StaticSession(SessionToken);

impl StaticSession {
    /// Wrap a pre-obtained token
    pub fn new(token: impl Into<String>) -> Self {
        Self(SessionToken::new(token))
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn session_token(&self) -> Result<SessionToken> {
        Ok(self.0.clone())
    }
}

/// Authorization response body
///
/// Only `Token` is read; the endpoint returns a larger session object.
#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    #[serde(rename = "Token", default)]
    token: Option<String>,
}
