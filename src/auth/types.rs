//! Auth value types
//!
//! `Credentials` is the caller-owned holder for the three application
//! values; `SessionToken` is what the authorization endpoint hands back.

use crate::config::Settings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application credentials exchanged for a session token
///
/// Every field starts unset. Setters overwrite without validation; the
/// authenticator refuses to send while any of them is unset or empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    application_id: Option<String>,
    #[serde(default)]
    application_secret: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl Credentials {
    /// Create credentials with all three values set
    pub fn new(
        application_id: impl Into<String>,
        application_secret: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            application_id: Some(application_id.into()),
            application_secret: Some(application_secret.into()),
            token: Some(token.into()),
        }
    }

    /// Credentials carried by a settings object
    pub fn from_settings(settings: &Settings) -> Self {
        settings.credentials.clone()
    }

    /// Store the application id
    pub fn set_application_id(&mut self, value: impl Into<String>) {
        self.application_id = Some(value.into());
    }

    /// Store the application secret
    pub fn set_application_secret(&mut self, value: impl Into<String>) {
        self.application_secret = Some(value.into());
    }

    /// Store the long-lived installation token
    pub fn set_token(&mut self, value: impl Into<String>) {
        self.token = Some(value.into());
    }

    /// Currently stored application id
    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Currently stored application secret
    pub fn application_secret(&self) -> Option<&str> {
        self.application_secret.as_deref()
    }

    /// Currently stored installation token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Wire names of the fields that are unset or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("applicationId", &self.application_id),
            ("applicationSecret", &self.application_secret),
            ("Token", &self.token),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// Form body for the authorization request
    pub(crate) fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("applicationId", self.application_id().unwrap_or_default()),
            (
                "applicationSecret",
                self.application_secret().unwrap_or_default(),
            ),
            ("Token", self.token().unwrap_or_default()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("application_secret", &redact(&self.application_secret))
            .field("token", &redact(&self.token))
            .finish()
    }
}

/// Short-lived session token returned by the authorization endpoint
///
/// Sent verbatim in the `Authorization` header, without a `Bearer ` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}
