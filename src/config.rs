//! Client settings
//!
//! `Settings` supplies everything the client needs before the first call:
//! the three application credentials, the two endpoint URLs and the HTTP
//! knobs. It can be built in code, loaded from YAML, or read from the
//! environment.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{DEFAULT_AUTH_URL, DEFAULT_PAGE_SIZE, DEFAULT_SCRIPT_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the application id
pub const ENV_APPLICATION_ID: &str = "LINNWORKS_APPLICATION_ID";
/// Environment variable holding the application secret
pub const ENV_APPLICATION_SECRET: &str = "LINNWORKS_APPLICATION_SECRET";
/// Environment variable holding the long-lived installation token
pub const ENV_TOKEN: &str = "LINNWORKS_TOKEN";
/// Environment variable overriding the authorization endpoint
pub const ENV_AUTH_URL: &str = "LINNWORKS_AUTH_URL";
/// Environment variable overriding the script endpoint
pub const ENV_SCRIPT_URL: &str = "LINNWORKS_SCRIPT_URL";

// ============================================================================
// Settings
// ============================================================================

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Application credentials
    #[serde(default)]
    pub credentials: Credentials,

    /// Authorization endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Paged script execution endpoint
    #[serde(default = "default_script_url")]
    pub script_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum page requests in flight after page 1 (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Optional request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimitSettings>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Token bucket settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Bucket size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_script_url() -> String {
    DEFAULT_SCRIPT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_concurrency() -> usize {
    1
}

fn default_burst() -> u32 {
    1
}

fn default_user_agent() -> String {
    format!("linnworks-query/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            auth_url: default_auth_url(),
            script_url: default_script_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            concurrency: default_concurrency(),
            rate_limit: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Create settings with default endpoints and the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Parse settings from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    ///
    /// Credentials that are absent stay unset; authentication reports them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(id) = lookup(ENV_APPLICATION_ID) {
            settings.credentials.set_application_id(id);
        }
        if let Some(secret) = lookup(ENV_APPLICATION_SECRET) {
            settings.credentials.set_application_secret(secret);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            settings.credentials.set_token(token);
        }
        if let Some(url) = lookup(ENV_AUTH_URL) {
            settings.auth_url = url;
        }
        if let Some(url) = lookup(ENV_SCRIPT_URL) {
            settings.script_url = url;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Point both endpoints at another host (staging, mock servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.auth_url = format!("{base}/api/Auth/AuthorizeByApplication");
        self.script_url = format!("{base}/api/Dashboards/ExecuteCustomPagedScript");
        self
    }

    /// Set the request timeout
    ///
    /// `timeout_secs` holds whole seconds: sub-second precision is dropped
    /// and anything under one second becomes one second.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set page concurrency
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Check URLs and numeric bounds
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.auth_url)?;
        url::Url::parse(&self.script_url)?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if self.concurrency == 0 {
            return Err(Error::invalid_value("concurrency", "must be at least 1"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client configuration derived from these settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(self.timeout())
            .user_agent(&self.user_agent);

        if let Some(limit) = self.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size,
            ));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(settings.script_url, DEFAULT_SCRIPT_URL);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.page_size, 1000);
        assert_eq!(settings.concurrency, 1);
        assert!(settings.rate_limit.is_none());
        assert!(settings.credentials.application_id().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r"
credentials:
  application_id: app-123
  application_secret: shh
  token: install-token
timeout_secs: 10
concurrency: 4
rate_limit:
  requests_per_second: 2
";
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.credentials.application_id(), Some("app-123"));
        assert_eq!(settings.credentials.application_secret(), Some("shh"));
        assert_eq!(settings.credentials.token(), Some("install-token"));
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.page_size, 1000);
        assert_eq!(
            settings.rate_limit,
            Some(RateLimitSettings {
                requests_per_second: 2,
                burst_size: 1
            })
        );
    }

    #[test]
    fn test_settings_yaml_rejects_bad_url() {
        let yaml = "script_url: not a url\n";
        let err = Settings::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_settings_yaml_rejects_zero_page_size() {
        let err = Settings::from_yaml_str("page_size: 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "page_size"));
    }

    #[test]
    fn test_settings_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "credentials:\n  token: t\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.credentials.token(), Some("t"));

        let missing = Settings::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }

    #[test]
    fn test_settings_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_APPLICATION_ID, "id"),
            (ENV_APPLICATION_SECRET, "secret"),
            (ENV_TOKEN, "token"),
            (ENV_SCRIPT_URL, "http://localhost:9000/script"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap();
        assert_eq!(settings.credentials.application_id(), Some("id"));
        assert_eq!(settings.credentials.token(), Some("token"));
        assert_eq!(settings.script_url, "http://localhost:9000/script");
        assert_eq!(settings.auth_url, DEFAULT_AUTH_URL);
    }

    #[test]
    fn test_with_base_url() {
        let settings = Settings::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            settings.auth_url,
            "http://127.0.0.1:8080/api/Auth/AuthorizeByApplication"
        );
        assert_eq!(
            settings.script_url,
            "http://127.0.0.1:8080/api/Dashboards/ExecuteCustomPagedScript"
        );
    }

    #[test]
    fn test_http_config_from_settings() {
        let mut settings = Settings::default().with_timeout(Duration::from_secs(5));
        settings.rate_limit = Some(RateLimitSettings {
            requests_per_second: 3,
            burst_size: 2,
        });

        let config = settings.http_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        let limit = config.rate_limit.unwrap();
        assert_eq!(limit.requests_per_second, 3);
        assert_eq!(limit.burst_size, 2);
    }

    #[test]
    fn test_with_timeout_keeps_whole_seconds() {
        let settings = Settings::default().with_timeout(Duration::from_millis(1500));
        assert_eq!(settings.timeout_secs, 1);
        assert_eq!(settings.timeout(), Duration::from_secs(1));

        let settings = Settings::default().with_timeout(Duration::from_millis(200));
        assert_eq!(settings.timeout_secs, 1);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let settings = Settings::default().with_concurrency(0);
        assert!(settings.validate().is_err());
    }
}
