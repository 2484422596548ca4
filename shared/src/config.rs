use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.mobility.example/v1/";
pub const DEFAULT_USER_AGENT: &str = concat!("eco-profile-core/", env!("CARGO_PKG_VERSION"));
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unsupported scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

/// Where the repository endpoints live. Supplied by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base_url: String,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut base_url = base_url.into();
        if base_url.len() > MAX_URL_LENGTH {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.chars().take(100).collect(),
                reason: format!("longer than {MAX_URL_LENGTH} bytes"),
            });
        }

        // Url::join drops the last path segment unless the base ends with '/'.
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_owned())),
        }

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                reason: "missing host".into(),
            });
        }

        Ok(Self {
            base_url: parsed.into(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}
