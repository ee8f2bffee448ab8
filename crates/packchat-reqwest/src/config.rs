//! Reqwest client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL used for suggestions when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub(crate) const API_URL_ENV: &str = "API_URL";
pub(crate) const LLM_API_URL_ENV: &str = "LLM_API_URL";
pub(crate) const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub(crate) const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the reqwest HTTP client.
///
/// The base URL fields are overrides. When one is unset, the matching
/// environment variable is read at call time.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Base URL of the auth and pack service (overrides API_URL)
    #[cfg_attr(feature = "config", arg(long = "api-url"))]
    #[serde(default)]
    pub api_url: Option<String>,

    /// Base URL of the query service (overrides LLM_API_URL)
    #[cfg_attr(feature = "config", arg(long = "llm-api-url"))]
    #[serde(default)]
    pub llm_api_url: Option<String>,

    /// Base URL of the chat-completion service (overrides OPENAI_BASE_URL)
    #[cfg_attr(feature = "config", arg(long = "openai-base-url"))]
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// API key for the chat-completion service (overrides OPENAI_API_KEY)
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(skip)]
    pub openai_api_key: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("api_url", &self.api_url)
            .field("llm_api_url", &self.llm_api_url)
            .field("openai_base_url", &self.openai_base_url)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            http_timeout: default_timeout_secs(),
            user_agent: None,
            api_url: None,
            llm_api_url: None,
            openai_base_url: None,
            openai_api_key: None,
        }
    }
}

impl ReqwestConfig {
    /// Create a new configuration with the specified timeout.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            http_timeout: timeout_secs,
            ..Self::default()
        }
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("packchat/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the chat-completion API key, reading `OPENAI_API_KEY` when
    /// no override is set.
    pub fn effective_openai_api_key(&self) -> Option<String> {
        self.openai_api_key
            .clone()
            .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the auth and pack service base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the query service base URL.
    #[must_use]
    pub fn with_llm_api_url(mut self, url: impl Into<String>) -> Self {
        self.llm_api_url = Some(url.into());
        self
    }

    /// Set the chat-completion base URL.
    #[must_use]
    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }

    /// Set the chat-completion API key.
    #[must_use]
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }
}
