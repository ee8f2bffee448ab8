//! Reqwest-based HTTP client shared by every provider implementation.

use std::sync::Arc;

use packchat_core::{AuthService, QueryService, SuggestionService};
use reqwest::Client;
use url::Url;

use crate::{Endpoint, Error, ReqwestConfig, TRACING_TARGET};

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client for the auth, query and suggestion services.
///
/// Implements [`AuthProvider`], [`QueryProvider`] and [`SuggestionProvider`]
/// on top of one pooled [`reqwest::Client`]. Cloning is cheap.
///
/// # Examples
///
/// ```rust,ignore
/// use packchat_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let auth = client.clone().into_auth_service();
/// let query = client.into_query_service();
/// ```
///
/// [`AuthProvider`]: packchat_core::AuthProvider
/// [`QueryProvider`]: packchat_core::QueryProvider
/// [`SuggestionProvider`]: packchat_core::SuggestionProvider
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    pub fn new(config: ReqwestConfig) -> packchat_core::Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.as_millis(),
            user_agent = %user_agent,
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(Error::from)?;

        let inner = ReqwestClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Resolves the URL of `endpoint` against the current configuration.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> packchat_core::Result<Url> {
        endpoint.resolve(self.config())
    }

    /// Converts this client into an [`AuthService`].
    pub fn into_auth_service(self) -> AuthService {
        AuthService::new(self)
    }

    /// Converts this client into a [`QueryService`].
    pub fn into_query_service(self) -> QueryService {
        QueryService::new(self)
    }

    /// Converts this client into a [`SuggestionService`].
    pub fn into_suggestion_service(self) -> SuggestionService {
        SuggestionService::new(self)
    }
}
