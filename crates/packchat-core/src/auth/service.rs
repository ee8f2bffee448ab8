//! Auth service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{AuthProvider, TRACING_TARGET};
use crate::types::{AccessToken, Credentials, Pack};

/// Auth service wrapper with observability.
///
/// Provider errors never leave this type: a failed login becomes `None`
/// and a failed listing becomes an empty list, each reported through a
/// `WARN` event. The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<dyn AuthProvider>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a new auth service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: AuthProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create a wrapper around an already shared provider.
    pub fn from_shared(provider: Arc<dyn AuthProvider>) -> Self {
        Self { inner: provider }
    }

    /// Exchanges credentials for a token.
    ///
    /// Returns `None` on any failure. A token the server sent back empty is
    /// still returned; deciding whether it counts as a login is up to the
    /// session.
    pub async fn authenticate(&self, credentials: &Credentials) -> Option<AccessToken> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            email = %credentials.email,
            "Attempting to authenticate user"
        );

        match self.inner.authenticate(credentials).await {
            Ok(token) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    email = %credentials.email,
                    empty_token = token.is_empty(),
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Access token received"
                );
                Some(token)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    email = %credentials.email,
                    kind = %error.kind(),
                    error = %error.to_chain_string(),
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Error during login"
                );
                None
            }
        }
    }

    /// Lists the packs for `token`, or an empty list when the listing fails.
    pub async fn list_packs(&self, token: &AccessToken) -> Vec<Pack> {
        let started_at = Instant::now();

        match self.inner.list_packs(token).await {
            Ok(packs) => {
                let ids: Vec<String> = packs.iter().map(|pack| pack.id.to_string()).collect();
                tracing::debug!(
                    target: TRACING_TARGET,
                    count = packs.len(),
                    ids = ?ids,
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Fetched user packs"
                );
                packs
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    kind = %error.kind(),
                    error = %error.to_chain_string(),
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Failed to fetch user packs"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};

    struct StaticProvider {
        token: Option<&'static str>,
        packs: Option<Vec<Pack>>,
    }

    #[async_trait::async_trait]
    impl AuthProvider for StaticProvider {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<AccessToken> {
            self.token
                .map(AccessToken::new)
                .ok_or_else(|| Error::authentication().with_message("invalid credentials"))
        }

        async fn list_packs(&self, _token: &AccessToken) -> Result<Vec<Pack>> {
            self.packs
                .clone()
                .ok_or_else(|| Error::external_error().with_message("HTTP 500"))
        }
    }

    #[tokio::test]
    async fn test_authenticate_failure_is_none() {
        let service = AuthService::new(StaticProvider {
            token: None,
            packs: None,
        });
        let token = service
            .authenticate(&Credentials::new("a@b.com", "wrong"))
            .await;
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_passes_token_through() {
        let service = AuthService::new(StaticProvider {
            token: Some("tok123"),
            packs: None,
        });
        let token = service
            .authenticate(&Credentials::new("a@b.com", "secret"))
            .await;
        assert_eq!(token, Some(AccessToken::new("tok123")));
    }

    #[tokio::test]
    async fn test_list_packs_failure_is_empty() {
        let service = AuthService::new(StaticProvider {
            token: Some("tok"),
            packs: None,
        });
        let packs = service.list_packs(&AccessToken::new("tok")).await;
        assert!(packs.is_empty());
    }

    #[tokio::test]
    async fn test_list_packs_success() {
        let service = AuthService::new(StaticProvider {
            token: Some("tok"),
            packs: Some(vec![Pack::new(1, "Sales")]),
        });
        let packs = service.list_packs(&AccessToken::new("tok")).await;
        assert_eq!(packs, vec![Pack::new(1, "Sales")]);
    }
}
