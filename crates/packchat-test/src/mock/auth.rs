//! Mock auth provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use packchat_core::{AccessToken, AuthProvider, Credentials, Error, Pack, Result};

#[derive(Debug)]
struct Account {
    email: String,
    password: String,
    token: String,
}

#[derive(Debug)]
struct Inner {
    account: Mutex<Account>,
    packs: Mutex<Option<Vec<Pack>>>,
    login_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

/// Mock auth provider for testing.
///
/// Accepts exactly one account, `a@b.com` / `secret` with token `tok123`
/// by default, and lists a single pack `1 / Sales`.
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    inner: Arc<Inner>,
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                account: Mutex::new(Account {
                    email: "a@b.com".to_owned(),
                    password: "secret".to_owned(),
                    token: "tok123".to_owned(),
                }),
                packs: Mutex::new(Some(vec![Pack::new(1, "Sales")])),
                login_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
            }),
        }
    }
}

impl MockAuthProvider {
    /// Replaces the accepted account.
    #[must_use]
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        if let Ok(mut account) = self.inner.account.lock() {
            *account = Account {
                email: email.into(),
                password: password.into(),
                token: token.into(),
            };
        }
        self
    }

    /// Replaces the pack listing.
    #[must_use]
    pub fn with_packs(self, packs: Vec<Pack>) -> Self {
        self.set_packs(Some(packs));
        self
    }

    /// Makes every pack listing fail.
    #[must_use]
    pub fn with_failing_packs(self) -> Self {
        self.set_packs(None);
        self
    }

    /// Replaces the pack listing on a provider already in use.
    pub fn set_packs(&self, packs: Option<Vec<Pack>>) {
        if let Ok(mut slot) = self.inner.packs.lock() {
            *slot = packs;
        }
    }

    /// Number of `authenticate` calls so far.
    pub fn login_calls(&self) -> usize {
        self.inner.login_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_packs` calls so far.
    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthProvider for MockAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.inner.login_calls.fetch_add(1, Ordering::SeqCst);

        let account = self
            .inner
            .account
            .lock()
            .map_err(|_| Error::external_error().with_message("mock state poisoned"))?;

        if credentials.email == account.email && credentials.password == account.password {
            Ok(AccessToken::new(account.token.clone()))
        } else {
            Err(Error::authentication().with_message("401 Unauthorized"))
        }
    }

    async fn list_packs(&self, _token: &AccessToken) -> Result<Vec<Pack>> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);

        let packs = self
            .inner
            .packs
            .lock()
            .map_err(|_| Error::external_error().with_message("mock state poisoned"))?;

        packs
            .clone()
            .ok_or_else(|| Error::external_error().with_message("500 Internal Server Error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_account() {
        let provider = MockAuthProvider::default();
        let token = provider
            .authenticate(&Credentials::new("a@b.com", "secret"))
            .await
            .unwrap();
        assert_eq!(token.as_str(), "tok123");
        assert!(
            provider
                .authenticate(&Credentials::new("a@b.com", "nope"))
                .await
                .is_err()
        );
        assert_eq!(provider.login_calls(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = MockAuthProvider::default().with_failing_packs();
        let clone = provider.clone();

        assert!(clone.list_packs(&AccessToken::new("t")).await.is_err());
        assert_eq!(provider.list_calls(), 1);
    }
}
