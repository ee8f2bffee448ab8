use std::fmt;
use std::sync::Arc;

use super::{DEFAULT_SEED, SYSTEM_PROMPT, SuggestionProvider, TRACING_TARGET, parse_suggestions};

/// Suggestion service wrapper with observability.
#[derive(Clone)]
pub struct SuggestionService {
    inner: Arc<dyn SuggestionProvider>,
}

impl fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionService").finish_non_exhaustive()
    }
}

impl SuggestionService {
    /// Create a new suggestion service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: SuggestionProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create a wrapper around an already shared provider.
    pub fn from_shared(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self { inner: provider }
    }

    /// Asks the model for prompt suggestions.
    ///
    /// Without a seed the [`DEFAULT_SEED`] instruction is sent. Failures
    /// yield an empty list.
    pub async fn suggest(&self, seed: Option<&str>) -> Vec<String> {
        let seed = seed.unwrap_or(DEFAULT_SEED);

        match self.inner.complete(SYSTEM_PROMPT, seed).await {
            Ok(reply) => {
                let suggestions = parse_suggestions(&reply);
                tracing::debug!(
                    target: TRACING_TARGET,
                    count = suggestions.len(),
                    "Parsed prompt suggestions"
                );
                suggestions
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    kind = %error.kind(),
                    error = %error.to_chain_string(),
                    "Failed to generate suggestions"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{Error, Result};

    #[derive(Default)]
    struct EchoProvider {
        seeds: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl SuggestionProvider for Arc<EchoProvider> {
        async fn complete(&self, _system: &str, user: &str) -> Result<String> {
            if let Ok(mut seeds) = self.seeds.lock() {
                seeds.push(user.to_owned());
            }
            Ok("-- one --;\n-- two --;".to_owned())
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl SuggestionProvider for FailingProvider {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Err(Error::configuration().with_message("OPENAI_API_KEY is not set"))
        }
    }

    #[tokio::test]
    async fn test_default_seed_is_used() {
        let provider = Arc::new(EchoProvider::default());
        let service = SuggestionService::new(provider.clone());

        let suggestions = service.suggest(None).await;
        assert_eq!(suggestions, vec!["one", "two"]);
        assert_eq!(provider.seeds.lock().unwrap().as_slice(), [DEFAULT_SEED]);
    }

    #[tokio::test]
    async fn test_failure_yields_empty() {
        let service = SuggestionService::new(FailingProvider);
        assert!(service.suggest(Some("about sales")).await.is_empty());
    }
}
