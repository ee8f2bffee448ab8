//! Mock suggestion provider for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use packchat_core::{Result, SuggestionProvider};

/// Mock suggestion provider for testing.
///
/// Returns the same completion text for every request.
#[derive(Debug, Clone)]
pub struct MockSuggestionProvider {
    reply: Arc<str>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockSuggestionProvider {
    fn default() -> Self {
        Self::new(
            "-- what is this data about? --;\n-- which region sold the most last quarter? --;",
        )
    }
}

impl MockSuggestionProvider {
    /// Creates a provider that always completes with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Arc::from(reply.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}
