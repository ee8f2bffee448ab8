//! Mock query provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use packchat_core::{QueryFailure, QueryPayload, QueryProvider, QueryReply, QueryRequest, QueryResult};

#[derive(Debug)]
struct Inner {
    result: Mutex<QueryResult>,
    payloads: Mutex<Vec<QueryPayload>>,
    calls: AtomicUsize,
}

/// Mock query provider for testing.
///
/// Answers every query with the same result, `{"message": "hi"}` by default,
/// and records the payloads it receives.
#[derive(Debug, Clone)]
pub struct MockQueryProvider {
    inner: Arc<Inner>,
}

impl Default for MockQueryProvider {
    fn default() -> Self {
        Self::with_result(QueryResult::Success(QueryReply::new("hi")))
    }
}

impl MockQueryProvider {
    /// Creates a provider that always returns `result`.
    pub fn with_result(result: QueryResult) -> Self {
        Self {
            inner: Arc::new(Inner {
                result: Mutex::new(result),
                payloads: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Creates a provider that always replies with `message`.
    pub fn replying(message: impl Into<String>) -> Self {
        Self::with_result(QueryResult::Success(QueryReply::new(message)))
    }

    /// Creates a provider that always fails with `failure`.
    pub fn failing(failure: QueryFailure) -> Self {
        Self::with_result(QueryResult::Failure(failure))
    }

    /// Changes the result of subsequent calls.
    pub fn set_result(&self, result: QueryResult) {
        if let Ok(mut slot) = self.inner.result.lock() {
            *slot = result;
        }
    }

    /// Number of `query` calls so far.
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Payloads received so far, in call order.
    pub fn payloads(&self) -> Vec<QueryPayload> {
        self.inner
            .payloads
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl QueryProvider for MockQueryProvider {
    async fn query(&self, request: &QueryRequest) -> QueryResult {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut payloads) = self.inner.payloads.lock() {
            payloads.push(request.payload.clone());
        }

        match self.inner.result.lock() {
            Ok(result) => result.clone(),
            Err(_) => QueryResult::Failure(QueryFailure::other(
                "Other error occurred: mock state poisoned",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use packchat_core::{AccessToken, QueryService};

    use super::*;

    #[tokio::test]
    async fn test_set_result_applies_to_later_calls() {
        let provider = MockQueryProvider::default();
        let service = QueryService::new(provider.clone());
        let token = AccessToken::new("tok");

        let first = service.query("a", Vec::new(), None, &token).await;
        assert!(first.is_success());

        provider.set_result(QueryResult::Failure(QueryFailure::http(500, "HTTP error occurred: 500")));
        let second = service.query("b", Vec::new(), None, &token).await;
        assert_eq!(second.error_description(), Some("HTTP error occurred: 500"));

        assert_eq!(provider.calls(), 2);
        assert_eq!(provider.payloads()[1].user_message, "b");
    }
}
