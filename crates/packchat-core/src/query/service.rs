//! Query service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{QueryProvider, TRACING_TARGET};
use crate::types::{AccessToken, PackId, QueryPayload, QueryRequest, QueryResult, Turn};

/// Query service wrapper with observability.
#[derive(Clone)]
pub struct QueryService {
    inner: Arc<dyn QueryProvider>,
}

impl fmt::Debug for QueryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryService").finish_non_exhaustive()
    }
}

impl QueryService {
    /// Create a new query service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: QueryProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create a wrapper around an already shared provider.
    pub fn from_shared(provider: Arc<dyn QueryProvider>) -> Self {
        Self { inner: provider }
    }

    /// Asks a question, optionally scoped to a pack.
    pub async fn query(
        &self,
        message: impl Into<String>,
        history: Vec<Turn>,
        pack_id: Option<PackId>,
        token: &AccessToken,
    ) -> QueryResult {
        let payload = QueryPayload::new(message, pack_id, history);
        self.send(payload, token).await
    }

    /// Sends an already composed payload.
    pub async fn send(&self, payload: QueryPayload, token: &AccessToken) -> QueryResult {
        let request = QueryRequest::new(payload, token.clone());
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            pack_id = ?request.payload.pack_id,
            history_len = request.payload.history.len(),
            message_len = request.payload.user_message.len(),
            "Sending query"
        );

        let result = self.inner.query(&request).await;
        let elapsed_ms = started_at.elapsed().as_millis();

        match &result {
            QueryResult::Success(reply) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    reply_len = reply.message.len(),
                    elapsed_ms,
                    "Query answered"
                );
            }
            QueryResult::Failure(failure) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    kind = %failure.kind,
                    status = ?failure.status,
                    elapsed_ms,
                    "{}", failure.description
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{QueryFailure, QueryReply};

    #[derive(Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<QueryPayload>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl QueryProvider for Arc<RecordingProvider> {
        async fn query(&self, request: &QueryRequest) -> QueryResult {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.payload.clone());
            }
            if self.fail {
                QueryResult::Failure(QueryFailure::http(500, "HTTP error occurred: 500"))
            } else {
                QueryResult::Success(QueryReply::new("hi"))
            }
        }
    }

    #[tokio::test]
    async fn test_query_builds_payload() {
        let provider = Arc::new(RecordingProvider::default());
        let service = QueryService::new(provider.clone());

        let history = vec![Turn::user("a"), Turn::assistant("b")];
        let result = service
            .query("Hello", history.clone(), Some(PackId::Int(1)), &AccessToken::new("t"))
            .await;

        assert_eq!(result.assistant_message(), Some("hi"));
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], QueryPayload::new("Hello", Some(PackId::Int(1)), history));
    }

    #[tokio::test]
    async fn test_failure_is_passed_through() {
        let provider = Arc::new(RecordingProvider {
            fail: true,
            ..Default::default()
        });
        let service = QueryService::new(provider);

        let result = service
            .query("Hello", Vec::new(), None, &AccessToken::new("t"))
            .await;
        assert_eq!(result.error_description(), Some("HTTP error occurred: 500"));
    }
}
