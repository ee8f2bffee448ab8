//! [`QueryProvider`] implementation.
//!
//! Every failure is folded into a [`QueryFailure`] whose description is
//! shown to the user as is.

use packchat_core::{QueryFailure, QueryProvider, QueryReply, QueryRequest, QueryResult};

use crate::{Endpoint, ReqwestClient, TRACING_TARGET};

#[async_trait::async_trait]
impl QueryProvider for ReqwestClient {
    async fn query(&self, request: &QueryRequest) -> QueryResult {
        let url = match self.endpoint_url(Endpoint::DeepQuery) {
            Ok(url) => url,
            Err(error) => return other(error),
        };

        let response = match self
            .http()
            .post(url)
            .bearer_auth(request.token.as_str())
            .json(&request.payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                return QueryResult::Failure(QueryFailure::transport(format!(
                    "Request error occurred: {error}"
                )));
            }
        };

        let status = response.status();
        let url = response.url().clone();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status = status.as_u16(),
            "DeepQuery response received"
        );

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                return QueryResult::Failure(QueryFailure::transport(format!(
                    "Request error occurred: {error}"
                )));
            }
        };

        if !status.is_success() {
            return QueryResult::Failure(QueryFailure::http(
                status.as_u16(),
                format!("HTTP error occurred: {status} for url ({url}) - Response: {body}"),
            ));
        }

        match serde_json::from_str::<QueryReply>(&body) {
            Ok(reply) => QueryResult::Success(reply),
            Err(error) => other(error),
        }
    }
}

fn other(error: impl std::fmt::Display) -> QueryResult {
    QueryResult::Failure(QueryFailure::other(format!("Other error occurred: {error}")))
}
