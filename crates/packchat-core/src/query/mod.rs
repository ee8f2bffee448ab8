//! Retrieval-augmented question answering.
//!
//! A [`QueryProvider`] performs a single `deepquery` call and classifies its
//! outcome; [`QueryService`] wraps a provider with request ids and tracing.

mod service;

pub use service::QueryService;

use crate::types::{QueryRequest, QueryResult};

/// Tracing target for query operations.
pub const TRACING_TARGET: &str = "packchat_core::query";

/// Core trait for the question-answering service.
///
/// Implementations never return a Rust error: every failure mode is folded
/// into [`QueryResult::Failure`] with a description fit for display.
/// No retries are performed.
#[async_trait::async_trait]
pub trait QueryProvider: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> QueryResult;
}
