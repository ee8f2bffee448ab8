//! Stub HTTP services for the integration tests.

#![allow(dead_code)]

use axum::Router;
use packchat_reqwest::{ReqwestClient, ReqwestConfig};
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns the base URL of a port nothing listens on.
pub async fn refused() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Creates a client whose every base URL points at `base`.
pub fn client(base: &str) -> ReqwestClient {
    let config = ReqwestConfig::new(5)
        .with_api_url(base)
        .with_llm_api_url(base)
        .with_openai_base_url(base)
        .with_openai_api_key("sk-test");
    ReqwestClient::new(config).unwrap()
}
