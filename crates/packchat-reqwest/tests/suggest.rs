mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use packchat_core::suggest::DEFAULT_SEED;
use packchat_core::{ErrorKind, SuggestionProvider};
use serde_json::{Value, json};

async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer sk-test");
    if !authorized || body["model"] != "gpt-4o-mini" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no"})));
    }

    let seed = body["messages"][1]["content"].as_str().unwrap_or_default();
    let content = format!("-- first about {seed} --;\n-- second --;");
    (
        StatusCode::OK,
        Json(json!({"choices": [{"message": {"role": "assistant", "content": content}}]})),
    )
}

#[tokio::test]
async fn suggestions_are_parsed() {
    let base = common::serve(Router::new().route("/chat/completions", post(completions))).await;
    let service = common::client(&base).into_suggestion_service();

    let suggestions = service.suggest(Some("sales")).await;
    assert_eq!(suggestions, vec!["first about sales", "second"]);

    let suggestions = service.suggest(None).await;
    assert_eq!(suggestions[0], format!("first about {DEFAULT_SEED}"));
}

#[tokio::test]
async fn error_status_is_external_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base = common::serve(router).await;
    let client = common::client(&base);

    let error = client.complete("system", "user").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ExternalError);
    assert!(client.into_suggestion_service().suggest(None).await.is_empty());
}
