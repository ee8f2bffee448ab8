mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use packchat_core::{AccessToken, AuthProvider, Credentials, ErrorKind, Pack};
use serde_json::{Value, json};

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body == json!({"email": "a@b.com", "password": "secret"}) {
        (StatusCode::OK, Json(json!({"access_token": "tok123", "token_type": "bearer"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "bad credentials"})))
    }
}

async fn list_packs(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer tok123");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no"})));
    }

    (
        StatusCode::OK,
        Json(json!([{"id": 1, "pack_name": "Sales", "created_at": "2024-01-01"}])),
    )
}

fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/packman/list_packs", get(list_packs))
}

#[tokio::test]
async fn valid_credentials_return_token() {
    let base = common::serve(router()).await;
    let client = common::client(&base);

    let token = client
        .authenticate(&Credentials::new("a@b.com", "secret"))
        .await
        .unwrap();
    assert_eq!(token, AccessToken::new("tok123"));
}

#[tokio::test]
async fn invalid_credentials_are_rejected() {
    let base = common::serve(router()).await;
    let client = common::client(&base);

    let error = client
        .authenticate(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Authentication);

    let service = client.into_auth_service();
    let token = service
        .authenticate(&Credentials::new("a@b.com", "wrong"))
        .await;
    assert!(token.is_none());
}

#[tokio::test]
async fn network_failure_yields_no_token() {
    let base = common::refused().await;
    let client = common::client(&base);

    let error = client
        .authenticate(&Credentials::new("a@b.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NetworkError);

    let service = client.into_auth_service();
    assert!(service.authenticate(&Credentials::new("a@b.com", "secret")).await.is_none());
}

#[tokio::test]
async fn missing_token_field_is_an_error() {
    let router = Router::new().route("/login", post(|| async { Json(json!({"status": "ok"})) }));
    let base = common::serve(router).await;
    let client = common::client(&base);

    let error = client
        .authenticate(&Credentials::new("a@b.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn malformed_login_body_is_serialization_error() {
    let router = Router::new().route("/login", post(|| async { "not json" }));
    let base = common::serve(router).await;
    let client = common::client(&base);

    let error = client
        .authenticate(&Credentials::new("a@b.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Serialization);
}

#[tokio::test]
async fn packs_are_listed_with_bearer_token() {
    let base = common::serve(router()).await;
    let service = common::client(&base).into_auth_service();

    let packs = service.list_packs(&AccessToken::new("tok123")).await;
    assert_eq!(packs, vec![Pack::new(1, "Sales")]);

    let packs = service.list_packs(&AccessToken::new("other")).await;
    assert!(packs.is_empty());
}

#[tokio::test]
async fn pack_listing_server_error_is_empty() {
    let router = Router::new().route(
        "/packman/list_packs",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db exploded") }),
    );
    let base = common::serve(router).await;
    let client = common::client(&base);

    let error = client
        .list_packs(&AccessToken::new("tok123"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ExternalError);
    let chain = error.to_chain_string();
    assert!(chain.contains("500"));
    assert!(chain.contains("response: db exploded"));

    let packs = client
        .into_auth_service()
        .list_packs(&AccessToken::new("tok123"))
        .await;
    assert!(packs.is_empty());
}

#[tokio::test]
async fn rejected_login_reports_response_body() {
    let base = common::serve(router()).await;
    let client = common::client(&base);

    let error = client
        .authenticate(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();
    assert!(error.to_chain_string().contains("bad credentials"));
}
