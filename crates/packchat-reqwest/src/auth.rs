//! [`AuthProvider`] implementation.

use packchat_core::{AccessToken, AuthProvider, Credentials, Pack};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::{Endpoint, Error, ReqwestClient, TRACING_TARGET};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
}

/// Reads the body of a non-2xx response for error context.
async fn rejected(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

#[async_trait::async_trait]
impl AuthProvider for ReqwestClient {
    async fn authenticate(&self, credentials: &Credentials) -> packchat_core::Result<AccessToken> {
        let url = self.endpoint_url(Endpoint::Login)?;

        let response = self
            .http()
            .post(url.clone())
            .json(credentials)
            .send()
            .await
            .map_err(Error::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            status = response.status().as_u16(),
            "Login response received"
        );

        if !response.status().is_success() {
            let (status, body) = rejected(response).await;
            let error = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY => {
                    packchat_core::Error::authentication()
                }
                _ => packchat_core::Error::external_error(),
            };
            return Err(error
                .with_message(format!("{status} for url ({url})"))
                .with_context(format!("response: {body}")));
        }

        let bytes = response.bytes().await.map_err(Error::from)?;
        let login: LoginResponse = serde_json::from_slice(&bytes).map_err(Error::from)?;

        login.access_token.map(AccessToken::new).ok_or_else(|| {
            packchat_core::Error::authentication()
                .with_message("Login response has no access_token field")
        })
    }

    async fn list_packs(&self, token: &AccessToken) -> packchat_core::Result<Vec<Pack>> {
        let url = self.endpoint_url(Endpoint::ListPacks)?;

        let response = self
            .http()
            .get(url.clone())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(Error::from)?;

        if !response.status().is_success() {
            let (status, body) = rejected(response).await;
            return Err(packchat_core::Error::external_error()
                .with_message(format!("HTTP error occurred: {status} for url ({url})"))
                .with_context(format!("response: {body}")));
        }

        let bytes = response.bytes().await.map_err(Error::from)?;
        let packs: Vec<Pack> = serde_json::from_slice(&bytes).map_err(Error::from)?;
        Ok(packs)
    }
}
