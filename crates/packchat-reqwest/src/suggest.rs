//! [`SuggestionProvider`] implementation against an OpenAI-compatible
//! chat-completion API.

use packchat_core::SuggestionProvider;
use serde::{Deserialize, Serialize};

use crate::{Endpoint, Error, ReqwestClient, TRACING_TARGET};

/// Model used for prompt suggestions.
const SUGGESTION_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl SuggestionProvider for ReqwestClient {
    async fn complete(&self, system: &str, user: &str) -> packchat_core::Result<String> {
        let url = self.endpoint_url(Endpoint::ChatCompletions)?;
        let api_key = self.config().effective_openai_api_key().ok_or_else(|| {
            packchat_core::Error::configuration().with_message("OPENAI_API_KEY is not set")
        })?;

        let body = ChatRequest {
            model: SUGGESTION_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http()
            .post(url.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        tracing::debug!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            model = SUGGESTION_MODEL,
            "Chat completion response received"
        );

        let bytes = response.bytes().await.map_err(Error::from)?;
        if !status.is_success() {
            return Err(packchat_core::Error::external_error()
                .with_message(format!("{status} for url ({url})"))
                .with_context(format!("response: {}", String::from_utf8_lossy(&bytes))));
        }

        let completion: ChatResponse = serde_json::from_slice(&bytes).map_err(Error::from)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                packchat_core::Error::external_error()
                    .with_message("Chat completion returned no message content")
            })
    }
}
