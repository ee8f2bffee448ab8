//! Prompt suggestions from a chat-completion model.
//!
//! The model is instructed to answer with prompts wrapped as
//! `-- prompt --;`, which [`parse_suggestions`] extracts.

mod service;

use std::sync::LazyLock;

use regex::Regex;
pub use service::SuggestionService;

use crate::Result;

/// Tracing target for suggestion operations.
pub const TRACING_TARGET: &str = "packchat_core::suggest";

/// Instruction used when the caller does not provide a seed.
pub const DEFAULT_SEED: &str =
    "generate 5 prompts as a user asking about their own existing data. Be specific";

/// System prompt that fixes the answer format.
pub const SYSTEM_PROMPT: &str = "\
You are a Prompt Generator.
You create the most relevent prompts to the data you are given.
Your response must be in the following format for regex processing:

-- what is this data about? --;
-- how many customers from this list live in the state of California? --;
-- the third prompt --;
-- the fourth prompt --;
-- the fifth prompt --;
you are to adhere to this pattern completely at all times.
you must include --; exactly at all times";

static SUGGESTION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"--\s(.*?)\s--;").ok());

/// Core trait for a chat-completion backend.
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Sends one system and one user message, returns the model's reply.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Extracts every `-- prompt --;` occurrence, in order.
pub fn parse_suggestions(reply: &str) -> Vec<String> {
    let Some(pattern) = SUGGESTION_PATTERN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(reply)
        .filter_map(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_owned())
        .collect()
}
