use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the human user.
    User,
    /// Reply produced by the language model.
    Assistant,
}

/// One message in the conversation, tagged by speaker.
///
/// Serialized as `{"role": "user", "content": "..."}`, the shape the query
/// service expects inside `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Creates a turn for the given speaker.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns true if this turn was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_wire_shape() {
        let turn = Turn::user("hello");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value, serde_json::json!({"role": "user", "content": "hello"}));

        let parsed: Turn =
            serde_json::from_str(r#"{"role":"assistant","content":"hi there"}"#).unwrap();
        assert_eq!(parsed, Turn::assistant("hi there"));
        assert!(!parsed.is_user());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.as_ref(), "assistant");
    }
}
