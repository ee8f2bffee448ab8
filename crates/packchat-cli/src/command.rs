//! Chat page input parsing.

use std::path::PathBuf;

use packchat_chat::PackSelection;

/// Commands offered on the chat page, used for completion and `/help`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/packs", "fetch and list the available packs"),
    ("/pack", "<name|None>  scope questions to a pack"),
    ("/attach", "<path> [mime]  attach a file to every question"),
    ("/detach", "drop all attachments"),
    ("/history", "show the conversation so far"),
    ("/suggest", "[seed]  ask for prompt ideas"),
    ("/help", "show this help"),
    ("/quit", "leave"),
];

/// One line typed on the chat page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Packs,
    Pack(PackSelection),
    Attach { path: PathBuf, mime: Option<String> },
    Detach,
    History,
    Suggest(Option<String>),
    Help,
    Quit,
    /// A question for the assistant.
    Message(String),
    /// Blank line.
    Empty,
    /// Malformed command, with a message for the user.
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if !line.starts_with('/') {
            return Self::Message(line.to_owned());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_owned());

        match name {
            "/packs" => Self::Packs,
            "/pack" => match argument {
                Some(name) => Self::Pack(name.parse().unwrap_or_default()),
                None => Self::Invalid("Usage: /pack <name|None>".to_owned()),
            },
            "/attach" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(path), mime, None) => Self::Attach {
                        path: PathBuf::from(path),
                        mime: mime.map(str::to_owned),
                    },
                    _ => Self::Invalid("Usage: /attach <path> [mime]".to_owned()),
                }
            }
            "/detach" => Self::Detach,
            "/history" => Self::History,
            "/suggest" => Self::Suggest(argument),
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Invalid(format!("Unknown command {other}. Type /help for a list.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            ReplCommand::parse("  how many rows?  "),
            ReplCommand::Message("how many rows?".into())
        );
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_pack_selection() {
        assert_eq!(
            ReplCommand::parse("/pack Sales 2024"),
            ReplCommand::Pack(PackSelection::Named("Sales 2024".into()))
        );
        assert_eq!(
            ReplCommand::parse("/pack None"),
            ReplCommand::Pack(PackSelection::None)
        );
        assert!(matches!(ReplCommand::parse("/pack"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_attach() {
        assert_eq!(
            ReplCommand::parse("/attach data.csv"),
            ReplCommand::Attach {
                path: PathBuf::from("data.csv"),
                mime: None
            }
        );
        assert_eq!(
            ReplCommand::parse("/attach notes text/plain"),
            ReplCommand::Attach {
                path: PathBuf::from("notes"),
                mime: Some("text/plain".into())
            }
        );
        assert!(matches!(ReplCommand::parse("/attach"), ReplCommand::Invalid(_)));
        assert!(matches!(
            ReplCommand::parse("/attach a b c"),
            ReplCommand::Invalid(_)
        ));
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(ReplCommand::parse("/packs"), ReplCommand::Packs);
        assert_eq!(ReplCommand::parse("/suggest"), ReplCommand::Suggest(None));
        assert_eq!(
            ReplCommand::parse("/suggest about churn"),
            ReplCommand::Suggest(Some("about churn".into()))
        );
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert!(matches!(ReplCommand::parse("/nope"), ReplCommand::Invalid(_)));
    }
}
