//! Page handlers tying the session, the composer and the services together.

use packchat_core::{
    Attachment, AuthService, Credentials, Pack, QueryFailure, QueryResult, QueryService,
    SuggestionService, Turn,
};

use crate::{ComposeError, Composer, PackSelection, Page, Session};

/// Tracing target for chat handlers.
pub const TRACING_TARGET: &str = "packchat_chat::controller";

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The session now holds a token and shows the chat page.
    LoggedIn,
    /// Authentication failed; the session is unchanged and the user may retry.
    Failed,
}

/// Result of submitting one user turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The assistant replied; both turns were appended.
    Answered(String),
    /// The query failed; only the user turn was appended.
    Failed(QueryFailure),
    /// The turn was rejected locally; nothing was appended or sent.
    Rejected(ComposeError),
    /// The session has no token yet.
    NotLoggedIn,
}

/// Handlers for the login and chat pages.
#[derive(Debug, Clone)]
pub struct ChatController {
    auth: AuthService,
    query: QueryService,
    suggestions: SuggestionService,
    composer: Composer,
}

impl ChatController {
    /// Creates a controller with the default attachment extractors.
    pub fn new(auth: AuthService, query: QueryService, suggestions: SuggestionService) -> Self {
        Self {
            auth,
            query,
            suggestions,
            composer: Composer::default(),
        }
    }

    /// Replaces the composer, e.g. to register extra extractors.
    #[must_use]
    pub fn with_composer(mut self, composer: Composer) -> Self {
        self.composer = composer;
        self
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Login page handler.
    ///
    /// On success the session stores the token and switches to the chat
    /// page. A missing or empty token leaves the session untouched.
    pub async fn login(&self, session: &mut Session, credentials: &Credentials) -> LoginOutcome {
        let Some(token) = self.auth.authenticate(credentials).await else {
            tracing::warn!(target: TRACING_TARGET, "Failed to authenticate user");
            return LoginOutcome::Failed;
        };

        if !session.establish(token) {
            tracing::warn!(
                target: TRACING_TARGET,
                "Auth service returned an empty token, staying on login page"
            );
            return LoginOutcome::Failed;
        }

        tracing::info!(
            target: TRACING_TARGET,
            email = %credentials.email,
            "User logged in successfully"
        );
        LoginOutcome::LoggedIn
    }

    /// Fetches the pack listing and stores it in the session.
    ///
    /// A failed listing stores and returns an empty list. Without a token
    /// nothing is fetched.
    pub async fn refresh_packs<'s>(&self, session: &'s mut Session) -> &'s [Pack] {
        let packs = match session.token() {
            Some(token) => self.auth.list_packs(token).await,
            None => Vec::new(),
        };

        if packs.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                "No packs available or failed to fetch packs"
            );
        } else {
            tracing::info!(
                target: TRACING_TARGET,
                count = packs.len(),
                "Fetched user packs"
            );
        }

        session.record_packs(packs);
        session.packs()
    }

    /// Chat page handler for one user turn.
    ///
    /// The pack selection and attachments are handled first; a rejected
    /// selection leaves the history untouched. The user turn is then appended
    /// and the history, now ending with that turn, is sent along with the
    /// query. The assistant turn is appended only when the query succeeds.
    pub async fn submit(
        &self,
        session: &mut Session,
        user_text: &str,
        attachments: &[Attachment],
        selection: &PackSelection,
    ) -> TurnOutcome {
        let Some(token) = session.token().cloned() else {
            return TurnOutcome::NotLoggedIn;
        };
        if session.page() != Page::Chat {
            return TurnOutcome::NotLoggedIn;
        }

        let mut payload = match self.composer.compose(
            user_text,
            attachments,
            selection,
            session.packs(),
            &[],
        ) {
            Ok(payload) => payload,
            Err(error) => return TurnOutcome::Rejected(error),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            pack_id = ?payload.pack_id,
            attachments = attachments.len(),
            "Submitting user turn"
        );

        session.append_turn(Turn::user(user_text));
        payload.history = session.history().snapshot();

        match self.query.send(payload, &token).await {
            QueryResult::Success(reply) => {
                session.append_turn(Turn::assistant(reply.message.clone()));
                TurnOutcome::Answered(reply.message)
            }
            QueryResult::Failure(failure) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = %failure.kind,
                    "Error from query service"
                );
                TurnOutcome::Failed(failure)
            }
        }
    }

    /// Asks for prompt suggestions, with the default seed when none is given.
    pub async fn suggest(&self, seed: Option<&str>) -> Vec<String> {
        self.suggestions.suggest(seed).await
    }
}
