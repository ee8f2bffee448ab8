//! Session state: current page, bearer token, pack listing and history.

use packchat_core::{AccessToken, Pack, Turn};
use strum::{AsRefStr, Display};

/// Page the front-end shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    /// Credentials are requested. Initial page.
    #[default]
    Login,
    /// Authenticated conversation.
    Chat,
}

/// Chronological, append-only conversation history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the tail.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Copies the turns, as sent along with a query.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

impl From<Vec<Turn>> for History {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a History {
    type IntoIter = std::slice::Iter<'a, Turn>;
    type Item = &'a Turn;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// State of one user's session, owned by the running front-end.
///
/// The only page transition is [`Page::Login`] to [`Page::Chat`], taken by
/// [`establish`](Session::establish) with a non-empty token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
    history: History,
    page: Page,
    packs: Vec<Pack>,
}

impl Session {
    /// Creates a session on the login page with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Most recent pack listing.
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Returns true once a token has been stored.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Stores `token` and moves to the chat page.
    ///
    /// An empty token is refused and leaves the session untouched. The
    /// history is kept as is.
    pub fn establish(&mut self, token: AccessToken) -> bool {
        if token.is_empty() {
            return false;
        }

        self.token = Some(token);
        self.page = Page::Chat;
        true
    }

    /// Replaces the pack listing.
    pub fn record_packs(&mut self, packs: Vec<Pack>) {
        self.packs = packs;
    }

    /// Appends a turn to the history.
    pub fn append_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }
}
