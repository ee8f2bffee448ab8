//! Mock implementations of the packchat providers for testing.

mod auth;
mod query;
mod suggest;

pub use auth::MockAuthProvider;
use packchat_core::{AuthService, QueryService, SuggestionService};
pub use query::MockQueryProvider;
pub use suggest::MockSuggestionProvider;

/// Creates default mock services: auth, query and suggestions.
pub fn create_mock_services() -> (AuthService, QueryService, SuggestionService) {
    (
        AuthService::new(MockAuthProvider::default()),
        QueryService::new(MockQueryProvider::default()),
        SuggestionService::new(MockSuggestionProvider::default()),
    )
}
