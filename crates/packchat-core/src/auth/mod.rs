//! Authentication and pack listing.
//!
//! - [`AuthProvider`]: trait implemented by concrete clients
//! - [`AuthService`]: wrapper with observability that resolves provider
//!   errors into "no token" and "no packs"
//!
//! For an HTTP-based implementation, see the `packchat-reqwest` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use packchat_core::{AuthService, Credentials};
//!
//! let service = AuthService::new(my_provider);
//! if let Some(token) = service.authenticate(&Credentials::new(email, password)).await {
//!     let packs = service.list_packs(&token).await;
//! }
//! ```

mod service;

pub use service::AuthService;

use crate::Result;
use crate::types::{AccessToken, Credentials, Pack};

/// Tracing target for authentication and pack listing.
pub const TRACING_TARGET: &str = "packchat_core::auth";

/// Core trait for the auth/pack service.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// A single attempt; any failure is returned as an error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Lists the packs owned by the identity behind `token`.
    async fn list_packs(&self, token: &AccessToken) -> Result<Vec<Pack>>;
}
