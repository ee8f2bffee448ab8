#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod auth;
pub mod content;
pub mod query;
pub mod suggest;
pub mod types;

pub use auth::{AuthProvider, AuthService};
pub use content::{Attachment, ContentKind, ExtractorRegistry, TextExtractor};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use query::{QueryProvider, QueryService};
pub use suggest::{SuggestionProvider, SuggestionService};
pub use types::{
    AccessToken, Credentials, Pack, PackId, QueryFailure, QueryFailureKind, QueryPayload,
    QueryReply, QueryRequest, QueryResult, Role, Turn,
};
