//! Domain types exchanged with the remote services.
//!
//! - [`Turn`] and [`Role`]: one message of the running conversation
//! - [`Pack`] and [`PackId`]: server-owned data collections a query can be scoped to
//! - [`QueryPayload`], [`QueryRequest`], [`QueryResult`]: the query round trip
//! - [`AccessToken`] and [`Credentials`]: login material

mod pack;
mod query;
mod token;
mod turn;

pub use pack::{Pack, PackId};
pub use query::{
    QueryFailure, QueryFailureKind, QueryPayload, QueryReply, QueryRequest, QueryResult,
};
pub use token::{AccessToken, Credentials};
pub use turn::{Role, Turn};
