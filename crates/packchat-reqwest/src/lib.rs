#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod auth;
mod client;
mod config;
mod endpoint;
mod error;
mod query;
mod suggest;

pub use client::ReqwestClient;
pub use config::{DEFAULT_OPENAI_BASE_URL, DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use endpoint::Endpoint;
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "packchat_reqwest::client";
