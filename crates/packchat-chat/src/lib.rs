#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod compose;
mod controller;
mod session;

pub use compose::{ComposeError, Composer, PackSelection, compose};
pub use controller::{ChatController, LoginOutcome, TRACING_TARGET, TurnOutcome};
pub use packchat_core::{Attachment, ExtractorRegistry};
pub use session::{History, Page, Session};
