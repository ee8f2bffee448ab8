//! Attachment classification and text extraction.
//!
//! An [`Attachment`] is classified into a [`ContentKind`] from its MIME type,
//! falling back to its file extension. The [`ExtractorRegistry`] maps each
//! kind to a [`TextExtractor`]; kinds without an extractor contribute no text.

mod attachment;
mod content_kind;
mod extractor;
mod registry;
mod table;

pub use attachment::Attachment;
pub use content_kind::ContentKind;
#[cfg(feature = "pdf")]
#[cfg_attr(docsrs, doc(cfg(feature = "pdf")))]
pub use extractor::PdfExtractor;
pub use extractor::{PlainTextExtractor, TableExtractor, TextExtractor};
pub use registry::ExtractorRegistry;
pub use table::{parse_csv, render_table};

/// Tracing target for content extraction.
pub const TRACING_TARGET: &str = "packchat_core::content";
