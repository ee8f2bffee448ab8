use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{
    Attachment, ContentKind, PlainTextExtractor, TRACING_TARGET, TableExtractor, TextExtractor,
};
use crate::Result;

/// Maps content kinds to the extractor that handles them.
///
/// Kinds without a registered extractor are a no-op: [`extract`] returns
/// `Ok(None)` for them.
///
/// [`extract`]: ExtractorRegistry::extract
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<ContentKind, Arc<dyn TextExtractor>>,
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.extractors.keys().map(ToString::to_string).collect();
        kinds.sort_unstable();
        f.debug_struct("ExtractorRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

impl ExtractorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in extractors: text, table and,
    /// with the `pdf` feature, PDF.
    pub fn with_defaults() -> Self {
        let registry = Self::new()
            .with(ContentKind::Text, PlainTextExtractor)
            .with(ContentKind::Table, TableExtractor);

        #[cfg(feature = "pdf")]
        let registry = registry.with(ContentKind::Pdf, super::PdfExtractor);

        registry
    }

    /// Registers `extractor` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: ContentKind, extractor: impl TextExtractor + 'static) {
        self.extractors.insert(kind, Arc::new(extractor));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, kind: ContentKind, extractor: impl TextExtractor + 'static) -> Self {
        self.register(kind, extractor);
        self
    }

    /// Returns true if some extractor handles `kind`.
    pub fn supports(&self, kind: ContentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Extracts the text of one attachment.
    ///
    /// Returns `Ok(None)` when no extractor handles the attachment's kind.
    pub fn extract(&self, attachment: &Attachment) -> Result<Option<String>> {
        let kind = attachment.kind();
        let Some(extractor) = self.extractors.get(&kind) else {
            tracing::debug!(
                target: TRACING_TARGET,
                file = %attachment.name,
                kind = %kind,
                "No extractor for attachment, skipping"
            );
            return Ok(None);
        };

        let text = extractor.extract(attachment)?;
        tracing::debug!(
            target: TRACING_TARGET,
            file = %attachment.name,
            kind = %kind,
            bytes = attachment.len(),
            chars = text.chars().count(),
            "Extracted attachment text"
        );
        Ok(Some(text))
    }
}
