//! Content type classification for attachments.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Broad category of an attachment, deciding which extractor runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Plain UTF-8 text.
    Text,
    /// Comma-separated table.
    Table,
    /// PDF document.
    Pdf,
    /// Word document. Accepted, but no text is extracted.
    Word,
    /// Unknown or unsupported content type
    #[default]
    Unknown,
}

impl ContentKind {
    /// Classifies a MIME type, ignoring parameters such as `charset`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "text/plain" => Self::Text,
            "text/csv" | "application/csv" => Self::Table,
            "application/pdf" => Self::Pdf,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::Word
            }
            _ => Self::Unknown,
        }
    }

    /// Classifies a file extension, with or without the leading dot.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();

        match extension.as_str() {
            "txt" => Self::Text,
            "csv" => Self::Table,
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Word,
            _ => Self::Unknown,
        }
    }

    /// Check if this content kind is known
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(ContentKind::from_mime("text/plain"), ContentKind::Text);
        assert_eq!(
            ContentKind::from_mime("text/plain; charset=utf-8"),
            ContentKind::Text
        );
        assert_eq!(ContentKind::from_mime("TEXT/CSV"), ContentKind::Table);
        assert_eq!(ContentKind::from_mime("application/pdf"), ContentKind::Pdf);
        assert_eq!(
            ContentKind::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            ContentKind::Word
        );
        assert_eq!(ContentKind::from_mime("image/png"), ContentKind::Unknown);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ContentKind::from_extension("txt"), ContentKind::Text);
        assert_eq!(ContentKind::from_extension(".CSV"), ContentKind::Table);
        assert_eq!(ContentKind::from_extension("docx"), ContentKind::Word);
        assert_eq!(ContentKind::from_extension("exe"), ContentKind::Unknown);
        assert!(!ContentKind::Unknown.is_known());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(ContentKind::Table.to_string(), "table");
        assert_eq!(ContentKind::from_str("pdf").unwrap(), ContentKind::Pdf);
        assert!(ContentKind::from_str("spreadsheet").is_err());
        assert_eq!(ContentKind::default(), ContentKind::Unknown);
    }
}
