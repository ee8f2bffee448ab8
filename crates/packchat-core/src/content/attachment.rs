use std::fmt;
use std::path::Path;

use super::ContentKind;
use crate::{Error, Result};

/// An uploaded file: name, optional declared MIME type and raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime: Option<String>,
    pub data: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}

impl Attachment {
    pub fn new(name: impl Into<String>, mime: Option<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime,
            data: data.into(),
        }
    }

    /// Reads a file from disk; the attachment is named after the file.
    pub async fn from_path(path: impl AsRef<Path>, mime: Option<String>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::invalid_input()
                    .with_message("Attachment path has no file name")
                    .with_context(format!("path: {}", path.display()))
            })?;

        let data = tokio::fs::read(path).await.map_err(|err| {
            Error::from(err)
                .with_message("Failed to read attachment")
                .with_context(format!("path: {}", path.display()))
        })?;

        Ok(Self::new(name, mime, data))
    }

    /// Classifies the attachment: declared MIME type first, extension second.
    pub fn kind(&self) -> ContentKind {
        let by_mime = self
            .mime
            .as_deref()
            .map(ContentKind::from_mime)
            .unwrap_or_default();
        if by_mime.is_known() {
            return by_mime;
        }

        Path::new(&self.name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(ContentKind::from_extension)
            .unwrap_or_default()
    }

    /// Size of the raw data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_prefers_mime() {
        let attachment = Attachment::new("report.txt", Some("text/csv".into()), "a,b\n1,2\n");
        assert_eq!(attachment.kind(), ContentKind::Table);
    }

    #[test]
    fn test_kind_falls_back_to_extension() {
        let declared = Attachment::new("notes.txt", Some("application/octet-stream".into()), "x");
        assert_eq!(declared.kind(), ContentKind::Text);

        let undeclared = Attachment::new("data.CSV", None, "x");
        assert_eq!(undeclared.kind(), ContentKind::Table);

        let unknown = Attachment::new("archive", None, "x");
        assert_eq!(unknown.kind(), ContentKind::Unknown);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, "hello").await.unwrap();

        let attachment = Attachment::from_path(&path, None).await.unwrap();
        assert_eq!(attachment.name, "notes.txt");
        assert_eq!(attachment.data, b"hello");
        assert_eq!(attachment.kind(), ContentKind::Text);
    }

    #[tokio::test]
    async fn test_from_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let error = Attachment::from_path(dir.path().join("missing.txt"), None)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidInput);
    }
}
