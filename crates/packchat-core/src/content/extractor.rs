use super::{Attachment, table};
use crate::{Error, Result};

/// Turns the raw bytes of an attachment into text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, attachment: &Attachment) -> Result<String>;
}

/// Decodes the attachment as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, attachment: &Attachment) -> Result<String> {
        String::from_utf8(attachment.data.clone())
            .map_err(|err| Error::from(err).with_context(format!("file: {}", attachment.name)))
    }
}

/// Parses the attachment as CSV and renders it as an aligned table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor;

impl TextExtractor for TableExtractor {
    fn extract(&self, attachment: &Attachment) -> Result<String> {
        let text = PlainTextExtractor.extract(attachment)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let rows = table::parse_csv(text)
            .map_err(|err| err.with_context(format!("file: {}", attachment.name)))?;
        if rows.is_empty() {
            return Err(Error::invalid_input()
                .with_message("No columns to parse from file")
                .with_context(format!("file: {}", attachment.name)));
        }

        Ok(table::render_table(&rows))
    }
}

/// Extracts the text layer of a PDF document.
#[cfg(feature = "pdf")]
#[cfg_attr(docsrs, doc(cfg(feature = "pdf")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfExtractor {
    fn extract(&self, attachment: &Attachment) -> Result<String> {
        pdf_extract::extract_text_from_mem(&attachment.data).map_err(|err| {
            Error::invalid_input()
                .with_message(format!("Failed to extract text from PDF: {err}"))
                .with_context(format!("file: {}", attachment.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_plain_text() {
        let attachment = Attachment::new("a.txt", None, "héllo\n");
        assert_eq!(PlainTextExtractor.extract(&attachment).unwrap(), "héllo\n");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let attachment = Attachment::new("a.txt", None, vec![0xffu8, 0x00]);
        let error = PlainTextExtractor.extract(&attachment).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_table() {
        let attachment = Attachment::new("t.csv", None, "\u{feff}id,city\n1,Paris\n22,Rome\n");
        assert_eq!(
            TableExtractor.extract(&attachment).unwrap(),
            "id  city\n 1 Paris\n22  Rome"
        );
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let attachment = Attachment::new("t.csv", None, "\n\n");
        assert!(TableExtractor.extract(&attachment).is_err());
    }
}
