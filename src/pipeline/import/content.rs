//! Document text reading.
//!
//! Only plain text is decoded here. PDFs, images and office documents need an
//! OCR or layout extractor, which plugs in through [`ContentReader`].

use std::path::Path;

use super::format::{detect_format, FileCategory, FormatDetection};
use super::ImportError;

/// Turns a document on disk into plain text.
pub trait ContentReader {
    fn read_text(&self, path: &Path, format: &FormatDetection) -> Result<String, ImportError>;
}

/// Reads plain-text files (UTF-8, falling back to Latin-1). Every other
/// category yields an empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

impl ContentReader for PlainTextReader {
    fn read_text(&self, path: &Path, format: &FormatDetection) -> Result<String, ImportError> {
        if !format.category.is_plain_text() {
            tracing::debug!(
                file = %path.display(),
                category = format.category.as_str(),
                "No text reader for category, using empty content"
            );
            return Ok(String::new());
        }
        let bytes = std::fs::read(path)?;
        Ok(decode_text(&bytes))
    }
}

/// Decode bytes as UTF-8 (BOM stripped), or as Latin-1 when not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Detect the format and read the text of one document.
///
/// Unreadable documents are not an error for the caller: a failure is logged
/// and the document is treated as having no text.
pub fn read_document_text(reader: &dyn ContentReader, path: &Path) -> String {
    let result = detect_format(path).and_then(|format| {
        if format.category == FileCategory::Unsupported {
            return Ok(String::new());
        }
        reader.read_text(path, &format)
    });
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Could not read document content");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedReader(&'static str);

    impl ContentReader for FixedReader {
        fn read_text(&self, _path: &Path, _format: &FormatDetection) -> Result<String, ImportError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingReader;

    impl ContentReader for FailingReader {
        fn read_text(&self, _path: &Path, _format: &FormatDetection) -> Result<String, ImportError> {
            Err(ImportError::Extraction("OCR engine unavailable".into()))
        }
    }

    #[test]
    fn decodes_utf8() {
        assert_eq!(decode_text("Résumé 2024-01-15".as_bytes()), "Résumé 2024-01-15");
    }

    #[test]
    fn strips_utf8_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFDate: 2024-01-15"), "Date: 2024-01-15");
    }

    #[test]
    fn falls_back_to_latin1() {
        assert_eq!(decode_text(b"Re\xe7u le 2024-01-15"), "Reçu le 2024-01-15");
    }

    #[test]
    fn plain_text_reader_reads_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.txt");
        std::fs::write(&path, "Invoice Date: 2024-01-15").unwrap();
        assert_eq!(read_document_text(&PlainTextReader, &path), "Invoice Date: 2024-01-15");
    }

    #[test]
    fn plain_text_reader_skips_binary_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"%PDF-1.7 Date: 2024-01-15").unwrap();
        assert_eq!(read_document_text(&PlainTextReader, &path), "");
    }

    #[test]
    fn external_reader_handles_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();
        let reader = FixedReader("Report Date: 2024-03-01");
        assert_eq!(read_document_text(&reader, &path), "Report Date: 2024-03-01");
    }

    #[test]
    fn unsupported_files_never_reach_the_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.bin");
        std::fs::write(&path, [0x4D, 0x5A, 0x90, 0x00]).unwrap();
        assert_eq!(read_document_text(&FixedReader("Date: 2024-01-01"), &path), "");
    }

    #[test]
    fn read_failures_become_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert_eq!(read_document_text(&FailingReader, &path), "");
        assert_eq!(read_document_text(&PlainTextReader, &dir.path().join("gone.txt")), "");
    }
}
