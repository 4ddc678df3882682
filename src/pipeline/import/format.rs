use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ImportError;
use crate::config::MAX_CONTENT_FILE_SIZE;

/// Broad file categories we recognize
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FileCategory {
    Pdf,
    Image,
    OfficeDocument,
    PlainText,
    Unsupported,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::OfficeDocument => "office_document",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }

    /// Text can be read without an external extraction collaborator.
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::PlainText)
    }
}

/// Result of format detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDetection {
    pub mime_type: String,
    pub category: FileCategory,
    pub file_size_bytes: u64,
}

const OFFICE_ZIP_EXTENSIONS: [&str; 6] = ["docx", "xlsx", "pptx", "odt", "ods", "odp"];

/// Detect file format from magic bytes. The extension is only consulted to
/// tell office documents apart from other ZIP archives.
pub fn detect_format(path: &Path) -> Result<FormatDetection, ImportError> {
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();

    if file_size > MAX_CONTENT_FILE_SIZE {
        return Ok(FormatDetection {
            mime_type: "unknown".into(),
            category: FileCategory::Unsupported,
            file_size_bytes: file_size,
        });
    }

    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; 16];
    let bytes_read = file.read(&mut header)?;

    let (mime_type, category) = match &header[..bytes_read.min(8)] {
        // PDF: starts with %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => ("application/pdf", FileCategory::Pdf),
        // JPEG: starts with FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => ("image/jpeg", FileCategory::Image),
        // PNG: starts with 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => ("image/png", FileCategory::Image),
        // TIFF: little-endian (49 49 2A 00) or big-endian (4D 4D 00 2A)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => {
            ("image/tiff", FileCategory::Image)
        }
        // OLE compound file: legacy .doc/.xls
        [0xD0, 0xCF, 0x11, 0xE0, ..] => ("application/msword", FileCategory::OfficeDocument),
        // ZIP container: docx/xlsx/odt are zips
        [0x50, 0x4B, 0x03, 0x04, ..] => {
            if has_extension(path, &OFFICE_ZIP_EXTENSIONS) {
                ("application/vnd.openxmlformats", FileCategory::OfficeDocument)
            } else {
                ("application/zip", FileCategory::Unsupported)
            }
        }
        _ => {
            if is_likely_text(&header[..bytes_read], path)? {
                ("text/plain", FileCategory::PlainText)
            } else {
                ("application/octet-stream", FileCategory::Unsupported)
            }
        }
    };

    Ok(FormatDetection {
        mime_type: mime_type.to_string(),
        category,
        file_size_bytes: file_size,
    })
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Check if a file is likely plain text: mostly printable in its first 4KB.
/// Latin-1 files count too, since every byte decodes to some character.
fn is_likely_text(header: &[u8], path: &Path) -> Result<bool, ImportError> {
    if header.is_empty() {
        // Empty files are text with nothing in it
        return Ok(true);
    }

    let mut file = std::fs::File::open(path)?;
    let mut buffer = vec![0u8; 4096];
    let n = file.read(&mut buffer)?;
    buffer.truncate(n);

    if buffer.contains(&0) {
        return Ok(false);
    }

    let text = match std::str::from_utf8(&buffer) {
        Ok(t) => t.to_string(),
        // A multi-byte sequence cut at the 4KB boundary is still UTF-8
        Err(e) if e.error_len().is_none() => {
            String::from_utf8_lossy(&buffer[..e.valid_up_to()]).into_owned()
        }
        Err(_) => buffer.iter().map(|&b| char::from(b)).collect(),
    };

    // At least 80% printable characters (or whitespace)
    let total = text.chars().count().max(1);
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    Ok(printable as f64 / total as f64 > 0.80)
}
