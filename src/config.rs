/// Application-level constants
pub const APP_NAME: &str = "docstamp";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unlabeled dates count as candidates only when they start within this
/// many characters of the beginning of the text.
pub const LEADING_WINDOW_CHARS: usize = 500;

/// Earliest year accepted as a document date.
pub const MIN_DOCUMENT_YEAR: u16 = 1900;

/// Plausible year range for dates embedded in filenames.
pub const FILENAME_YEAR_RANGE: std::ops::RangeInclusive<u16> = 1900..=2100;

/// Files larger than this are never read for content.
pub const MAX_CONTENT_FILE_SIZE: u64 = 100 * 1024 * 1024; // 100MB

/// Stem of the generated summary document (`YYYY.MM.DD_Document_Summary.md`).
pub const SUMMARY_FILE_STEM: &str = "Document_Summary";

/// Number of digest sentences written per document in the summary.
pub const SUMMARY_SENTENCES: usize = 3;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "docstamp=info,docstamp_lib=info,warn".to_string()
}
