pub mod naming;
pub mod renamer;

pub use naming::*;
pub use renamer::*;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::dating::{CalendarDate, DateLabel, PriorityTier};
use super::import::ImportError;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),
}

/// Where a file's prefix date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateSource {
    Content {
        label: Option<DateLabel>,
        tier: PriorityTier,
    },
    Filename,
    Fallback,
}

impl DateSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Content { label: Some(label), tier } => {
                format!("content: {} ({})", label.as_str(), tier.as_str())
            }
            Self::Content { label: None, tier } => format!("content: standalone date ({})", tier.as_str()),
            Self::Filename => "filename".to_string(),
            Self::Fallback => "fallback date".to_string(),
        }
    }
}

/// One file that was renamed (or would be, in dry-run).
#[derive(Debug, Clone, Serialize)]
pub struct RenamedFile {
    pub original_name: String,
    pub new_name: String,
    pub date: CalendarDate,
    pub source: DateSource,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of one `process_folder` run.
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub folder: PathBuf,
    pub dry_run: bool,
    pub extract_dates: bool,
    pub processed: Vec<RenamedFile>,
    pub failures: Vec<RenameFailure>,
    pub summary_document: Option<PathBuf>,
}

impl RenameReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }

    pub fn count_by_source(&self, pred: impl Fn(&DateSource) -> bool) -> usize {
        self.processed.iter().filter(|f| pred(&f.source)).count()
    }
}

#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Used when neither content nor filename yields a date. Defaults to today.
    pub fallback_date: Option<CalendarDate>,
    pub extract_dates: bool,
    pub dry_run: bool,
    pub write_summary: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            fallback_date: None,
            extract_dates: true,
            dry_run: false,
            write_summary: true,
        }
    }
}
