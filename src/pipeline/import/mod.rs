pub mod content;
pub mod format;
pub mod listing;

pub use content::*;
pub use format::*;
pub use listing::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Folder '{0}' does not exist")]
    FolderNotFound(PathBuf),

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}
