pub mod digest;
pub mod report;

pub use digest::*;
pub use report::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No processed files to summarize")]
    NothingToSummarize,
}
