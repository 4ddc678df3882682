//! Date extraction engine.
//!
//! `scanner` turns document text into prioritized candidates and `selector`
//! picks one of them. Both are pure: the only outside input is the `today`
//! bound, which callers pass in and which stays frozen for a whole call.

pub mod calendar;
pub mod labels;
pub mod scanner;
pub mod selector;
pub mod types;

pub use calendar::*;
pub use labels::*;
pub use scanner::*;
pub use selector::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatingError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Scan `text` and select its representative date.
pub fn extract_date(text: &str, today: CalendarDate) -> Option<SelectedDate> {
    DateExtractor::new(today).extract(text)
}

/// Scanner and selector bundled with a frozen `today`.
#[derive(Debug, Clone, Copy)]
pub struct DateExtractor {
    scanner: DateScanner,
}

impl DateExtractor {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            scanner: DateScanner::new(today),
        }
    }

    pub fn with_scanner(scanner: DateScanner) -> Self {
        Self { scanner }
    }

    pub fn candidates<'t>(&self, text: &'t str) -> Candidates<'t> {
        self.scanner.scan(text)
    }

    pub fn extract(&self, text: &str) -> Option<SelectedDate> {
        let selected = select(self.scanner.scan(text).inspect(|c| {
            tracing::debug!(
                date = %c.value,
                label = c.label.map(|l| l.as_str()).unwrap_or("-"),
                tier = c.tier.as_str(),
                offset = c.offset,
                "Date candidate"
            );
        }));

        match &selected {
            Some(s) => tracing::debug!(date = %s.date, reason = %s.reason(), "Date selected"),
            None => tracing::debug!(text_length = text.len(), "No date found in content"),
        }
        selected
    }
}
