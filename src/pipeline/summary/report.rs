use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::digest::digest_sentences;
use super::SummaryError;
use crate::config::{SUMMARY_FILE_STEM, SUMMARY_SENTENCES};
use crate::pipeline::dating::CalendarDate;
use crate::pipeline::import::{read_document_text, ContentReader};
use crate::pipeline::rename::naming::title_from_name;
use crate::pipeline::rename::RenamedFile;

/// One document section of the summary.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub title: String,
    pub file_name: String,
    pub date: CalendarDate,
    pub date_source: String,
    pub sentences: Vec<String>,
}

/// `YYYY.MM.DD_Document_Summary.md` in `folder`, with `_1`, `_2`, ... when taken.
pub fn summary_document_path(folder: &Path, today: &CalendarDate) -> PathBuf {
    let mut path = folder.join(format!("{}_{}.md", today.prefix(), SUMMARY_FILE_STEM));
    let mut counter = 1;
    while path.exists() {
        path = folder.join(format!("{}_{}_{}.md", today.prefix(), SUMMARY_FILE_STEM, counter));
        counter += 1;
    }
    path
}

/// Build summary entries for renamed files still present in `folder`.
pub fn build_entries(
    folder: &Path,
    processed: &[RenamedFile],
    reader: &dyn ContentReader,
) -> Vec<SummaryEntry> {
    processed
        .iter()
        .filter_map(|file| {
            let path = folder.join(&file.new_name);
            if !path.exists() {
                tracing::debug!(file = %file.new_name, "Renamed file missing, left out of summary");
                return None;
            }
            let text = read_document_text(reader, &path);
            Some(SummaryEntry {
                title: title_from_name(&file.new_name),
                file_name: file.new_name.clone(),
                date: file.date,
                date_source: file.source.describe(),
                sentences: digest_sentences(&text, &file.new_name, SUMMARY_SENTENCES),
            })
        })
        .collect()
}

/// Render the Markdown summary document.
pub fn render_summary(folder: &Path, entries: &[SummaryEntry], generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("# Document Summary\n\n");
    out.push_str(&format!("**Generated:** {}\n", generated_at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("**Folder:** `{}`\n", folder.display()));
    out.push_str(&format!("**Files Processed:** {}\n\n", entries.len()));
    out.push_str("---\n\n");

    for entry in entries {
        out.push_str(&format!("## {}\n\n", entry.title));
        out.push_str(&format!("**File:** `{}`\n", entry.file_name));
        out.push_str(&format!("**Date:** {} ({})\n\n", entry.date, entry.date_source));
        out.push_str("**Summary:**\n");
        for (i, sentence) in entry.sentences.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, sentence));
        }
        out.push_str("\n---\n\n");
    }

    out.push_str("## Summary Statistics\n\n");
    out.push_str(&format!("- **Total Documents:** {}\n", entries.len()));

    let mut by_year: BTreeMap<u16, usize> = BTreeMap::new();
    for entry in entries {
        *by_year.entry(entry.date.year()).or_default() += 1;
    }
    if !by_year.is_empty() {
        out.push_str("- **Documents by Year:**\n");
        for (year, count) in by_year {
            let noun = if count == 1 { "document" } else { "documents" };
            out.push_str(&format!("  - {year}: {count} {noun}\n"));
        }
    }
    out
}

/// Write the summary document for `processed` into `folder`.
pub fn write_summary_document(
    folder: &Path,
    processed: &[RenamedFile],
    reader: &dyn ContentReader,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, SummaryError> {
    if processed.is_empty() {
        return Err(SummaryError::NothingToSummarize);
    }
    let entries = build_entries(folder, processed, reader);
    let markdown = render_summary(folder, &entries, generated_at);
    let path = summary_document_path(folder, &CalendarDate::from(generated_at.date()));
    std::fs::write(&path, markdown)?;

    tracing::info!(
        path = %path.display(),
        documents = entries.len(),
        "Summary document written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dating::{DateLabel, PriorityTier};
    use crate::pipeline::import::PlainTextReader;
    use crate::pipeline::rename::DateSource;

    fn generated_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn renamed(new_name: &str, date: CalendarDate, source: DateSource) -> RenamedFile {
        RenamedFile {
            original_name: "original.txt".into(),
            new_name: new_name.into(),
            date,
            source,
            description: "TXT file, 10 bytes".into(),
        }
    }

    #[test]
    fn summary_path_avoids_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let today = CalendarDate::new(2026, 10, 19).unwrap();
        let first = summary_document_path(dir.path(), &today);
        assert!(first.ends_with("2026.10.19_Document_Summary.md"));
        std::fs::write(&first, "x").unwrap();
        let second = summary_document_path(dir.path(), &today);
        assert!(second.ends_with("2026.10.19_Document_Summary_1.md"));
    }

    #[test]
    fn renders_sections_and_year_statistics() {
        let entries = vec![
            SummaryEntry {
                title: "Client Invoice".into(),
                file_name: "2024.01.15_Client_Invoice.txt".into(),
                date: CalendarDate::new(2024, 1, 15).unwrap(),
                date_source: "content: Invoice Date (high)".into(),
                sentences: vec!["First.".into(), "Second.".into()],
            },
            SummaryEntry {
                title: "Notes".into(),
                file_name: "2023.05.02_Notes.txt".into(),
                date: CalendarDate::new(2023, 5, 2).unwrap(),
                date_source: "fallback date".into(),
                sentences: vec![],
            },
        ];
        let md = render_summary(Path::new("/docs"), &entries, generated_at());
        assert!(md.starts_with("# Document Summary"));
        assert!(md.contains("**Generated:** 2026-10-19 09:30:00"));
        assert!(md.contains("**Files Processed:** 2"));
        assert!(md.contains("## Client Invoice"));
        assert!(md.contains("**Date:** 2024-01-15 (content: Invoice Date (high))"));
        assert!(md.contains("1. First.\n2. Second."));
        assert!(md.contains("  - 2023: 1 document\n  - 2024: 1 document"));
    }

    #[test]
    fn writes_document_for_existing_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("2024.01.15_Invoice.txt"),
            "Invoice Date: 2024-01-15\nTotal due: $120",
        )
        .unwrap();
        let processed = vec![
            renamed(
                "2024.01.15_Invoice.txt",
                CalendarDate::new(2024, 1, 15).unwrap(),
                DateSource::Content {
                    label: Some(DateLabel::InvoiceDate),
                    tier: PriorityTier::High,
                },
            ),
            renamed(
                "2024.02.01_Gone.txt",
                CalendarDate::new(2024, 2, 1).unwrap(),
                DateSource::Fallback,
            ),
        ];

        let path = write_summary_document(dir.path(), &processed, &PlainTextReader, generated_at()).unwrap();
        let md = std::fs::read_to_string(&path).unwrap();
        assert!(md.contains("## Invoice"));
        assert!(md.contains("invoice document"));
        assert!(!md.contains("Gone"));
        assert!(md.contains("**Files Processed:** 1"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_summary_document(dir.path(), &[], &PlainTextReader, generated_at());
        assert!(matches!(result, Err(SummaryError::NothingToSummarize)));
    }
}
