use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::naming::{first_date_in_filename, unique_target};
use super::{DateSource, RenameError, RenameFailure, RenameOptions, RenameReport, RenamedFile};
use crate::pipeline::dating::{CalendarDate, DateExtractor};
use crate::pipeline::import::{list_eligible_files, read_document_text, ContentReader, PlainTextReader};
use crate::pipeline::summary::{describe_file, write_summary_document};

/// Renames every eligible file in a folder with a `YYYY.MM.DD_` prefix.
pub struct DocumentRenamer {
    reader: Box<dyn ContentReader + Send + Sync>,
    options: RenameOptions,
    /// Frozen for the whole run: plausibility bound, fallback date and
    /// summary timestamp all derive from it.
    now: NaiveDateTime,
}

impl DocumentRenamer {
    pub fn new(options: RenameOptions, now: NaiveDateTime) -> Self {
        Self {
            reader: Box::new(PlainTextReader),
            options,
            now,
        }
    }

    /// Swap in a different text extractor (OCR, PDF, office documents).
    pub fn with_reader(mut self, reader: Box<dyn ContentReader + Send + Sync>) -> Self {
        self.reader = reader;
        self
    }

    fn today(&self) -> CalendarDate {
        CalendarDate::from(self.now.date())
    }

    /// Resolve the prefix date for one file: content, then filename, then
    /// the fallback date.
    pub fn resolve_date(&self, path: &Path, file_name: &str) -> (CalendarDate, DateSource) {
        if self.options.extract_dates {
            let text = read_document_text(self.reader.as_ref(), path);
            if let Some(selected) = DateExtractor::new(self.today()).extract(&text) {
                let source = DateSource::Content {
                    label: selected.label,
                    tier: selected.tier,
                };
                return (selected.date, source);
            }
            if let Some(date) = first_date_in_filename(file_name) {
                return (date, DateSource::Filename);
            }
        }
        let fallback = self.options.fallback_date.unwrap_or_else(|| self.today());
        (fallback, DateSource::Fallback)
    }

    /// Rename (or plan, in dry-run) a single file. `planned` holds the targets
    /// already claimed in this batch and gains this file's target.
    pub fn process_file(
        &self,
        path: &Path,
        planned: &mut HashSet<PathBuf>,
    ) -> Result<RenamedFile, RenameError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RenameError::InvalidFileName(path.to_path_buf()))?
            .to_string();
        let dir = path
            .parent()
            .ok_or_else(|| RenameError::InvalidFileName(path.to_path_buf()))?;

        let description = describe_file(path)?;
        let (date, source) = self.resolve_date(path, &file_name);
        let target = unique_target(dir, &file_name, &date, planned);
        let new_name = target
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RenameError::InvalidFileName(target.clone()))?
            .to_string();

        if !self.options.dry_run {
            std::fs::rename(path, &target)?;
        }
        planned.insert(target);

        tracing::info!(
            file = %file_name,
            new_name = %new_name,
            date = %date,
            source = %source.describe(),
            dry_run = self.options.dry_run,
            "File renamed"
        );

        Ok(RenamedFile {
            original_name: file_name,
            new_name,
            date,
            source,
            description,
        })
    }

    /// Process every eligible file in `folder`. Per-file errors are recorded
    /// in the report; only an unusable folder fails the whole run.
    pub fn process_folder(&self, folder: &Path) -> Result<RenameReport, RenameError> {
        let files = list_eligible_files(folder)?;
        tracing::info!(
            folder = %folder.display(),
            files = files.len(),
            dry_run = self.options.dry_run,
            extract_dates = self.options.extract_dates,
            "Processing folder"
        );

        let mut report = RenameReport {
            folder: folder.to_path_buf(),
            dry_run: self.options.dry_run,
            extract_dates: self.options.extract_dates,
            processed: Vec::new(),
            failures: Vec::new(),
            summary_document: None,
        };

        let mut planned = HashSet::new();
        for path in &files {
            match self.process_file(path, &mut planned) {
                Ok(renamed) => report.processed.push(renamed),
                Err(e) => {
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    tracing::warn!(file = %file_name, error = %e, "Failed to rename file");
                    report.failures.push(RenameFailure {
                        file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        if self.options.write_summary && !self.options.dry_run && !report.processed.is_empty() {
            match write_summary_document(folder, &report.processed, self.reader.as_ref(), self.now) {
                Ok(path) => report.summary_document = Some(path),
                Err(e) => tracing::warn!(error = %e, "Failed to write summary document"),
            }
        }

        tracing::info!(
            renamed = report.processed.len(),
            failed = report.failures.len(),
            "Folder processed"
        );
        Ok(report)
    }
}
