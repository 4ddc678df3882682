use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::pipeline::dating::CalendarDate;
use crate::pipeline::rename::{DateSource, DocumentRenamer, RenameOptions, RenameReport};

#[derive(Parser, Debug)]
#[command(
    name = "docstamp",
    version,
    about = "Prefix documents with the date they were written (YYYY.MM.DD_name)"
)]
pub struct Cli {
    /// Folder whose files should be renamed
    pub folder: PathBuf,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Fallback date when no date is found (defaults to today)"
    )]
    pub date: Option<CalendarDate>,
    #[arg(long, help = "Skip content and filename date detection")]
    pub no_extract: bool,
    #[arg(long, help = "Show planned renames without touching any file")]
    pub dry_run: bool,
    #[arg(long, help = "Do not write the summary document")]
    pub no_summary: bool,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
}

impl Cli {
    pub fn rename_options(&self) -> RenameOptions {
        RenameOptions {
            fallback_date: self.date,
            extract_dates: !self.no_extract,
            dry_run: self.dry_run,
            write_summary: !self.no_summary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let now = chrono::Local::now().naive_local();
    let report = DocumentRenamer::new(cli.rename_options(), now)
        .process_folder(&cli.folder)
        .with_context(|| format!("cannot process {}", cli.folder.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data: &report })?
        );
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Human-readable listing of a rename run followed by an operation summary.
pub fn render_report(report: &RenameReport) -> String {
    let mut out = String::new();
    let verb = if report.dry_run { "Would rename" } else { "Renamed" };

    if report.total() == 0 {
        out.push_str(&format!("No eligible files in {}\n", report.folder.display()));
        return out;
    }

    for file in &report.processed {
        out.push_str(&format!(
            "{verb}: {} -> {} [{}] ({})\n",
            file.original_name,
            file.new_name,
            file.source.describe(),
            file.description
        ));
    }
    for failure in &report.failures {
        out.push_str(&format!("Failed: {} ({})\n", failure.file_name, failure.error));
    }

    out.push_str("\nOperation summary\n");
    out.push_str(&format!("  Files processed: {}\n", report.processed.len()));
    out.push_str(&format!("  Failures: {}\n", report.failures.len()));
    if report.extract_dates {
        let from_content =
            report.count_by_source(|s| matches!(s, DateSource::Content { .. }));
        let from_filename = report.count_by_source(|s| matches!(s, DateSource::Filename));
        out.push_str(&format!("  Dates from content: {from_content}\n"));
        out.push_str(&format!("  Dates from filename: {from_filename}\n"));
    }
    let fallback = report.count_by_source(|s| matches!(s, DateSource::Fallback));
    out.push_str(&format!("  Fallback dates: {fallback}\n"));
    if report.dry_run {
        out.push_str("  Dry run: no files were changed\n");
    }
    if let Some(path) = &report.summary_document {
        out.push_str(&format!("  Summary document: {}\n", path.display()));
    }
    out
}
