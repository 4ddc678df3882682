//! Heuristic content digests for the summary document.
//!
//! This is a local stand-in for a real summarization service: it picks the
//! first few well-formed sentences, or describes the document by type when
//! the text does not yield enough of them.

use std::path::Path;

/// Lines mentioning any of these are metadata, not prose.
const METADATA_KEYWORDS: [&str; 6] = ["date:", "time:", "location:", "attendees:", "customer:", "invoice"];

const MIN_LINE_CHARS: usize = 11;
const SENTENCE_CHARS: std::ops::Range<usize> = 21..200;

/// `"TXT file, 1.2 KB"` style description of a file on disk.
pub fn describe_file(path: &Path) -> std::io::Result<String> {
    let size = std::fs::metadata(path)?.len();
    Ok(format!("{} file, {}", file_kind(path), human_size(size)))
}

fn file_kind(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_uppercase())
        .unwrap_or_else(|| "untyped".to_string())
}

pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} bytes")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Up to `max` summary sentences for a document's text.
pub fn digest_sentences(text: &str, file_name: &str, max: usize) -> Vec<String> {
    let prose = prose_lines(text);
    let mut sentences: Vec<String> = split_sentences(&prose, max)
        .into_iter()
        .filter(|s| SENTENCE_CHARS.contains(&s.chars().count()))
        .take(max)
        .collect();

    if sentences.len() < 2 {
        sentences = canned_description(text, file_name);
        sentences.truncate(max);
    }
    sentences
}

/// Body text with headings, bullets, short lines and metadata lines removed.
fn prose_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .filter(|line| !line.starts_with('#') && !line.starts_with('*'))
        .filter(|line| {
            let lower = line.to_lowercase();
            !METADATA_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on `.`, `!` or `?` followed by whitespace. Text without any sentence
/// punctuation is cut into `max` roughly equal word chunks instead.
fn split_sentences(prose: &str, max: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = prose.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let at_break = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if at_break {
            let end = i + c.len_utf8();
            sentences.push(prose[start..end].trim().to_string());
            start = end;
        }
    }
    let tail = prose[start..].trim();

    if sentences.is_empty() {
        return word_chunks(tail, max);
    }
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn word_chunks(text: &str, max: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let chunk_size = if max > 0 && words.len() > max * 10 {
        words.len().div_ceil(max)
    } else {
        words.len()
    };
    words.chunks(chunk_size).map(|chunk| chunk.join(" ")).collect()
}

fn canned_description(text: &str, file_name: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let lines: [&str; 3] = if lower.contains("invoice") {
        [
            "This is an invoice document for business services or products.",
            "It contains billing information, itemized charges, and payment terms.",
            "The document includes customer details and financial calculations.",
        ]
    } else if lower.contains("meeting") || lower.contains("minutes") {
        [
            "This document contains meeting minutes or notes from a business meeting.",
            "It includes attendee information, agenda items, and discussion points.",
            "Action items and follow-up tasks are documented for future reference.",
        ]
    } else if lower.contains("report") || lower.contains("financial") {
        [
            "This is a business report containing performance or financial data.",
            "It includes analysis, metrics, and key performance indicators.",
            "The report provides insights and recommendations for business decisions.",
        ]
    } else if lower.contains("project") {
        [
            "This document relates to project management and planning activities.",
            "It contains project status updates, timelines, and deliverables.",
            "Team information and project milestones are documented.",
        ]
    } else {
        let word_count = text.split_whitespace().count();
        let kind = file_kind(Path::new(file_name));
        return vec![
            format!("This is a {kind} document containing {word_count} words of text content."),
            "The document appears to contain business or organizational information.".to_string(),
            "It includes structured information relevant to its intended purpose.".to_string(),
        ];
    };
    lines.iter().map(|s| s.to_string()).collect()
}
