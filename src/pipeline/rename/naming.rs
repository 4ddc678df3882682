use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::FILENAME_YEAR_RANGE;
use crate::pipeline::dating::CalendarDate;

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}_").unwrap());

/// Field order of a filename date pattern.
#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    YearMonthDay,
    MonthDayYear,
    /// Day defaults to the 1st.
    MonthYear,
    /// Day defaults to the 1st.
    YearMonth,
}

/// Filename date patterns, most specific first.
static FILENAME_PATTERNS: LazyLock<Vec<(Regex, FieldOrder)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(\d{4})[._-](\d{1,2})[._-](\d{1,2})").unwrap(), FieldOrder::YearMonthDay),
        (Regex::new(r"(\d{4})(\d{2})(\d{2})").unwrap(), FieldOrder::YearMonthDay),
        (Regex::new(r"(\d{1,2})[._-](\d{1,2})[._-](\d{4})").unwrap(), FieldOrder::MonthDayYear),
        (Regex::new(r"(\d{2})(\d{2})(\d{4})").unwrap(), FieldOrder::MonthDayYear),
        (Regex::new(r"(\d{1,2})[._-](\d{4})").unwrap(), FieldOrder::MonthYear),
        (Regex::new(r"(\d{4})[._-](\d{1,2})").unwrap(), FieldOrder::YearMonth),
    ]
});

/// True if the name already starts with a `YYYY.MM.DD_` prefix.
pub fn has_date_prefix(file_name: &str) -> bool {
    DATE_PREFIX.is_match(file_name)
}

/// Clean a file stem for use in a new name: drop characters that are invalid
/// on common filesystems, turn spaces into underscores, collapse `__` runs.
pub fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    for c in stem.chars() {
        let c = match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => continue,
            ' ' => '_',
            other => other,
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

/// `YYYY.MM.DD_<sanitized stem><.ext>` for the given file.
pub fn prefixed_name(file_name: &str, date: &CalendarDate) -> String {
    prefixed_name_with_counter(file_name, date, None)
}

fn prefixed_name_with_counter(file_name: &str, date: &CalendarDate, counter: Option<u32>) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let suffix = counter.map(|n| format!("_{n}")).unwrap_or_default();
    format!("{}_{}{}{}", date.prefix(), sanitize_stem(stem), suffix, extension)
}

/// A path in `dir` for the prefixed name that neither exists yet nor is in
/// `reserved`. When the plain name is taken, `_1`, `_2`, ... is appended
/// before the extension.
pub fn unique_target(
    dir: &Path,
    file_name: &str,
    date: &CalendarDate,
    reserved: &HashSet<PathBuf>,
) -> PathBuf {
    let taken = |path: &Path| path.exists() || reserved.contains(path);
    let mut candidate = dir.join(prefixed_name(file_name, date));
    let mut counter = 1;
    while taken(&candidate) {
        candidate = dir.join(prefixed_name_with_counter(file_name, date, Some(counter)));
        counter += 1;
    }
    candidate
}

/// Human title recovered from a prefixed name: prefix and extension removed,
/// underscores back to spaces.
pub fn title_from_name(file_name: &str) -> String {
    let without_prefix = if has_date_prefix(file_name) {
        &file_name[11..]
    } else {
        file_name
    };
    Path::new(without_prefix)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(without_prefix)
        .replace('_', " ")
}

/// Dates embedded in a filename, in pattern preference order.
pub fn dates_in_filename(file_name: &str) -> Vec<CalendarDate> {
    let mut found = Vec::new();
    for (pattern, order) in FILENAME_PATTERNS.iter() {
        for caps in pattern.captures_iter(file_name) {
            let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
            let (Some(a), Some(b)) = (num(1), num(2)) else {
                continue;
            };
            let parts = match order {
                FieldOrder::YearMonthDay => num(3).map(|c| (a, b, c)),
                FieldOrder::MonthDayYear => num(3).map(|c| (c, a, b)),
                FieldOrder::MonthYear => Some((b, a, 1)),
                FieldOrder::YearMonth => Some((a, b, 1)),
            };
            let date = parts.and_then(|(y, m, d)| CalendarDate::from_parts(y, m, d));
            if let Some(date) = date.filter(|d| FILENAME_YEAR_RANGE.contains(&d.year())) {
                found.push(date);
            }
        }
    }
    found
}

/// First (highest preference) date embedded in a filename.
pub fn first_date_in_filename(file_name: &str) -> Option<CalendarDate> {
    dates_in_filename(file_name).into_iter().next()
}
