//! Candidate scanner: finds every plausible date in a text blob.
//!
//! Each surface form is matched by its own pattern. The per-form streams are
//! merged into a single stream in document order, then labels are resolved
//! by looking at the text immediately before each date.

use std::iter::Peekable;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::calendar::{month_from_name, CalendarDate};
use super::labels::DateLabel;
use super::types::{DateCandidate, DateMatch, PriorityTier};
use crate::config::{LEADING_WINDOW_CHARS, MIN_DOCUMENT_YEAR};

/// How far back (in bytes) from a date the label lookup reaches.
const LABEL_LOOKBEHIND: usize = 64;

const MONTH_ALTERNATION: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

static YEAR_MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})([-/])(\d{1,2})([-/])(\d{1,2})").unwrap());

static MONTH_DAY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})([-/])(\d{1,2})([-/])(\d{4})").unwrap());

static MONTH_NAME_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_ALTERNATION})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})"
    ))
    .unwrap()
});

static DAY_MONTH_NAME_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_ALTERNATION})\.?,?\s+(\d{{4}})"
    ))
    .unwrap()
});

/// A label phrase glued to the end of the text that precedes a date.
static LABEL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(invoice\s+date|document\s+date|report\s+date|meeting\s+date|last\s+updated|due\s+date|next\s+meeting|deadline|created|date)[ \t]*:\s*$",
    )
    .unwrap()
});

/// The recognized ways a date can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceForm {
    /// `2024-01-15`, `2024/01/15`
    YearMonthDay,
    /// `01/15/2024`, `01-15-2024`
    MonthDayYear,
    /// `January 15, 2024`, `Jan. 15 2024`
    MonthNameDayYear,
    /// `15 January 2024`, `15th Jan 2024`
    DayMonthNameYear,
}

impl SurfaceForm {
    pub const ALL: [SurfaceForm; 4] = [
        Self::YearMonthDay,
        Self::MonthDayYear,
        Self::MonthNameDayYear,
        Self::DayMonthNameYear,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            Self::YearMonthDay => &*YEAR_MONTH_DAY,
            Self::MonthDayYear => &*MONTH_DAY_YEAR,
            Self::MonthNameDayYear => &*MONTH_NAME_DAY_YEAR,
            Self::DayMonthNameYear => &*DAY_MONTH_NAME_YEAR,
        }
    }

    fn parse(&self, caps: &Captures<'_>) -> Option<CalendarDate> {
        let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
        let same_separator = || Some(caps.get(2)?.as_str() == caps.get(4)?.as_str());
        match self {
            Self::YearMonthDay => {
                if !same_separator().unwrap_or(false) {
                    return None;
                }
                CalendarDate::from_parts(num(1)?, num(3)?, num(5)?)
            }
            Self::MonthDayYear => {
                if !same_separator().unwrap_or(false) {
                    return None;
                }
                CalendarDate::from_parts(num(5)?, num(1)?, num(3)?)
            }
            Self::MonthNameDayYear => {
                let month = month_from_name(caps.get(1)?.as_str())?;
                CalendarDate::from_parts(num(3)?, u32::from(month), num(2)?)
            }
            Self::DayMonthNameYear => {
                let month = month_from_name(caps.get(2)?.as_str())?;
                CalendarDate::from_parts(num(3)?, u32::from(month), num(1)?)
            }
        }
    }

    /// All well-formed dates of this form, in document order.
    /// Matches embedded in a longer digit run (`12024-01-15`) are rejected.
    pub fn find_iter<'t>(self, text: &'t str) -> impl Iterator<Item = DateMatch> + 't {
        self.regex().captures_iter(text).filter_map(move |caps| {
            let whole = caps.get(0)?;
            if !digit_bounded(text, whole.range()) {
                return None;
            }
            let value = self.parse(&caps)?;
            Some(DateMatch {
                value,
                span: whole.range(),
            })
        })
    }
}

fn digit_bounded(text: &str, span: Range<usize>) -> bool {
    let bytes = text.as_bytes();
    let before = span.start.checked_sub(1).map(|i| bytes[i]);
    let after = bytes.get(span.end).copied();
    !before.is_some_and(|b| b.is_ascii_digit()) && !after.is_some_and(|b| b.is_ascii_digit())
}

/// The label (if any) that directly precedes the byte position `date_start`.
pub fn label_before(text: &str, date_start: usize) -> Option<DateLabel> {
    let mut from = date_start.saturating_sub(LABEL_LOOKBEHIND);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    let caps = LABEL_SUFFIX.captures(&text[from..date_start])?;
    DateLabel::from_phrase(caps.get(1)?.as_str())
}

/// Scans text for date candidates.
///
/// `today` bounds the plausible year range: dates before 1900 or more than one
/// year after `today` are treated as misparsed numbers, not dates.
#[derive(Debug, Clone, Copy)]
pub struct DateScanner {
    today: CalendarDate,
    leading_window: usize,
}

impl DateScanner {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            today,
            leading_window: LEADING_WINDOW_CHARS,
        }
    }

    /// Override how many leading characters may hold an unlabeled candidate.
    pub fn with_leading_window(mut self, chars: usize) -> Self {
        self.leading_window = chars;
        self
    }

    pub fn is_plausible(&self, date: &CalendarDate) -> bool {
        date.year() >= MIN_DOCUMENT_YEAR && *date <= self.today.one_year_later()
    }

    /// Lazily yields candidates in document order. Calling `scan` again on
    /// the same text restarts the sequence from the beginning.
    ///
    /// Implausible dates are dropped per form, before the forms are merged,
    /// so they never claim a span that a valid date overlaps.
    pub fn scan<'t>(&self, text: &'t str) -> Candidates<'t> {
        let scanner = *self;
        let streams = SurfaceForm::ALL
            .into_iter()
            .map(|form| {
                let plausible = form.find_iter(text).filter(move |m| {
                    let keep = scanner.is_plausible(&m.value);
                    if !keep {
                        tracing::trace!(date = %m.value, "Discarding implausible date");
                    }
                    keep
                });
                let stream: Box<dyn Iterator<Item = DateMatch> + 't> = Box::new(plausible);
                stream.peekable()
            })
            .collect();
        Candidates {
            scanner: *self,
            text,
            streams,
            claimed_until: 0,
            cursor_byte: 0,
            cursor_char: 0,
        }
    }
}

/// Iterator returned by [`DateScanner::scan`].
pub struct Candidates<'t> {
    scanner: DateScanner,
    text: &'t str,
    streams: Vec<Peekable<Box<dyn Iterator<Item = DateMatch> + 't>>>,
    /// End of the last emitted span; later matches overlapping it are dropped.
    claimed_until: usize,
    cursor_byte: usize,
    cursor_char: usize,
}

impl Candidates<'_> {
    /// Next match across all forms: earliest start, longest span on ties.
    fn next_match(&mut self) -> Option<DateMatch> {
        let mut best: Option<(usize, usize, usize)> = None;
        for (i, stream) in self.streams.iter_mut().enumerate() {
            if let Some(m) = stream.peek() {
                let key = (m.span.start, usize::MAX - m.span.end);
                if best.map_or(true, |(s, e, _)| key < (s, e)) {
                    best = Some((key.0, key.1, i));
                }
            }
        }
        let (_, _, idx) = best?;
        self.streams[idx].next()
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        self.cursor_char += self.text[self.cursor_byte..byte].chars().count();
        self.cursor_byte = byte;
        self.cursor_char
    }
}

impl Iterator for Candidates<'_> {
    type Item = DateCandidate;

    fn next(&mut self) -> Option<DateCandidate> {
        loop {
            let m = self.next_match()?;
            if m.span.start < self.claimed_until {
                continue;
            }
            self.claimed_until = m.span.end;

            let offset = self.char_offset(m.span.start);
            let label = label_before(self.text, m.span.start);
            let tier = match label {
                Some(label) => label.tier(),
                None if offset < self.scanner.leading_window => PriorityTier::Medium,
                None => continue,
            };

            return Some(DateCandidate {
                value: m.value,
                label,
                offset,
                tier,
            });
        }
    }
}
