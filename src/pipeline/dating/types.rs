use std::ops::Range;

use serde::Serialize;

use super::calendar::CalendarDate;
use super::labels::DateLabel;

/// Priority class of a candidate. Declared low to high so the derived
/// ordering gives `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A date-like span found in text, before label and window rules apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub value: CalendarDate,
    /// Byte range of the date text (label excluded).
    pub span: Range<usize>,
}

/// A date that survived scanning and is eligible for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCandidate {
    pub value: CalendarDate,
    pub label: Option<DateLabel>,
    /// Character (not byte) position of the date text within the document.
    pub offset: usize,
    pub tier: PriorityTier,
}

/// The winning candidate, with enough context to explain the choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedDate {
    pub date: CalendarDate,
    pub label: Option<DateLabel>,
    pub tier: PriorityTier,
    pub offset: usize,
}

impl SelectedDate {
    /// Short human-readable reason, e.g. `"Invoice Date (high)"`.
    pub fn reason(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({})", label.as_str(), self.tier.as_str()),
            None => format!("standalone date near start ({})", self.tier.as_str()),
        }
    }
}

impl From<DateCandidate> for SelectedDate {
    fn from(candidate: DateCandidate) -> Self {
        Self {
            date: candidate.value,
            label: candidate.label,
            tier: candidate.tier,
            offset: candidate.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering() {
        assert!(PriorityTier::High > PriorityTier::Medium);
        assert!(PriorityTier::Medium > PriorityTier::Low);
    }

    #[test]
    fn reason_mentions_label_and_tier() {
        let selected = SelectedDate {
            date: CalendarDate::new(2024, 1, 15).unwrap(),
            label: Some(DateLabel::InvoiceDate),
            tier: PriorityTier::High,
            offset: 14,
        };
        assert_eq!(selected.reason(), "Invoice Date (high)");

        let standalone = SelectedDate {
            label: None,
            tier: PriorityTier::Medium,
            ..selected
        };
        assert!(standalone.reason().contains("medium"));
    }
}
