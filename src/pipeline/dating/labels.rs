use serde::Serialize;

use super::types::PriorityTier;

/// Label phrases that may introduce a date, e.g. `Invoice Date: 2024-01-15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabel {
    InvoiceDate,
    DocumentDate,
    ReportDate,
    MeetingDate,
    Created,
    Date,
    LastUpdated,
    DueDate,
    NextMeeting,
    Deadline,
}

impl DateLabel {
    /// Look up a label phrase. Case and inner whitespace are normalized,
    /// so `"invoice   DATE"` resolves like `"Invoice Date"`.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let normalized = phrase
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let label = match normalized.as_str() {
            "invoice date" => Self::InvoiceDate,
            "document date" => Self::DocumentDate,
            "report date" => Self::ReportDate,
            "meeting date" => Self::MeetingDate,
            "created" => Self::Created,
            "date" => Self::Date,
            "last updated" => Self::LastUpdated,
            "due date" => Self::DueDate,
            "next meeting" => Self::NextMeeting,
            "deadline" => Self::Deadline,
            _ => return None,
        };
        Some(label)
    }

    pub fn tier(&self) -> PriorityTier {
        match self {
            Self::InvoiceDate
            | Self::DocumentDate
            | Self::ReportDate
            | Self::MeetingDate
            | Self::Created
            | Self::Date => PriorityTier::High,
            Self::LastUpdated => PriorityTier::Medium,
            Self::DueDate | Self::NextMeeting | Self::Deadline => PriorityTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvoiceDate => "Invoice Date",
            Self::DocumentDate => "Document Date",
            Self::ReportDate => "Report Date",
            Self::MeetingDate => "Meeting Date",
            Self::Created => "Created",
            Self::Date => "Date",
            Self::LastUpdated => "Last Updated",
            Self::DueDate => "Due Date",
            Self::NextMeeting => "Next Meeting",
            Self::Deadline => "Deadline",
        }
    }
}
