use serde::{Deserialize, Serialize};

/// Lifecycle status of a bug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    New,
    InProgress,
    Resolved,
    Closed,
    /// Forward compatibility: unknown statuses deserialize here.
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    /// The wire name of this status (used in query strings).
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::New => "new",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Closed => "closed",
            ReportStatus::Unknown => "unknown",
        }
    }
}

/// A submitted bug report as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugReport {
    pub id: String,
    pub status: ReportStatus,
    pub description: String,
    pub page_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

/// A message attached to a bug report's conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMessage {
    pub id: String,
    pub bug_report_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sender: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}
