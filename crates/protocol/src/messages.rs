use serde::{Deserialize, Serialize};

use crate::console_log::ConsoleLogEntry;
use crate::report::{BugReport, ReportMessage};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Which generation of identity field names to populate on a submission.
///
/// Two naming schemes exist across backend versions (`user_*` and
/// `reporter_*`). Both are carried on [`SubmitReportRequest`] as independent
/// optional field sets; this selects which one a builder fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentitySchema {
    /// `user_email` / `user_name` / `user_id`.
    #[default]
    UserFields,
    /// `reporter_email` / `reporter_name` / `reporter_user_id`.
    ReporterFields,
}

/// Request body for submitting a new bug report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    pub page_url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub screenshot_data_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub console_logs: Vec<ConsoleLogEntry>,
    /// Free-form diagnostic context (user agent, viewport, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    // Identity, first naming scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    // Identity, second naming scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_user_id: Option<String>,
}

impl SubmitReportRequest {
    /// Fills in the identity fields named by `schema`, leaving the other
    /// scheme's fields untouched.
    pub fn set_identity(
        &mut self,
        schema: IdentitySchema,
        email: Option<String>,
        name: Option<String>,
        user_id: Option<String>,
    ) {
        match schema {
            IdentitySchema::UserFields => {
                self.user_email = email;
                self.user_name = name;
                self.user_id = user_id;
            }
            IdentitySchema::ReporterFields => {
                self.reporter_email = email;
                self.reporter_name = name;
                self.reporter_user_id = user_id;
            }
        }
    }
}

/// Sends a message on an existing bug report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub bug_report_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Response payloads (the `data` field of the envelope)
// ---------------------------------------------------------------------------

/// Response to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReportResponse {
    pub bug_report: BugReport,
}

/// Paging details on a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub total_pages: u32,
}

/// Response listing the caller's bug reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub bug_reports: Vec<BugReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Response carrying one bug report and, optionally, its message thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetailsResponse {
    pub bug_report: BugReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ReportMessage>,
}

/// Response to sending a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ReportMessage,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
