use bugrelay_protocol::console_log::ConsoleLogEntry;
use bugrelay_protocol::messages::{IdentitySchema, SubmitReportRequest};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::UserContext;

/// Minimum length of a trimmed description accepted by the backend.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Problems assembling a submission from a draft.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("description must be at least {MIN_DESCRIPTION_LEN} characters, got {len}")]
    DescriptionTooShort { len: usize },
}

/// Diagnostic context attached to every submission.
///
/// Serialized camelCase, the field names the backend stores verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub user_agent: String,
    pub screen_resolution: String,
    pub viewport: String,
    pub timestamp: String,
}

impl ReportMetadata {
    /// Metadata with the current time and the given environment details.
    pub fn now(
        user_agent: impl Into<String>,
        screen_resolution: impl Into<String>,
        viewport: impl Into<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            screen_resolution: screen_resolution.into(),
            viewport: viewport.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// What the user filled in before submitting.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub page_url: String,
    pub description: String,
    pub screenshot_data_url: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub metadata: Option<ReportMetadata>,
}

impl ReportDraft {
    /// Assembles the wire payload: validates the description, attaches the
    /// console log snapshot, and fills the identity fields named by `schema`.
    pub fn into_request(
        self,
        console_logs: Vec<ConsoleLogEntry>,
        schema: IdentitySchema,
        user_context: Option<&UserContext>,
    ) -> Result<SubmitReportRequest, DraftError> {
        let description = self.description.trim().to_string();
        let len = description.chars().count();
        if len < MIN_DESCRIPTION_LEN {
            return Err(DraftError::DescriptionTooShort { len });
        }

        let metadata = match &self.metadata {
            Some(m) => match serde_json::to_value(m) {
                Ok(serde_json::Value::Object(map)) => map,
                _ => serde_json::Map::new(),
            },
            None => serde_json::Map::new(),
        };

        let mut request = SubmitReportRequest {
            page_url: self.page_url,
            description,
            screenshot_data_url: self.screenshot_data_url.unwrap_or_default(),
            console_logs,
            metadata,
            title: self.title,
            category: self.category,
            ..Default::default()
        };

        if let Some(ctx) = user_context {
            request.set_identity(
                schema,
                ctx.email.clone(),
                ctx.name.clone(),
                ctx.user_id.clone(),
            );
        }

        Ok(request)
    }
}
