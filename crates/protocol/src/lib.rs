//! Wire types for the bug reporter backend API.
//!
//! Everything here mirrors what the backend reads and writes: the response
//! envelope, the bug report resources, the request/response payloads, and
//! the captured console log entries embedded in submissions.

pub mod console_log;
pub mod envelope;
pub mod messages;
pub mod report;

// Re-export primary types for convenience.
pub use console_log::{CapturedValue, ConsoleLogEntry, ErrorShape, LogLevel, Primitive};
pub use envelope::{ApiError, Envelope};
pub use messages::{IdentitySchema, SendMessageRequest, SubmitReportRequest};
pub use report::{BugReport, ReportMessage, ReportStatus};
