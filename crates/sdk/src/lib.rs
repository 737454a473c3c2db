//! Host-facing bug reporter SDK.
//!
//! Ties the capture service and the API client together behind one handle:
//! the host constructs a [`BugReporter`] from its configuration, optionally
//! plugs in a screenshot provider, and submits reports assembled from a
//! [`ReportDraft`] plus whatever the console capture recorded.

mod config;
mod report;
mod reporter;
mod screenshot;

pub use config::{BugReporterConfig, UserContext};
pub use report::{DraftError, MIN_DESCRIPTION_LEN, ReportDraft, ReportMetadata};
pub use reporter::{BugReporter, SdkError};
pub use screenshot::{ExclusionRules, ScreenshotError, ScreenshotProvider};

// Re-export the types hosts handle directly.
pub use bugrelay_api_client::ListReportsOptions;
pub use bugrelay_console_log::{ConsoleArg, ConsoleCapture};
pub use bugrelay_protocol::messages::{IdentitySchema, ReportDetailsResponse, ReportListResponse};
pub use bugrelay_protocol::report::{BugReport, ReportMessage, ReportStatus};
