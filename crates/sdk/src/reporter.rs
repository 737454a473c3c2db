use std::sync::Arc;

use bugrelay_api_client::{Client, ClientConfig, ListReportsOptions};
use bugrelay_console_log::{ConsoleCapture, TracingSink};
use bugrelay_protocol::messages::{ReportDetailsResponse, ReportListResponse};
use bugrelay_protocol::report::{BugReport, ReportMessage};

use crate::config::BugReporterConfig;
use crate::report::{DraftError, ReportDraft};
use crate::screenshot::{ExclusionRules, ScreenshotError, ScreenshotProvider};

/// Errors surfaced by the reporter facade.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The host disabled the reporter; nothing is captured or sent.
    #[error("bug reporter is disabled")]
    Disabled,

    #[error("no screenshot provider configured")]
    NoScreenshotProvider,

    #[error(transparent)]
    Api(#[from] bugrelay_api_client::Error),

    #[error(transparent)]
    Screenshot(#[from] ScreenshotError),

    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// The embeddable bug reporter.
///
/// Owns the console capture (started at construction when enabled), the API
/// client, and the optional screenshot collaborator. A disabled reporter
/// constructs successfully but refuses every operation with
/// [`SdkError::Disabled`].
pub struct BugReporter {
    config: BugReporterConfig,
    console: Arc<ConsoleCapture>,
    client: Option<Client>,
    screenshot: Option<Box<dyn ScreenshotProvider>>,
    exclusions: ExclusionRules,
}

impl BugReporter {
    pub fn new(config: BugReporterConfig) -> Result<Self, SdkError> {
        let client = if config.enabled {
            let client_config = ClientConfig {
                debug: config.debug,
                ..ClientConfig::new(&config.api_url, &config.api_key)
            };
            Some(Client::new(client_config)?)
        } else {
            None
        };

        let console = Arc::new(ConsoleCapture::new(Box::new(TracingSink)));
        if config.enabled {
            console.start_capture();
        }

        if config.debug {
            tracing::debug!(
                api_url = %config.api_url,
                enabled = config.enabled,
                has_user_context = config.user_context.is_some(),
                "bug reporter initialized"
            );
        }

        Ok(Self {
            config,
            console,
            client,
            screenshot: None,
            exclusions: ExclusionRules::default(),
        })
    }

    /// Plugs in the screenshot collaborator.
    pub fn with_screenshot_provider(mut self, provider: Box<dyn ScreenshotProvider>) -> Self {
        self.screenshot = Some(provider);
        self
    }

    /// Replaces the default element exclusion rules.
    pub fn with_exclusion_rules(mut self, rules: ExclusionRules) -> Self {
        self.exclusions = rules;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// A shared handle to the console capture, for routing host logging
    /// through it.
    pub fn console(&self) -> Arc<ConsoleCapture> {
        Arc::clone(&self.console)
    }

    /// Captures a screenshot through the configured provider, honoring the
    /// exclusion rules.
    pub async fn capture_screenshot(&self) -> Result<String, SdkError> {
        if !self.config.enabled {
            return Err(SdkError::Disabled);
        }
        let provider = self.screenshot.as_ref().ok_or(SdkError::NoScreenshotProvider)?;
        Ok(provider.capture(&self.exclusions).await?)
    }

    /// Submits a report assembled from the draft, the current console log
    /// snapshot, and the configured identity.
    pub async fn submit(&self, draft: ReportDraft) -> Result<BugReport, SdkError> {
        let client = self.client()?;
        let request = draft.into_request(
            self.console.logs(),
            self.config.identity_schema,
            self.config.user_context.as_ref(),
        )?;
        Ok(client.create_bug_report(&request).await?)
    }

    /// Lists the caller's previously submitted reports.
    pub async fn my_reports(
        &self,
        options: &ListReportsOptions,
    ) -> Result<ReportListResponse, SdkError> {
        Ok(self.client()?.my_bug_reports(options).await?)
    }

    /// Fetches one report, with its message thread unless opted out.
    pub async fn report(
        &self,
        id: &str,
        include_messages: bool,
    ) -> Result<ReportDetailsResponse, SdkError> {
        Ok(self.client()?.bug_report_by_id(id, include_messages).await?)
    }

    /// Sends a follow-up message on a report.
    pub async fn send_message(
        &self,
        bug_report_id: &str,
        message: &str,
        attachments: Option<Vec<String>>,
    ) -> Result<ReportMessage, SdkError> {
        let resp = self
            .client()?
            .send_message(bug_report_id, message, attachments)
            .await?;
        Ok(resp.message)
    }

    fn client(&self) -> Result<&Client, SdkError> {
        self.client.as_ref().ok_or(SdkError::Disabled)
    }
}
