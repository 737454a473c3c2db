use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use bugrelay_protocol::envelope::Envelope;
use bugrelay_protocol::messages::{
    ReportDetailsResponse, ReportListResponse, SendMessageRequest, SendMessageResponse,
    SubmitReportRequest, SubmitReportResponse,
};
use bugrelay_protocol::report::BugReport;

use crate::options::ListReportsOptions;

/// Base path of the public bug report endpoints.
const BUG_REPORTS_PATH: &str = "/api/v1/public/bug-reports";

/// Default deadline for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the bug report client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by the backend: a non-2xx status or `success: false`
    /// envelope. The message is the envelope's error message when present,
    /// otherwise `HTTP <status>`.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,

    #[error("response envelope has no data")]
    MissingData,
}

/// Client configuration. Immutable once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub api_url: String,
    /// Credential sent in the `X-API-Key` header.
    pub api_key: String,
    /// Log every request and response through `tracing`.
    pub debug: bool,
    /// Per-request deadline. A request also cancels when its future drops.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            debug: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Bug report API client.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with the fixed headers installed as defaults.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&config.api_key).map_err(|_| Error::InvalidKey)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Core request primitive: issues `method` against the configured base
    /// URL plus `endpoint`, parses the response envelope, and returns its
    /// `data` field.
    ///
    /// `extra_headers` merge over the fixed pair, last write wins. Failures
    /// are surfaced once, immediately; nothing is retried.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.api_url, endpoint);
        if self.config.debug {
            tracing::debug!(%method, %url, "bug report API request");
        }

        let mut builder = self.http.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(headers) = extra_headers {
            builder = builder.headers(headers);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(env) => env,
            // An error status with a body that is not even an envelope still
            // fails with the status code as its description.
            Err(_) if !status.is_success() => {
                return Err(self.api_error(status.as_u16(), format!("HTTP {}", status.as_u16())));
            }
            Err(e) => return Err(Error::Json(e)),
        };

        if !status.is_success() || !envelope.success {
            let message = envelope.failure_message(status.as_u16());
            return Err(self.api_error(status.as_u16(), message));
        }

        let data = envelope.data.ok_or(Error::MissingData)?;
        if self.config.debug {
            tracing::debug!(%url, "bug report API response");
        }
        Ok(data)
    }

    /// Submits a new bug report.
    pub async fn create_bug_report(
        &self,
        payload: &SubmitReportRequest,
    ) -> Result<BugReport, Error> {
        let resp: SubmitReportResponse = self.post(BUG_REPORTS_PATH, payload).await?;
        Ok(resp.bug_report)
    }

    /// Lists the caller's bug reports.
    pub async fn my_bug_reports(
        &self,
        options: &ListReportsOptions,
    ) -> Result<ReportListResponse, Error> {
        let endpoint = format!("{BUG_REPORTS_PATH}/me");
        self.get(&endpoint, &options.to_query()).await
    }

    /// Fetches one bug report. `include_messages` defaults to true on the
    /// wire, so the flag is only emitted when explicitly false.
    pub async fn bug_report_by_id(
        &self,
        id: &str,
        include_messages: bool,
    ) -> Result<ReportDetailsResponse, Error> {
        let mut query = Vec::new();
        if !include_messages {
            query.push(("include_messages".to_string(), "false".to_string()));
        }
        self.get(&format!("{BUG_REPORTS_PATH}/{id}"), &query).await
    }

    /// Sends a message on an existing bug report.
    pub async fn send_message(
        &self,
        bug_report_id: &str,
        message: &str,
        attachments: Option<Vec<String>>,
    ) -> Result<SendMessageResponse, Error> {
        let payload = SendMessageRequest {
            bug_report_id: bug_report_id.to_string(),
            message: message.to_string(),
            attachments,
        };
        self.post(&format!("{BUG_REPORTS_PATH}/{bug_report_id}/messages"), &payload)
            .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<T, Error> {
        self.request(Method::GET, endpoint, query, None::<&()>, None)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::POST, endpoint, &[], Some(body), None)
            .await
    }

    fn api_error(&self, status: u16, message: String) -> Error {
        if self.config.debug {
            tracing::error!(status, %message, "bug report API error");
        }
        Error::Api { status, message }
    }
}
