use serde::{Deserialize, Serialize};

/// Error details in an API response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Envelope wrapping every backend response.
///
/// When `success` is false — or the transport status is outside the 2xx
/// range — `data` must not be trusted; the failure description comes from
/// [`Envelope::failure_message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
    /// The human-readable failure description: the envelope's error message
    /// when present, otherwise a synthesized `HTTP <status>` string.
    pub fn failure_message(&self, status: u16) -> String {
        match &self.error {
            Some(err) if !err.message.is_empty() => err.message.clone(),
            _ => format!("HTTP {status}"),
        }
    }
}
