use bugrelay_protocol::messages::IdentitySchema;
use serde::{Deserialize, Serialize};

/// Identity context of the person using the host application, attached to
/// submissions so the backend can follow up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Configuration the host supplies when embedding the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugReporterConfig {
    pub api_url: String,
    pub api_key: String,

    /// When false the reporter renders nothing and captures nothing.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Verbose request/response logging.
    #[serde(default)]
    pub debug: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,

    /// Which identity field naming scheme submissions use.
    #[serde(skip, default)]
    pub identity_schema: IdentitySchema,
}

impl BugReporterConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            enabled: true,
            debug: false,
            user_context: None,
            identity_schema: IdentitySchema::default(),
        }
    }
}

fn default_true() -> bool {
    true
}
