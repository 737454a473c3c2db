use serde::{Deserialize, Serialize};

/// Console log level bitmask: `log` messages.
pub const LOG_LEVEL_LOG: u32 = 1;
/// Console log level bitmask: `warn` messages.
pub const LOG_LEVEL_WARN: u32 = 2;
/// Console log level bitmask: `error` messages.
pub const LOG_LEVEL_ERROR: u32 = 4;
/// Console log level bitmask: `info` messages.
pub const LOG_LEVEL_INFO: u32 = 8;
/// Console log level bitmask: `debug` messages.
pub const LOG_LEVEL_DEBUG: u32 = 16;
/// Default capture mask: all five channels.
pub const LOG_LEVEL_ALL: u32 =
    LOG_LEVEL_LOG | LOG_LEVEL_WARN | LOG_LEVEL_ERROR | LOG_LEVEL_INFO | LOG_LEVEL_DEBUG;

/// One of the five standard console channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    /// All five channels, in the order the backend lists them.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Debug,
    ];

    /// The wire name of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        }
    }

    /// This level's bit in a capture mask.
    pub fn bit(self) -> u32 {
        match self {
            LogLevel::Log => LOG_LEVEL_LOG,
            LogLevel::Info => LOG_LEVEL_INFO,
            LogLevel::Warn => LOG_LEVEL_WARN,
            LogLevel::Error => LOG_LEVEL_ERROR,
            LogLevel::Debug => LOG_LEVEL_DEBUG,
        }
    }
}

/// Error details preserved from a logged error value.
///
/// Unknown fields are rejected so that, under the untagged
/// [`CapturedValue`], only exact `{name, message, stack?}` objects parse as
/// errors; anything else falls through to `Json` and round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorShape {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// A scalar console argument carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// How a single console argument was preserved for the report.
///
/// Serialized `untagged` so the `args` array on the wire holds raw values,
/// matching what the backend already accepts. Deserialization tries the
/// variants in declaration order; `Fallback` is only ever produced locally
/// (an incoming plain string parses as `Primitive::Text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapturedValue {
    /// An error value reduced to `{name, message, stack}`.
    Error(ErrorShape),
    /// A string, number, or boolean passed through as-is.
    Primitive(Primitive),
    /// Any other value that survived a serialization round trip.
    Json(serde_json::Value),
    /// The display form of a value that could not be serialized.
    Fallback(String),
}

/// A single captured console call.
///
/// Immutable once created; dropped when evicted from the capture buffer or
/// when the buffer is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleLogEntry {
    pub level: LogLevel,
    /// Flattened representation of all arguments, joined with single spaces.
    pub message: String,
    /// ISO-8601 timestamp of the call.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<CapturedValue>,
}
