use bugrelay_protocol::console_log::{CapturedValue, ErrorShape, Primitive};
use serde::Serialize;

/// A console call argument as the host hands it over.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleArg {
    /// Plain text.
    Text(String),
    /// An error value with its name, message, and optional stack trace.
    Error {
        name: String,
        message: String,
        stack: Option<String>,
    },
    /// Structured data already represented as JSON.
    Value(serde_json::Value),
    /// A value that could not be serialized; only its display form survives.
    Opaque(String),
}

impl ConsoleArg {
    /// Serializes `value` to JSON, falling back to its `Debug` form when it
    /// has no JSON representation.
    pub fn from_serialize<T: Serialize + std::fmt::Debug>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => ConsoleArg::Value(v),
            Err(_) => ConsoleArg::Opaque(format!("{value:?}")),
        }
    }

    /// Captures an error value. The name is the error's type name; the stack
    /// is left unset (callers with a backtrace use [`ConsoleArg::Error`]
    /// directly).
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        let type_name = std::any::type_name::<E>();
        let name = type_name.rsplit("::").next().unwrap_or(type_name);
        ConsoleArg::Error {
            name: name.to_string(),
            message: err.to_string(),
            stack: None,
        }
    }

    /// The flattened string form used when building an entry's `message`.
    pub(crate) fn flatten(&self) -> String {
        match self {
            ConsoleArg::Text(s) => s.clone(),
            ConsoleArg::Error { name, message, .. } => format!("{name}: {message}"),
            ConsoleArg::Value(v) => v.to_string(),
            ConsoleArg::Opaque(s) => s.clone(),
        }
    }

    /// The preserved form stored in an entry's `args`.
    pub(crate) fn capture(&self) -> CapturedValue {
        match self {
            ConsoleArg::Text(s) => CapturedValue::Primitive(Primitive::Text(s.clone())),
            ConsoleArg::Error {
                name,
                message,
                stack,
            } => CapturedValue::Error(ErrorShape {
                name: name.clone(),
                message: message.clone(),
                stack: stack.clone(),
            }),
            ConsoleArg::Value(v) => match v {
                serde_json::Value::String(s) => {
                    CapturedValue::Primitive(Primitive::Text(s.clone()))
                }
                serde_json::Value::Number(n) => {
                    CapturedValue::Primitive(Primitive::Number(n.clone()))
                }
                serde_json::Value::Bool(b) => CapturedValue::Primitive(Primitive::Bool(*b)),
                other => CapturedValue::Json(other.clone()),
            },
            ConsoleArg::Opaque(s) => CapturedValue::Fallback(s.clone()),
        }
    }
}

impl From<&str> for ConsoleArg {
    fn from(s: &str) -> Self {
        ConsoleArg::Text(s.to_string())
    }
}

impl From<String> for ConsoleArg {
    fn from(s: String) -> Self {
        ConsoleArg::Text(s)
    }
}

impl From<serde_json::Value> for ConsoleArg {
    fn from(v: serde_json::Value) -> Self {
        ConsoleArg::Value(v)
    }
}

/// Joins the flattened form of each argument with single spaces.
pub(crate) fn flatten_args(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(ConsoleArg::flatten)
        .collect::<Vec<_>>()
        .join(" ")
}
