use bugrelay_protocol::console_log::LogLevel;

use crate::arg::{ConsoleArg, flatten_args};

/// The real destination of console output.
///
/// The sink plays the role of the saved original logging functions: it
/// receives every console call exactly as the host issued it, whether or not
/// capture is active. Recording never alters or suppresses what reaches it.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, args: &[ConsoleArg]);
}

impl<S: LogSink> LogSink for std::sync::Arc<S> {
    fn write(&self, level: LogLevel, args: &[ConsoleArg]) {
        (**self).write(level, args);
    }
}

/// Stock sink forwarding console output to the `tracing` macros.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, args: &[ConsoleArg]) {
        let message = flatten_args(args);
        match level {
            LogLevel::Log | LogLevel::Info => tracing::info!(target: "console", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "console", "{message}"),
            LogLevel::Error => tracing::error!(target: "console", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "console", "{message}"),
        }
    }
}
