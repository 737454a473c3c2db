//! Opt-in console log capture for bug reports.
//!
//! [`ConsoleCapture`] sits between the host application's logging calls and
//! their real destination (a [`LogSink`]). While capture is active it records
//! each call into a bounded history before forwarding the original arguments
//! unchanged; when inactive it forwards only. The recorded history is what
//! gets attached to a bug report submission.

mod arg;
mod capture;
mod sink;

pub use arg::ConsoleArg;
pub use capture::{ConsoleCapture, MAX_LOG_ENTRIES};
pub use sink::{LogSink, TracingSink};
