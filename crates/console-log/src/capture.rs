use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use bugrelay_protocol::console_log::{ConsoleLogEntry, LOG_LEVEL_ALL, LogLevel};
use chrono::{SecondsFormat, Utc};

use crate::arg::{ConsoleArg, flatten_args};
use crate::sink::LogSink;

/// Maximum number of entries kept in the capture history.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Console log capture service.
///
/// Constructed explicitly by the host with the sink that plays the original
/// logging functions; there is no process-wide singleton. All console calls
/// go through [`ConsoleCapture::dispatch`] (or the per-channel shorthands),
/// which records an entry while capturing and always forwards the original
/// arguments to the sink.
pub struct ConsoleCapture {
    state: Mutex<CaptureState>,
    sink: Box<dyn LogSink>,
    level_mask: AtomicU32,
}

struct CaptureState {
    buffer: VecDeque<ConsoleLogEntry>,
    capturing: bool,
}

impl ConsoleCapture {
    /// Creates an idle capture service recording all five channels.
    pub fn new(sink: Box<dyn LogSink>) -> Self {
        Self {
            state: Mutex::new(CaptureState {
                buffer: VecDeque::new(),
                capturing: false,
            }),
            sink,
            level_mask: AtomicU32::new(LOG_LEVEL_ALL),
        }
    }

    /// Starts recording console calls.
    ///
    /// Idempotent: does nothing if already capturing. The history is cleared
    /// on each idle-to-capturing transition.
    pub fn start_capture(&self) {
        let mut state = self.lock_state();
        if state.capturing {
            return;
        }
        state.capturing = true;
        state.buffer.clear();
        tracing::debug!("console capture started");
    }

    /// Stops recording, leaving the history intact.
    ///
    /// Idempotent: does nothing if not capturing.
    pub fn stop_capture(&self) {
        let mut state = self.lock_state();
        if !state.capturing {
            return;
        }
        state.capturing = false;
        tracing::debug!("console capture stopped");
    }

    /// Whether console calls are currently being recorded.
    pub fn is_capturing(&self) -> bool {
        self.lock_state().capturing
    }

    /// The current channel filter bitmask (see the `LOG_LEVEL_*` constants).
    pub fn level_mask(&self) -> u32 {
        self.level_mask.load(Ordering::Relaxed)
    }

    /// Sets which channels are recorded. Forwarding is unaffected.
    pub fn set_level_mask(&self, mask: u32) {
        self.level_mask.store(mask, Ordering::Relaxed);
        tracing::debug!(mask, "console capture level mask updated");
    }

    /// A defensive snapshot of the history, oldest first.
    pub fn logs(&self) -> Vec<ConsoleLogEntry> {
        self.lock_state().buffer.iter().cloned().collect()
    }

    /// Empties the history without touching the capture state.
    pub fn clear_logs(&self) {
        self.lock_state().buffer.clear();
    }

    /// The history snapshot as pretty-printed JSON.
    pub fn logs_as_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.logs())
    }

    /// Records (while capturing, if `level` is unmasked) and then forwards
    /// the original arguments unchanged to the sink.
    pub fn dispatch(&self, level: LogLevel, args: &[ConsoleArg]) {
        let recording = self.is_capturing() && self.level_mask() & level.bit() != 0;
        if recording {
            let entry = build_entry(level, args);
            let mut state = self.lock_state();
            if state.buffer.len() >= MAX_LOG_ENTRIES {
                state.buffer.pop_front();
            }
            state.buffer.push_back(entry);
        }
        self.sink.write(level, args);
    }

    /// Shorthand for [`dispatch`](Self::dispatch) on the `log` channel.
    pub fn log(&self, args: &[ConsoleArg]) {
        self.dispatch(LogLevel::Log, args);
    }

    /// Shorthand for the `info` channel.
    pub fn info(&self, args: &[ConsoleArg]) {
        self.dispatch(LogLevel::Info, args);
    }

    /// Shorthand for the `warn` channel.
    pub fn warn(&self, args: &[ConsoleArg]) {
        self.dispatch(LogLevel::Warn, args);
    }

    /// Shorthand for the `error` channel.
    pub fn error(&self, args: &[ConsoleArg]) {
        self.dispatch(LogLevel::Error, args);
    }

    /// Shorthand for the `debug` channel.
    pub fn debug(&self, args: &[ConsoleArg]) {
        self.dispatch(LogLevel::Debug, args);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CaptureState> {
        // A poisoned lock only happens if a recording panicked; the buffer
        // is still structurally valid, so keep going.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Builds an immutable entry from a call's arguments.
///
/// Infallible: a value with no JSON representation was already reduced to
/// its display form when the [`ConsoleArg`] was constructed, so recording
/// can never interrupt host logging.
fn build_entry(level: LogLevel, args: &[ConsoleArg]) -> ConsoleLogEntry {
    ConsoleLogEntry {
        level,
        message: flatten_args(args),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        args: args.iter().map(ConsoleArg::capture).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugrelay_protocol::console_log::{
        CapturedValue, LOG_LEVEL_DEBUG, LOG_LEVEL_ERROR, Primitive,
    };
    use std::sync::Arc;

    /// Sink test double recording every forwarded call.
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(LogLevel, String)>>,
    }

    impl LogSink for RecordingSink {
        fn write(&self, level: LogLevel, args: &[ConsoleArg]) {
            self.calls
                .lock()
                .unwrap()
                .push((level, flatten_args(args)));
        }
    }

    fn capture_with_sink() -> (ConsoleCapture, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (ConsoleCapture::new(Box::new(Arc::clone(&sink))), sink)
    }

    #[test]
    fn start_stop_state_machine() {
        let (capture, _) = capture_with_sink();
        assert!(!capture.is_capturing());

        capture.stop_capture(); // Idle -> Idle
        assert!(!capture.is_capturing());

        capture.start_capture(); // Idle -> Capturing
        assert!(capture.is_capturing());

        capture.start_capture(); // Capturing -> Capturing
        assert!(capture.is_capturing());

        capture.stop_capture(); // Capturing -> Idle
        assert!(!capture.is_capturing());
    }

    #[test]
    fn repeated_start_does_not_clear_history() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["first".into()]);

        capture.start_capture();
        assert_eq!(capture.logs().len(), 1);
    }

    #[test]
    fn restart_clears_history() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["old".into()]);
        capture.stop_capture();

        // History survives stop...
        assert_eq!(capture.logs().len(), 1);

        // ...but a fresh start wipes it.
        capture.start_capture();
        assert!(capture.logs().is_empty());
    }

    #[test]
    fn forwards_even_when_idle() {
        let (capture, sink) = capture_with_sink();
        capture.warn(&["disk almost full".into()]);

        assert!(capture.logs().is_empty());
        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(LogLevel::Warn, "disk almost full".into())]);
    }

    #[test]
    fn records_and_forwards_while_capturing() {
        let (capture, sink) = capture_with_sink();
        capture.start_capture();
        capture.info(&["loaded".into(), ConsoleArg::Value(serde_json::json!({"n": 2}))]);

        let logs = capture.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Info);
        assert_eq!(logs[0].message, r#"loaded {"n":2}"#);
        assert_eq!(logs[0].args.len(), 2);

        assert_eq!(sink.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            capture.log(&[format!("msg {i}").into()]);
        }

        let logs = capture.logs();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "msg 5");
        assert_eq!(logs.last().unwrap().message, format!("msg {}", MAX_LOG_ENTRIES + 4));
    }

    #[test]
    fn logs_returns_a_snapshot() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["kept".into()]);

        let mut snapshot = capture.logs();
        snapshot.clear();

        assert_eq!(capture.logs().len(), 1);
    }

    #[test]
    fn clear_logs_keeps_capturing() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["x".into()]);

        capture.clear_logs();

        assert!(capture.logs().is_empty());
        assert!(capture.is_capturing());

        capture.log(&["y".into()]);
        assert_eq!(capture.logs().len(), 1);
    }

    #[test]
    fn error_argument_shape() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.error(&[ConsoleArg::Error {
            name: "TypeError".into(),
            message: "x is undefined".into(),
            stack: Some("at app.js:10".into()),
        }]);

        let logs = capture.logs();
        assert_eq!(logs[0].message, "TypeError: x is undefined");
        let CapturedValue::Error(shape) = &logs[0].args[0] else {
            panic!("expected error shape");
        };
        assert_eq!(shape.name, "TypeError");
        assert_eq!(shape.stack.as_deref(), Some("at app.js:10"));
    }

    #[test]
    fn object_argument_deep_copies() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();

        let value = serde_json::json!({"nested": {"list": [1, 2, 3]}});
        capture.log(&[ConsoleArg::Value(value.clone())]);

        let logs = capture.logs();
        assert_eq!(logs[0].args[0], CapturedValue::Json(value));
    }

    #[test]
    fn unserializable_value_records_its_display_form() {
        let (capture, sink) = capture_with_sink();
        capture.start_capture();

        // Maps with non-string keys have no JSON representation.
        let mut map = std::collections::HashMap::new();
        map.insert((1u8, 2u8), "pair");
        capture.log(&[ConsoleArg::from_serialize(&map)]);

        let logs = capture.logs();
        assert_eq!(logs.len(), 1);
        assert!(matches!(logs[0].args[0], CapturedValue::Fallback(_)));

        // The sink still received the call.
        assert_eq!(sink.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn opaque_argument_falls_back_to_string() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&[ConsoleArg::Opaque("<circular>".into())]);

        let logs = capture.logs();
        assert_eq!(logs[0].args[0], CapturedValue::Fallback("<circular>".into()));
    }

    #[test]
    fn masked_level_forwards_but_does_not_record() {
        let (capture, sink) = capture_with_sink();
        capture.set_level_mask(LOG_LEVEL_ERROR);
        capture.start_capture();

        capture.debug(&["chatty".into()]);
        capture.error(&["broken".into()]);

        let logs = capture.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Error);

        // Both calls still reached the sink.
        assert_eq!(sink.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn level_mask_roundtrip() {
        let (capture, _) = capture_with_sink();
        assert_eq!(capture.level_mask(), LOG_LEVEL_ALL);

        capture.set_level_mask(LOG_LEVEL_ERROR | LOG_LEVEL_DEBUG);
        assert_eq!(capture.level_mask(), LOG_LEVEL_ERROR | LOG_LEVEL_DEBUG);
    }

    #[test]
    fn logs_as_json_is_pretty_printed() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["hello".into()]);

        let json = capture.logs_as_json().unwrap();
        assert!(json.contains("\n"));
        assert!(json.contains("\"message\": \"hello\""));
        assert!(json.contains("\"level\": \"log\""));
    }

    #[test]
    fn timestamps_are_iso8601() {
        let (capture, _) = capture_with_sink();
        capture.start_capture();
        capture.log(&["t".into()]);

        let logs = capture.logs();
        let parsed = chrono::DateTime::parse_from_rfc3339(&logs[0].timestamp);
        assert!(parsed.is_ok(), "not RFC 3339: {}", logs[0].timestamp);
        assert!(logs[0].timestamp.ends_with('Z'));
    }
}
