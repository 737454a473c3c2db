fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use bugrelay_protocol::console_log::ConsoleLogEntry;
    use bugrelay_protocol::envelope::Envelope;
    use bugrelay_protocol::messages::{
        ReportDetailsResponse, ReportListResponse, SubmitReportRequest, SubmitReportResponse,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    ///
    /// Fixtures are payloads recorded from the browser SDK talking to the
    /// backend, committed verbatim.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Normalizes JSON numbers so integer-valued floats compare equal.
    ///
    /// JavaScript serializes `3.0` as `3`; comparing through f64 keeps both
    /// spellings equal.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    serde_json::json!(f)
                } else {
                    v.clone()
                }
            }
            serde_json::Value::Object(map) => {
                let normalized: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect();
                serde_json::Value::Object(normalized)
            }
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent, float-normalized comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        let norm_fixture = normalize_value(&fixture);
        let norm_reserialized = normalize_value(&reserialized);
        assert_eq!(
            norm_fixture, norm_reserialized,
            "roundtrip mismatch for {name}:\n  recorded: {fixture}\n  Rust:     {reserialized}"
        );
    }

    // --- Request payloads ---

    #[test]
    fn fixture_submit_report_user_fields() {
        roundtrip_test::<SubmitReportRequest>("submit_report_user_fields.json");
    }

    #[test]
    fn fixture_submit_report_reporter_fields() {
        roundtrip_test::<SubmitReportRequest>("submit_report_reporter_fields.json");
    }

    #[test]
    fn fixture_console_log_entry_mixed_args() {
        roundtrip_test::<ConsoleLogEntry>("console_log_entry_mixed_args.json");
    }

    #[test]
    fn submit_fixture_preserves_raw_args() {
        // The args array must stay raw values, exactly as the browser sent
        // them, not a tagged encoding.
        let fixture = load_fixture("submit_report_user_fields.json");
        let req: SubmitReportRequest = serde_json::from_value(fixture.clone()).unwrap();
        let reserialized = serde_json::to_value(&req).unwrap();
        assert_eq!(
            reserialized["console_logs"][1]["args"],
            fixture["console_logs"][1]["args"]
        );
    }

    #[test]
    fn metadata_keys_stay_camel_case() {
        let fixture = load_fixture("submit_report_user_fields.json");
        let req: SubmitReportRequest = serde_json::from_value(fixture).unwrap();
        assert!(req.metadata.contains_key("userAgent"));
        assert!(req.metadata.contains_key("screenResolution"));
        assert!(req.metadata.contains_key("viewport"));
    }

    // --- Response envelopes ---

    #[test]
    fn fixture_envelope_submit_success() {
        roundtrip_test::<Envelope<SubmitReportResponse>>("envelope_submit_success.json");
    }

    #[test]
    fn fixture_envelope_failure() {
        roundtrip_test::<Envelope<serde_json::Value>>("envelope_failure.json");
    }

    #[test]
    fn failure_fixture_message_is_used_verbatim() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_value(load_fixture("envelope_failure.json")).unwrap();
        assert!(!env.success);
        assert_eq!(env.failure_message(401), "Invalid API key");
    }

    #[test]
    fn fixture_report_list_response() {
        roundtrip_test::<ReportListResponse>("report_list_response.json");
    }

    #[test]
    fn fixture_report_details_response() {
        roundtrip_test::<ReportDetailsResponse>("report_details_response.json");
    }

    // --- Backward and forward compatibility ---

    #[test]
    fn list_without_pagination_parses() {
        // Older backends return the bare array with no paging block.
        let json = r#"{"bug_reports":[]}"#;
        let resp: ReportListResponse = serde_json::from_str(json).unwrap();
        assert!(resp.pagination.is_none());
    }

    #[test]
    fn newer_backend_status_degrades_to_unknown() {
        let json = r#"{
            "id": "b7c2",
            "status": "triaged",
            "description": "scroll position jumps after reload",
            "page_url": "https://app.example.com/feed",
            "created_at": "2025-06-03T09:00:00Z"
        }"#;
        let report: bugrelay_protocol::report::BugReport = serde_json::from_str(json).unwrap();
        assert_eq!(
            report.status,
            bugrelay_protocol::report::ReportStatus::Unknown
        );
    }

    #[test]
    fn envelope_without_error_block_parses() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.failure_message(502), "HTTP 502");
    }
}
