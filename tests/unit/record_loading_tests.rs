#[cfg(test)]
mod tests_record_loading {
    use depth_chart_rs::{
        ChartError, SnapshotRecord, load_records, records_from_json, records_from_values,
    };
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parses_array_of_objects() {
        let records = records_from_json(
            r#"[{"Time": "09:30:00", "Bid1": 1.5}, {"Time": "09:30:01", "Bid1": "1.6"}]"#,
        )
        .expect("valid records");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time(), "09:30:00");
        assert_eq!(records[1].number("Bid1"), 1.6);
        assert!(records[1].number("Ask1").is_nan());
    }

    #[test]
    fn rejects_non_object_records_with_index() {
        let err = records_from_json(r#"[{"Time": "a"}, 42]"#).expect_err("number record");
        match err {
            ChartError::InvalidRecord { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = records_from_json(r#"{"Time": "a"}"#).expect_err("object document");
        assert!(matches!(err, ChartError::DeserializationError { .. }));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(records_from_json("[]").expect("empty").is_empty());
        assert!(records_from_values(Vec::new()).expect("empty").is_empty());
    }

    #[test]
    fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let payload = json!([
            {"Time": "09:30:00", "Bid1": 100.01, "Bid1Size": 500, "Ask1": 100.02, "Ask1Size": 300}
        ]);
        write!(file, "{payload}").expect("write records");

        let records = load_records(file.path()).expect("load records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number("Ask1Size"), 300.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_records(dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, ChartError::Io { .. }));
    }

    #[test]
    fn record_serializes_transparently() {
        let record = SnapshotRecord::default()
            .with_field("Time", "t")
            .with_field("Bid1", 2.5);
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value, json!({"Time": "t", "Bid1": 2.5}));
    }
}
