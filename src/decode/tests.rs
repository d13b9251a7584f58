//! Tests for decoder module

use super::*;

// ============================================================================
// DecoderConfig Tests
// ============================================================================

#[test]
fn test_decoder_format_default() {
    let format = DecoderFormat::default();
    assert_eq!(format, DecoderFormat::Json);
}

#[test]
fn test_decoder_config_json() {
    let config = DecoderConfig::json();
    assert_eq!(config.format, DecoderFormat::Json);
    assert!(config.record_path.is_none());
}

#[test]
fn test_decoder_config_json_with_path() {
    let config = DecoderConfig::json_with_path("$.data.items");
    assert_eq!(config.format, DecoderFormat::Json);
    assert_eq!(config.record_path, Some("$.data.items".to_string()));
}

#[test]
fn test_decoder_config_csv() {
    let config = DecoderConfig::csv();
    assert_eq!(config.format, DecoderFormat::Csv);
    assert_eq!(config.csv_delimiter, Some(','));
    assert!(config.csv_has_header);
}

#[test]
fn test_decoder_config_csv_with_delimiter() {
    let config = DecoderConfig::csv_with_delimiter('\t', false);
    assert_eq!(config.format, DecoderFormat::Csv);
    assert_eq!(config.csv_delimiter, Some('\t'));
    assert!(!config.csv_has_header);
}

#[test]
fn test_decoder_config_with_record_path() {
    let config = DecoderConfig::json().with_record_path("$.results");
    assert_eq!(config.record_path, Some("$.results".to_string()));
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_array() {
    // Greenhouse/Lever style: bare array at the top level
    let decoder = JsonDecoder::new();
    let body = r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[2]["id"], 3);
}

#[test]
fn test_json_decoder_object() {
    let decoder = JsonDecoder::new();
    let body = r#"{"id": 1, "name": "test"}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 1);
}

#[test]
fn test_json_decoder_with_path() {
    // Lattice style: records under "data"
    let decoder = JsonDecoder::with_path("data");
    let body = r#"{"data": [{"id": 1}, {"id": 2}], "hasMore": false}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
}

#[test]
fn test_json_decoder_nested_path() {
    let decoder = JsonDecoder::with_path("response.items");
    let body = r#"{"response": {"items": [{"id": 1}], "total": 1}}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 1);
}

#[test]
fn test_json_decoder_workday_report_entry() {
    // Workday RaaS envelope
    let decoder = JsonDecoder::with_path("Report_Entry");
    let body = r#"{"Report_Entry": [
        {"Employee_ID": "1001", "Last_Modified": "2024-05-01T08:00:00"},
        {"Employee_ID": "1002", "Last_Modified": "2024-05-02T09:30:00"}
    ]}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Employee_ID"], "1001");
}

#[test]
fn test_json_decoder_array_index() {
    let decoder = JsonDecoder::with_path("data[-1]");
    let body = r#"{"data": [{"id": 1}, {"id": 2}, {"id": 3}]}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 3);
}

#[test]
fn test_json_decoder_unclosed_bracket_path() {
    // A hand-authored manifest can ship a truncated selector; it must
    // yield no records, not panic
    let body = r#"{"data": [{"id": 1}]}"#;
    for path in ["data[", "data[0", "data[]", "["] {
        let decoder = JsonDecoder::with_path(path);
        let records = decoder.decode(body).unwrap();
        assert!(records.is_empty(), "path {path:?} should match nothing");
    }
}

#[test]
fn test_json_decoder_jsonpath_wildcard() {
    let decoder = JsonDecoder::with_path("$.data[*]");
    let body = r#"{"data": [{"id": 1}, {"id": 2}]}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_json_decoder_missing_path_is_empty() {
    let decoder = JsonDecoder::with_path("data");
    let body = r#"{"other": []}"#;

    let records = decoder.decode(body).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_json_decoder_raw() {
    let decoder = JsonDecoder::new();
    let body = r#"{"status": "ok", "data": []}"#;

    let raw = decoder.decode_raw(body).unwrap();
    assert_eq!(raw["status"], "ok");
}

#[test]
fn test_json_decoder_invalid() {
    let decoder = JsonDecoder::new();
    let body = "not valid json";

    let result = decoder.decode(body);
    assert!(result.is_err());
}

// ============================================================================
// CSV Decoder Tests
// ============================================================================

#[test]
fn test_csv_decoder_basic() {
    let decoder = CsvDecoder::new();
    let body = "Employee_ID,Legal_Name,Age\n1001,Alice,30\n1002,Bob,25";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Employee_ID"], 1001);
    assert_eq!(records[0]["Legal_Name"], "Alice");
    assert_eq!(records[0]["Age"], 30);
    assert_eq!(records[1]["Employee_ID"], 1002);
    assert_eq!(records[1]["Legal_Name"], "Bob");
}

#[test]
fn test_csv_decoder_quoted_fields() {
    let decoder = CsvDecoder::new();
    let body = "id,name,title\n1,\"Alice\",\"Engineer, Staff\"\n2,\"Bob\",\"He said \"\"Hi\"\"\"";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "Engineer, Staff");
    assert_eq!(records[1]["title"], "He said \"Hi\"");
}

#[test]
fn test_csv_decoder_no_header() {
    let decoder = CsvDecoder::with_options(',', false);
    let body = "1001,Alice,30\n1002,Bob,25";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["column_0"], 1001);
    assert_eq!(records[0]["column_1"], "Alice");
}

#[test]
fn test_csv_decoder_tab_delimiter() {
    let decoder = CsvDecoder::with_options('\t', true);
    let body = "id\tname\n1\tAlice\n2\tBob";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["name"], "Alice");
}

#[test]
fn test_csv_decoder_booleans() {
    let decoder = CsvDecoder::new();
    let body = "id,active,terminated\n1,true,false\n2,yes,no";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records[0]["active"], true);
    assert_eq!(records[0]["terminated"], false);
    assert_eq!(records[1]["active"], true);
    assert_eq!(records[1]["terminated"], false);
}

#[test]
fn test_csv_decoder_nulls() {
    let decoder = CsvDecoder::new();
    let body = "id,value\n1,\n2,null\n3,none";

    let records = decoder.decode(body).unwrap();
    assert!(records[0]["value"].is_null());
    assert!(records[1]["value"].is_null());
    assert!(records[2]["value"].is_null());
}

#[test]
fn test_csv_decoder_raw() {
    let decoder = CsvDecoder::new();
    let body = "id,name\n1,Alice";

    let raw = decoder.decode_raw(body).unwrap();
    assert!(raw.is_array());
}

// ============================================================================
// Vendor-shaped responses
// ============================================================================

#[test]
fn test_lever_like_response() {
    let decoder = JsonDecoder::with_path("data");
    let body = r#"{
        "data": [
            {"id": "opp_1", "updatedAt": 1714000000000},
            {"id": "opp_2", "updatedAt": 1714100000000}
        ],
        "hasNext": true,
        "next": "b2Zmc2V0"
    }"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "opp_1");
}

#[test]
fn test_greenhouse_like_response() {
    // Harvest API returns bare arrays
    let decoder = JsonDecoder::new();
    let body = r#"[
        {"id": 1, "name": "Backend Engineer"},
        {"id": 2, "name": "Recruiter"}
    ]"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
}
