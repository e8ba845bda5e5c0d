//! Serde serialization/deserialization round-trip tests.
//!
//! These tests verify that the field records, values and diagnostics can be
//! serialized to JSON and deserialized back, producing equal values.

#![cfg(feature = "serde")]

use pdfform_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

fn sample_field() -> FormField {
    let flags = FieldFlags::COMBO | FieldFlags::REQUIRED;
    FormField {
        name: "Address.City".to_string(),
        partial_name: "City".to_string(),
        kind: FieldKind::Combo,
        value: FieldValue::from("London"),
        default_value: Some(FieldValue::from("Paris")),
        label: Some("City of residence".to_string()),
        options: vec![FieldOption::plain("London"), FieldOption::new("Paris, FR", "Paris")],
        option_source: OptionSource::OptArray,
        flags: flags.bits(),
        flag_meanings: flags.meanings(),
        max_length: None,
        page: Some(0),
        rect: Some(FieldRect::new(50.0, 600.0, 200.0, 20.0)),
        is_subfield: true,
        required: true,
        widget_count: 1,
    }
}

#[test]
fn test_serde_form_field() {
    roundtrip(&sample_field());
}

#[test]
fn test_serde_form_field_json_shape() {
    let json = serde_json::to_value(sample_field()).unwrap();
    assert_eq!(json["name"], "Address.City");
    assert_eq!(json["type"], "combo");
    assert_eq!(json["value"], "London");
    assert_eq!(json["options"][1]["text"], "Paris, FR");
    assert_eq!(json["options"][1]["value"], "Paris");
    assert_eq!(json["flag_meanings"]["combo"], true);
    assert_eq!(json["flag_meanings"]["read_only"], false);
    assert_eq!(json["rect"]["width"], 200.0);
    assert_eq!(json["is_subfield"], true);
}

#[test]
fn test_serde_field_kind() {
    for kind in [
        FieldKind::Text,
        FieldKind::Checkbox,
        FieldKind::Radio,
        FieldKind::Combo,
        FieldKind::ListBox,
        FieldKind::PushButton,
        FieldKind::Signature,
    ] {
        roundtrip(&kind);
    }
}

#[test]
fn test_serde_field_value_untagged() {
    let text: FieldValue = serde_json::from_str("\"Yes\"").unwrap();
    assert_eq!(text, FieldValue::from("Yes"));
    let list: FieldValue = serde_json::from_str("[\"English\",\"French\"]").unwrap();
    assert_eq!(list, FieldValue::from(vec!["English", "French"]));
    roundtrip(&text);
    roundtrip(&list);
}

#[test]
fn test_serde_fill_request() {
    let req: FillRequest = serde_json::from_str(r#"{"name":"FullName","value":"张三"}"#).unwrap();
    assert_eq!(req, FillRequest::new("FullName", "张三"));
    roundtrip(&req);
}

#[test]
fn test_serde_flag_meanings() {
    roundtrip(&FieldFlags::from_raw(4096 | 8192).meanings());
}

#[test]
fn test_serde_options() {
    roundtrip(&FormOptions::default());
    roundtrip(&FormOptions {
        max_length_policy: MaxLengthPolicy::Truncate,
        max_input_bytes: Some(1024),
        ..FormOptions::lenient()
    });
}

#[test]
fn test_serde_fill_report() {
    let report = FillReport {
        applied: vec!["FullName".to_string()],
        diagnostics: vec![
            FieldDiagnostic::skipped("Ghost", DiagnosticCode::UnknownField, "unknown field"),
            FieldDiagnostic::skipped("Gender", DiagnosticCode::InvalidOption, "bad")
                .with_action(DiagnosticAction::ResetToOff),
        ],
    };
    roundtrip(&report);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["diagnostics"][0]["code"], "UNKNOWN_FIELD");
    assert_eq!(json["diagnostics"][1]["action"], "reset_to_off");
}
