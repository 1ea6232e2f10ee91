use fetch_core::{
    extract_payload, find_payload_literal, prepare_payload, strip_trailing_separators,
    validate_payload, ExtractionError, PayloadError, ValidationError, DEFAULT_QUERY,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn extracts_literal_from_request_snippet() {
    let raw = "response = requests.post('/fetch', json={\"query\": \"Q\", \"output\": {\"a\": \"string\"}, \"max_answers\": 5})";
    let value = extract_payload(raw).unwrap();
    assert_eq!(
        value,
        json!({"query": "Q", "output": {"a": "string"}, "max_answers": 5})
    );
}

#[test]
fn default_query_template_is_a_valid_payload() {
    let payload = prepare_payload(DEFAULT_QUERY).unwrap();
    assert_eq!(payload.as_value()["max_answers"], json!(10));
    assert_eq!(payload.as_value()["output"]["field2"], json!("number"));
}

#[test]
fn trailing_separators_are_removed_at_every_level() {
    let clean = json!({"query": "Q", "output": {"a": "string", "list": [1, 2]}, "max_answers": 5});
    let dirty_inputs = [
        r#"json={"query": "Q", "output": {"a": "string", "list": [1, 2,],}, "max_answers": 5,}"#,
        "json={\"query\": \"Q\",\n \"output\": {\"a\": \"string\",\n \"list\": [1, 2 ,\n ]\n},\n \"max_answers\": 5,\n}",
        r#"json = {"query":"Q","output":{"a":"string","list":[1,2]},"max_answers":5}"#,
    ];
    for raw in dirty_inputs {
        assert_eq!(extract_payload(raw).unwrap(), clean, "input: {raw}");
    }
}

#[test]
fn repair_leaves_string_contents_alone() {
    let repaired = strip_trailing_separators(r#"{"a": "x,}", "b": "[1,]",}"#);
    assert_eq!(repaired, r#"{"a": "x,}", "b": "[1,]"}"#);
}

#[test]
fn braces_inside_strings_do_not_end_the_literal() {
    let raw = r#"post(json={"query": "a } b", "output": {"k": "{"}, "max_answers": 1}) # trailing }"#;
    assert_eq!(
        find_payload_literal(raw),
        Some(r#"{"query": "a } b", "output": {"k": "{"}, "max_answers": 1}"#)
    );
}

#[test]
fn escaped_quotes_keep_scanner_inside_string() {
    let raw = r#"json={"query": "say \"}\" now", "output": {"a": 1}, "max_answers": 2}"#;
    let value = extract_payload(raw).unwrap();
    assert_eq!(value["query"], json!("say \"}\" now"));
}

#[test]
fn missing_marker_is_not_found() {
    let err = extract_payload(r#"requests.post('/fetch', data={"query": "Q"})"#).unwrap_err();
    assert_eq!(err, ExtractionError::NotFound);
    assert_eq!(err.to_string(), "payload not found");
}

#[test]
fn marker_must_be_a_whole_word_followed_by_an_object() {
    assert_eq!(find_payload_literal(r#"myjson={"a": 1}"#), None);
    assert_eq!(find_payload_literal("json=[1, 2]"), None);
    assert_eq!(
        find_payload_literal(r#"json=[1] and then json={"a": 1}"#),
        Some(r#"{"a": 1}"#)
    );
}

#[test]
fn unbalanced_literal_is_not_found() {
    assert_eq!(
        extract_payload(r#"json={"query": "Q", "output": {"a": 1}"#),
        Err(ExtractionError::NotFound)
    );
}

#[test]
fn malformed_literal_reports_parse_diagnostic() {
    let err = extract_payload("json={'query': 'single quotes'}").unwrap_err();
    match &err {
        ExtractionError::Malformed { diagnostic } => assert!(!diagnostic.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("malformed payload syntax: "));
}

#[test]
fn validation_requires_truthy_query() {
    for candidate in [
        json!({"output": {"a": 1}, "max_answers": 1}),
        json!({"query": "", "output": {"a": 1}, "max_answers": 1}),
        json!({"query": null, "output": {"a": 1}, "max_answers": 1}),
    ] {
        assert_eq!(
            validate_payload(candidate),
            Err(ValidationError::MissingQuery)
        );
    }
    assert_eq!(ValidationError::MissingQuery.to_string(), "missing query");
}

#[test]
fn validation_requires_truthy_output() {
    assert_eq!(
        validate_payload(json!({"query": "Q", "max_answers": 1})),
        Err(ValidationError::MissingOutput)
    );
    assert_eq!(
        validate_payload(json!({"query": "Q", "output": false, "max_answers": 1})),
        Err(ValidationError::MissingOutput)
    );
    assert_eq!(ValidationError::MissingOutput.to_string(), "missing output");
}

#[test]
fn validation_requires_numeric_max_answers() {
    for candidate in [
        json!({"query": "Q", "output": {"a": 1}}),
        json!({"query": "Q", "output": {"a": 1}, "max_answers": "5"}),
        json!({"query": "Q", "output": {"a": 1}, "max_answers": null}),
    ] {
        assert_eq!(
            validate_payload(candidate),
            Err(ValidationError::MaxAnswersNotNumber)
        );
    }
    assert_eq!(
        ValidationError::MaxAnswersNotNumber.to_string(),
        "max_answers must be a number"
    );
}

#[test]
fn validation_passes_unknown_fields_through_unchanged() {
    let candidate = json!({
        "query": "Q",
        "output": {},
        "max_answers": 2.5,
        "extra": {"nested": [1, 2, 3]}
    });
    let payload = validate_payload(candidate.clone()).unwrap();
    assert_eq!(payload.into_value(), candidate);
}

#[test]
fn partial_payload_fails_validation() {
    let err = prepare_payload(r#"json={"query": "Q"}"#).unwrap_err();
    assert_eq!(err, PayloadError::Validation(ValidationError::MissingOutput));
}
