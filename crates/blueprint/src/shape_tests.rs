// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn classify(docs: Vec<Value>, file_type: FileType) -> ClassifiedDocuments {
    classify_documents(docs, file_type).unwrap()
}

// ============================================================================
// Single document
// ============================================================================

#[test]
fn array_document_is_prompt_list() {
    let result = classify(vec![json!([{"prompt": "a"}, {"prompt": "b"}])], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::PromptList);
    assert!(result.header.is_empty());
    assert_eq!(result.prompts.len(), 2);
}

#[test]
fn prompts_field_splits_header() {
    let doc = json!({"id": "demo", "models": ["gpt-4"], "prompts": [{"prompt": "a"}]});
    let result = classify(vec![doc], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::PromptsField);
    assert_eq!(result.header.get("id"), Some(&json!("demo")));
    assert!(!result.header.contains_key("prompts"));
    assert_eq!(result.prompts, vec![json!({"prompt": "a"})]);
}

#[test]
fn prompts_field_keeps_header_key_order() {
    let doc = json!({"title": "t", "prompts": [], "id": "x"});
    let result = classify(vec![doc], FileType::Json);
    let keys: Vec<&str> = result.header.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["title", "id"]);
}

#[test]
fn legacy_json_without_prompts() {
    let result = classify(vec![json!({"configId": "old"})], FileType::Json);
    assert_eq!(result.shape, DocumentShape::LegacyJson);
    assert_eq!(result.header.get("configId"), Some(&json!("old")));
    assert!(result.prompts.is_empty());
}

#[test]
fn legacy_json_with_null_prompts() {
    let result = classify(vec![json!({"id": "x", "prompts": null})], FileType::Json);
    assert_eq!(result.shape, DocumentShape::LegacyJson);
    assert!(result.prompts.is_empty());
}

#[test]
fn legacy_json_rejects_non_list_prompts() {
    let err = classify_documents(vec![json!({"prompts": "nope"})], FileType::Json).unwrap_err();
    assert!(matches!(err, ParseError::PromptsNotList));
}

#[parameterized(
    prompt = { "prompt" },
    messages = { "messages" },
    should = { "should" },
    ideal = { "ideal" },
    points = { "points" },
)]
fn yaml_object_with_prompt_key_is_single_prompt(key: &str) {
    let mut map = Map::new();
    map.insert(key.to_string(), json!("x"));
    let result = classify(vec![Value::Object(map)], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::SinglePrompt);
    assert!(result.header.is_empty());
    assert_eq!(result.prompts.len(), 1);
}

#[test]
fn yaml_object_without_prompt_keys_is_header_only() {
    let result = classify(vec![json!({"id": "demo", "models": ["m"]})], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::HeaderOnly);
    assert_eq!(result.header.get("id"), Some(&json!("demo")));
    assert!(result.prompts.is_empty());
}

#[test]
fn yaml_unmarked_object_defaults_to_header() {
    let result = classify(vec![json!({"weight": 2})], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::HeaderOnly);
    assert_eq!(result.header.get("weight"), Some(&json!(2)));
}

#[parameterized(
    string = { json!("hello"), "string" },
    number = { json!(42), "number" },
    boolean = { json!(true), "boolean" },
)]
fn scalar_document_is_rejected(doc: Value, found: &str) {
    for file_type in [FileType::Json, FileType::Yaml] {
        let err = classify_documents(vec![doc.clone()], file_type).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Invalid YAML format: Document must be an object or array. Found: {}",
                found
            )
        );
    }
}

// ============================================================================
// Multiple documents
// ============================================================================

#[test]
fn header_then_prompt_list() {
    let docs = vec![
        json!({"id": "demo", "models": ["gpt-4"]}),
        json!([{"prompt": "a"}, {"prompt": "b"}]),
    ];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::HeaderAndPrompts);
    assert_eq!(result.header.get("id"), Some(&json!("demo")));
    assert_eq!(result.prompts.len(), 2);
}

#[test]
fn header_then_prompt_documents() {
    let docs = vec![
        json!({"title": "t"}),
        json!({"prompt": "a"}),
        json!([{"prompt": "b"}, {"prompt": "c"}]),
    ];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::HeaderAndPrompts);
    assert_eq!(
        result.prompts,
        vec![
            json!({"prompt": "a"}),
            json!({"prompt": "b"}),
            json!({"prompt": "c"})
        ]
    );
}

#[test]
fn flattening_is_one_level_only() {
    let docs = vec![json!({"id": "x"}), json!([[{"prompt": "nested"}]])];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.prompts, vec![json!([{"prompt": "nested"}])]);
}

#[test]
fn stream_of_prompt_documents() {
    let docs = vec![json!({"prompt": "a"}), json!({"prompt": "b"})];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::PromptStream);
    assert!(result.header.is_empty());
    assert_eq!(result.prompts.len(), 2);
}

#[test]
fn first_document_with_both_marker_sets_is_a_prompt() {
    let docs = vec![json!({"id": "p1", "prompt": "a"}), json!({"prompt": "b"})];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::PromptStream);
    assert_eq!(result.prompts.len(), 2);
}

#[test]
fn unmarked_first_document_in_stream_is_a_prompt() {
    let docs = vec![json!({"weight": 2}), json!({"prompt": "b"})];
    let result = classify(docs, FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::PromptStream);
    assert_eq!(result.prompts[0], json!({"weight": 2}));
}

#[parameterized(
    models = { "models" },
    id = { "id" },
    title = { "title" },
    system = { "system" },
    evaluation_config = { "evaluationConfig" },
    config_id = { "configId" },
    config_title = { "configTitle" },
    point_defs = { "point_defs" },
    defs = { "defs" },
)]
fn header_markers(key: &str) {
    let mut map = Map::new();
    map.insert(key.to_string(), json!("x"));
    assert!(is_config_header(&Value::Object(map)));
}

#[test]
fn arrays_are_never_headers() {
    assert!(!is_config_header(&json!([{"id": "x"}])));
}

#[test]
fn yaml_header_with_null_prompts_drops_the_key() {
    let result = classify(vec![json!({"id": "demo", "prompts": null})], FileType::Yaml);
    assert_eq!(result.shape, DocumentShape::HeaderOnly);
    assert!(!result.header.contains_key("prompts"));
    assert!(result.prompts.is_empty());
}

#[test]
fn yaml_header_with_non_list_prompts_is_rejected() {
    let err = classify_documents(vec![json!({"id": "demo", "prompts": "nope"})], FileType::Yaml)
        .unwrap_err();
    assert!(matches!(err, ParseError::PromptsNotList));
}
