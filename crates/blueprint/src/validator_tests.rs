// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn valid_blueprint_passes() {
    let yaml = "id: ok\n---\n- prompt: Hi\n  should: [Greets]\n";
    let config = validate_blueprint(yaml, FileType::Yaml).unwrap();
    assert_eq!(config.prompts.len(), 1);
}

#[test]
fn header_only_blueprint_is_not_empty() {
    assert!(validate_blueprint("id: drafts\nmodels: [m]\n", FileType::Yaml).is_ok());
}

#[test]
fn empty_blueprint_is_reported() {
    let errors = validate_blueprint("[]", FileType::Json).unwrap_err();
    assert_eq!(errors.errors, vec![ValidationError::EmptyBlueprint]);
}

#[test]
fn parse_failure_is_a_single_error() {
    let errors = validate_blueprint("- should: [{}]\n", FileType::Yaml).unwrap_err();
    assert_eq!(errors.errors.len(), 1);
    let ValidationError::Parse(message) = &errors.errors[0] else {
        panic!("expected parse error, got {:?}", errors.errors[0]);
    };
    assert!(message.contains("must define 'text'"));
}

#[test]
fn prompts_without_text_are_reported() {
    let yaml = "- id: a\n  should: [x]\n- id: b\n  prompt: fine\n- id: c\n  messages: []\n";
    let errors = validate_blueprint(yaml, FileType::Yaml).unwrap_err();
    assert_eq!(
        errors.errors,
        vec![
            ValidationError::MissingPromptText {
                prompt_id: "a".to_string()
            },
            ValidationError::MissingPromptText {
                prompt_id: "c".to_string()
            },
        ]
    );
}

#[test]
fn duplicate_ids_are_reported_once() {
    let yaml = "- {id: a, prompt: x}\n- {id: a, prompt: y}\n- {id: a, prompt: z}\n- {id: b, prompt: w}\n";
    let errors = validate_blueprint(yaml, FileType::Yaml).unwrap_err();
    assert_eq!(
        errors.errors,
        vec![ValidationError::DuplicatePromptId {
            prompt_id: "a".to_string()
        }]
    );
}

#[test]
fn identical_unnamed_prompts_collide() {
    let yaml = "- prompt: same\n- prompt: same\n";
    let errors = validate_blueprint(yaml, FileType::Yaml).unwrap_err();
    assert!(matches!(
        errors.errors[0],
        ValidationError::DuplicatePromptId { .. }
    ));
}

#[test]
fn errors_display_numbered() {
    let errors = ValidationErrors {
        errors: vec![
            ValidationError::EmptyBlueprint,
            ValidationError::DuplicatePromptId {
                prompt_id: "a".to_string(),
            },
        ],
    };
    let text = errors.to_string();
    assert!(text.starts_with("Blueprint validation failed with 2 error(s):"));
    assert!(text.contains("  1: Blueprint must contain at least one prompt or config header."));
    assert!(text.contains("  2: Duplicate prompt id 'a'."));
}
