// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompt normalization

use crate::error::{render_value, ParseError};
use crate::hash::content_hash_id;
use crate::header::{optional_id, optional_string, parse_reference, present, DefinitionMap};
use crate::model::{Message, PointDefinition, PromptCitation, PromptConfig, Role};
use crate::point::{normalize_points, MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::refs::expand_refs;
use serde_json::{Map, Value};

/// Rubric keys, in priority order; only the first present one is used
const RUBRIC_KEYS: &[&str] = &["should", "points", "expect", "expects", "expectations"];

const SHOULD_NOT_KEY: &[&str] = &["should_not"];

/// Normalize one raw prompt.
///
/// `index` is the prompt's position in the blueprint and labels errors for
/// prompts that have no `id`. Prompts without an `id` get one derived from
/// their normalized content.
pub fn normalize_prompt(
    raw: &Value,
    index: usize,
    defs: &DefinitionMap,
) -> Result<PromptConfig, ParseError> {
    let map = raw
        .as_object()
        .ok_or(ParseError::PromptNotObject { index })?;

    let given_id = optional_id(map, "id", "prompt")?;
    let label = given_id
        .clone()
        .unwrap_or_else(|| format!("index-{}", index));
    let context = format!("prompt '{}'", label);

    let mut prompt = PromptConfig {
        id: given_id.clone().unwrap_or_default(),
        description: optional_string(map, "description", &context)?,
        messages: normalize_messages(map, &label)?,
        system: optional_string(map, "system", &context)?,
        ideal_response: match optional_string(map, "ideal", &context)? {
            Some(ideal) => Some(ideal),
            None => optional_string(map, "idealResponse", &context)?,
        },
        citation: parse_citation(map)?,
        weight: parse_weight(map, &label)?,
        points: normalize_rubric(map, RUBRIC_KEYS, defs, &label)?,
        should_not: normalize_rubric(map, SHOULD_NOT_KEY, defs, &label)?,
    };

    if given_id.is_none() {
        prompt.id = generate_id(&prompt)?;
        tracing::debug!(index, id = %prompt.id, "generated prompt id");
    }
    Ok(prompt)
}

/// Hash of the normalized prompt with its `id` left out
fn generate_id(prompt: &PromptConfig) -> Result<String, ParseError> {
    let mut value = serde_json::to_value(prompt).map_err(|e| ParseError::Json(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(content_hash_id(&value))
}

fn normalize_messages(
    map: &Map<String, Value>,
    prompt_id: &str,
) -> Result<Vec<Message>, ParseError> {
    if let Some(messages) = present(map, "messages") {
        let items = messages.as_array().ok_or_else(|| {
            ParseError::invalid_field(
                "messages",
                &format!("prompt '{}'", prompt_id),
                "a list of messages",
                messages,
            )
        })?;
        return items
            .iter()
            .enumerate()
            .map(|(index, message)| normalize_message(index, message, prompt_id))
            .collect();
    }

    let text = match present(map, "prompt") {
        Some(text) => Some(("prompt", text)),
        None => present(map, "promptText").map(|text| ("promptText", text)),
    };
    match text {
        None => Ok(Vec::new()),
        Some((_, Value::String(text))) => Ok(vec![Message::user(text.clone())]),
        Some((field, other)) => Err(ParseError::invalid_field(
            field,
            &format!("prompt '{}'", prompt_id),
            "a string",
            other,
        )),
    }
}

fn normalize_message(index: usize, value: &Value, prompt_id: &str) -> Result<Message, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidMessage {
        index,
        prompt_id: prompt_id.to_string(),
        reason: reason.to_string(),
    };
    let map = value
        .as_object()
        .ok_or_else(|| invalid(&format!("expected an object, found {}", render_value(value))))?;

    // Already shaped: { role, content }
    let (role, content) = if map.contains_key("role") && map.contains_key("content") {
        let role = map
            .get("role")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("'role' must be a string"))?;
        (role, map.get("content"))
    } else {
        if map.len() != 1 {
            return Err(ParseError::MessageKeyCount {
                count: map.len(),
                index,
                prompt_id: prompt_id.to_string(),
            });
        }
        match map.iter().next() {
            Some((role, content)) => (role.as_str(), Some(content)),
            None => return Err(invalid("message is empty")),
        }
    };

    let role = Role::parse(role).ok_or_else(|| ParseError::InvalidRole {
        role: role.to_string(),
        index,
        prompt_id: prompt_id.to_string(),
    })?;
    let content = content
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("message content must be a string"))?;

    Ok(Message {
        role,
        content: content.to_string(),
    })
}

fn parse_citation(map: &Map<String, Value>) -> Result<Option<PromptCitation>, ParseError> {
    let Some(value) = present(map, "citation").or_else(|| present(map, "reference")) else {
        return Ok(None);
    };
    match value {
        Value::String(text) => Ok(Some(PromptCitation::Text(text.clone()))),
        other => parse_reference(other).map(|r| Some(PromptCitation::Reference(r))),
    }
}

fn parse_weight(map: &Map<String, Value>, prompt_id: &str) -> Result<Option<f64>, ParseError> {
    let Some(value) = ["weight", "importance", "multiplier"]
        .iter()
        .find_map(|key| present(map, key))
    else {
        return Ok(None);
    };
    value
        .as_f64()
        .filter(|w| (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(w))
        .map(Some)
        .ok_or_else(|| ParseError::InvalidWeight {
            found: render_value(value),
            prompt_id: prompt_id.to_string(),
        })
}

fn normalize_rubric(
    map: &Map<String, Value>,
    keys: &[&'static str],
    defs: &DefinitionMap,
    prompt_id: &str,
) -> Result<Vec<PointDefinition>, ParseError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| present(map, key).map(|value| (*key, value)))
    else {
        return Ok(Vec::new());
    };
    let items = value.as_array().ok_or_else(|| ParseError::RubricNotList {
        key,
        prompt_id: prompt_id.to_string(),
    })?;

    let points = normalize_points(items, prompt_id)?;
    expand_refs(points, defs, prompt_id)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
