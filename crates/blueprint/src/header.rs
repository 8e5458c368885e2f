// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blueprint header normalization.
//!
//! Resolves legacy aliases (`configId`, `configTitle`, `systemPrompt`,
//! `reference`, `citation(s)`, `defs`), validates author, reference and
//! model metadata, and collects the reusable point definitions.

use crate::error::{render_value, ParseError};
use crate::model::{Author, ComparisonConfig, CustomModel, ModelEntry, ModelFormat, Reference};
use serde_json::{Map, Value};

/// Reusable point definitions by name: a JS expression string or a point object
pub type DefinitionMap = Map<String, Value>;

/// Header keys consumed by normalization; anything else passes through
const KNOWN_KEYS: &[&str] = &[
    "id",
    "configId",
    "title",
    "configTitle",
    "system",
    "systemPrompt",
    "description",
    "tags",
    "author",
    "reference",
    "citation",
    "references",
    "citations",
    "point_defs",
    "defs",
    "models",
    "temperature",
    "temperatures",
    "systems",
    "prompts",
];

/// Reference fields, in the order their entries are collected
const REFERENCE_KEYS: &[&str] = &["reference", "citation", "references", "citations"];

/// Required string fields of a custom model
const CUSTOM_MODEL_FIELDS: &[&str] = &["id", "url", "modelName", "inherit"];

/// A normalized header and the definitions its prompts may reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedHeader {
    /// Header fields; `prompts` is left empty
    pub config: ComparisonConfig,
    pub defs: DefinitionMap,
}

/// Normalize the header fields of a blueprint.
pub fn normalize_header(header: &Map<String, Value>) -> Result<NormalizedHeader, ParseError> {
    let mut config = ComparisonConfig {
        id: match optional_id(header, "id", "blueprint header")? {
            Some(id) => Some(id),
            None => optional_id(header, "configId", "blueprint header")?,
        },
        title: first_string(header, &["title", "configTitle"])?,
        system: first_string(header, &["system", "systemPrompt"])?,
        description: optional_string(header, "description", "blueprint header")?,
        ..Default::default()
    };

    if let Some(tags) = present(header, "tags") {
        config.tags = string_list(tags, "tags")?;
    }
    if let Some(author) = present(header, "author") {
        config.author = Some(parse_author(author)?);
    }
    config.references = collect_references(header)?;

    let defs = collect_definitions(header)?;
    if let Some(point_defs) = present(header, "point_defs").and_then(Value::as_object) {
        config.point_defs = Some(point_defs.clone());
    }

    if let Some(models) = present(header, "models") {
        config.models = parse_models(models)?;
    }

    if let Some(temperature) = present(header, "temperature") {
        config.temperature = Some(temperature.as_f64().ok_or_else(|| {
            ParseError::invalid_field("temperature", "blueprint header", "a number", temperature)
        })?);
    }
    if let Some(temperatures) = present(header, "temperatures") {
        config.temperatures = number_list(temperatures, "temperatures")?;
    }
    if let Some(systems) = present(header, "systems") {
        config.systems = system_list(systems)?;
    }

    config.extra = header
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    tracing::debug!(
        id = config.id.as_deref().unwrap_or(""),
        models = config.models.len(),
        definitions = defs.len(),
        "normalized blueprint header"
    );

    Ok(NormalizedHeader { config, defs })
}

/// Look up a key, treating an explicit `null` as absent
pub(crate) fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// The first present key among `keys`, which must be a string
fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Result<Option<String>, ParseError> {
    for key in keys {
        if let Some(value) = optional_string(map, key, "blueprint header")? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// An identifier field: a non-empty string, or a number written as one
pub(crate) fn optional_id(
    map: &Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<Option<String>, ParseError> {
    match present(map, key) {
        None => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ParseError::invalid_field(key, context, "a string", other)),
    }
}

pub(crate) fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<Option<String>, ParseError> {
    match present(map, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ParseError::invalid_field(key, context, "a string", other)),
    }
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn string_list(value: &Value, field: &str) -> Result<Vec<String>, ParseError> {
    let expected = "a list of strings";
    let items = value
        .as_array()
        .ok_or_else(|| ParseError::invalid_field(field, "blueprint header", expected, value))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| ParseError::invalid_field(field, "blueprint header", expected, item))
        })
        .collect()
}

fn number_list(value: &Value, field: &str) -> Result<Vec<f64>, ParseError> {
    let expected = "a list of numbers";
    let items = value
        .as_array()
        .ok_or_else(|| ParseError::invalid_field(field, "blueprint header", expected, value))?;
    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| ParseError::invalid_field(field, "blueprint header", expected, item))
        })
        .collect()
}

fn system_list(value: &Value) -> Result<Vec<Option<String>>, ParseError> {
    let expected = "a list of strings or nulls";
    let items = value
        .as_array()
        .ok_or_else(|| ParseError::invalid_field("systems", "blueprint header", expected, value))?;
    items
        .iter()
        .map(|item| match item {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            other => Err(ParseError::invalid_field(
                "systems",
                "blueprint header",
                expected,
                other,
            )),
        })
        .collect()
}

fn parse_author(value: &Value) -> Result<Author, ParseError> {
    match value {
        Value::String(name) => Ok(Author::Name(name.clone())),
        Value::Object(map) => {
            let name = non_empty_str(map, "name").ok_or(ParseError::AuthorMissingName)?;
            Ok(Author::Profile {
                name: name.to_string(),
                url: optional_string(map, "url", "author")?,
                image_url: optional_string(map, "image_url", "author")?,
            })
        }
        _ => Err(ParseError::InvalidAuthor),
    }
}

fn collect_references(header: &Map<String, Value>) -> Result<Vec<Reference>, ParseError> {
    let mut references = Vec::new();
    for key in REFERENCE_KEYS {
        match present(header, key) {
            None => {}
            Some(Value::Array(items)) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    references.push(parse_reference(item)?);
                }
            }
            Some(single) => references.push(parse_reference(single)?),
        }
    }
    Ok(references)
}

/// Parse a reference given as a title string or a `{title|name, url?}` object.
pub(crate) fn parse_reference(value: &Value) -> Result<Reference, ParseError> {
    match value {
        Value::String(title) => Ok(Reference::titled(title.clone())),
        Value::Object(map) => {
            let title = non_empty_str(map, "title")
                .or_else(|| non_empty_str(map, "name"))
                .ok_or(ParseError::ReferenceMissingTitle)?;
            Ok(Reference {
                title: title.to_string(),
                url: optional_string(map, "url", "reference")?,
            })
        }
        other => Err(ParseError::InvalidReference {
            found: render_value(other),
        }),
    }
}

/// Merge `defs` and `point_defs`; `point_defs` wins on collisions.
fn collect_definitions(header: &Map<String, Value>) -> Result<DefinitionMap, ParseError> {
    let mut defs = DefinitionMap::new();
    for key in ["defs", "point_defs"] {
        let Some(value) = present(header, key) else {
            continue;
        };
        let entries = value
            .as_object()
            .ok_or_else(|| ParseError::invalid_field(key, "blueprint header", "an object", value))?;
        for (name, definition) in entries {
            if !(definition.is_string() || definition.is_object()) {
                return Err(ParseError::InvalidDefinition { name: name.clone() });
            }
            defs.insert(name.clone(), definition.clone());
        }
    }
    Ok(defs)
}

fn parse_models(value: &Value) -> Result<Vec<ModelEntry>, ParseError> {
    let items = value.as_array().ok_or_else(|| ParseError::ModelsNotList {
        found: render_value(value),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_model(index, item))
        .collect()
}

fn parse_model(index: usize, value: &Value) -> Result<ModelEntry, ParseError> {
    let map = match value {
        Value::String(id) => return Ok(ModelEntry::Named(id.clone())),
        Value::Object(map) => map,
        other => {
            return Err(ParseError::InvalidModel {
                model: format!("index {}", index),
                reason: format!(
                    "must be a model id string or a custom model object, found {}",
                    render_value(other)
                ),
            })
        }
    };

    let label = non_empty_str(map, "id")
        .map(String::from)
        .unwrap_or_else(|| format!("index {}", index));
    let invalid = |reason: String| ParseError::InvalidModel {
        model: label.clone(),
        reason,
    };

    let required = |field: &str| {
        non_empty_str(map, field)
            .map(String::from)
            .ok_or_else(|| invalid(format!("missing required string field '{}'", field)))
    };
    let id = required("id")?;
    let url = required("url")?;
    let model_name = required("modelName")?;
    let inherit = required("inherit")?;

    let format = match present(map, "format") {
        None => None,
        Some(Value::String(s)) if s == "chat" => Some(ModelFormat::Chat),
        Some(Value::String(s)) if s == "completions" => Some(ModelFormat::Completions),
        Some(other) => {
            return Err(invalid(format!(
                "'format' must be 'chat' or 'completions', found {}",
                render_value(other)
            )))
        }
    };

    let headers = match present(map, "headers") {
        None => None,
        Some(Value::Object(headers)) => Some(headers.clone()),
        Some(other) => {
            return Err(invalid(format!(
                "'headers' must be an object, found {}",
                render_value(other)
            )))
        }
    };

    let extra = map
        .iter()
        .filter(|(key, _)| {
            !CUSTOM_MODEL_FIELDS.contains(&key.as_str())
                && key.as_str() != "format"
                && key.as_str() != "headers"
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(ModelEntry::Custom(CustomModel {
        id,
        url,
        model_name,
        inherit,
        format,
        headers,
        extra,
    }))
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
