// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rubric point normalization.
//!
//! Accepted point encodings:
//!
//! ```yaml
//! should:
//!   - "Mentions the capital"              # text
//!   - $contains: "Paris"                  # idiomatic function
//!   - { text: "Cites a source", weight: 2 }
//!   - { fn: icontains, arg: "paris" }     # full object
//!   - "Says hello": "Style guide §2"      # point: citation pair
//!   - ["Says hi", { $contains: "hello" }] # alternative path
//! ```

use crate::error::{render_value, ParseError};
use crate::header::present;
use crate::model::{Point, PointCriterion, PointDefinition, DEFAULT_MULTIPLIER};
use serde_json::{Map, Value};

pub const MIN_MULTIPLIER: f64 = 0.1;
pub const MAX_MULTIPLIER: f64 = 10.0;

/// Keys that mark an object as a full point definition
const FULL_OBJECT_KEYS: &[&str] = &["text", "point", "fn"];

/// Function-name stems and their canonical spelling
const CANONICAL_STEMS: &[(&str, &str)] = &[("contain", "contains"), ("match", "matches")];

/// Normalize a rubric array into point definitions.
///
/// Alternative paths that end up empty are dropped from the result.
pub fn normalize_points(
    values: &[Value],
    prompt_id: &str,
) -> Result<Vec<PointDefinition>, ParseError> {
    let mut definitions = Vec::with_capacity(values.len());
    for value in values {
        match normalize_entry(value, prompt_id)? {
            PointDefinition::Alternatives(points) if points.is_empty() => {}
            definition => definitions.push(definition),
        }
    }
    Ok(definitions)
}

fn normalize_entry(value: &Value, prompt_id: &str) -> Result<PointDefinition, ParseError> {
    match value {
        Value::String(text) => Ok(PointDefinition::Single(Point::text(text.clone()))),
        Value::Array(items) => {
            normalize_alternatives(items, prompt_id).map(PointDefinition::Alternatives)
        }
        Value::Object(map) => normalize_object(map, prompt_id).map(PointDefinition::Single),
        other => Err(ParseError::InvalidPointType {
            prompt_id: prompt_id.to_string(),
            found: render_value(other),
        }),
    }
}

fn normalize_alternatives(items: &[Value], prompt_id: &str) -> Result<Vec<Point>, ParseError> {
    if items.first().is_some_and(Value::is_array) {
        return Err(ParseError::NestedArray {
            prompt_id: prompt_id.to_string(),
        });
    }

    items
        .iter()
        .filter(|item| !is_blank_alternative(item))
        .map(|item| match item {
            Value::String(text) => Ok(Point::text(text.clone())),
            Value::Object(map) => normalize_object(map, prompt_id),
            Value::Array(_) => Err(ParseError::NestedAlternativePath {
                prompt_id: prompt_id.to_string(),
            }),
            other => Err(ParseError::InvalidAlternative {
                prompt_id: prompt_id.to_string(),
                found: render_value(other),
            }),
        })
        .collect()
}

fn is_blank_alternative(item: &Value) -> bool {
    match item {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Fields extracted from a point object before validation
#[derive(Default)]
struct RawPoint<'a> {
    text: Option<&'a Value>,
    function: Option<&'a Value>,
    args: Option<&'a Value>,
    multiplier: Option<&'a Value>,
    citation: Option<&'a Value>,
}

impl<'a> RawPoint<'a> {
    /// `{ text|point|fn, fnArgs|arg?, weight?, citation? }`
    fn full(map: &'a Map<String, Value>) -> Option<Self> {
        if !FULL_OBJECT_KEYS.iter().any(|key| map.contains_key(*key)) {
            return None;
        }
        Some(RawPoint {
            text: present(map, "text").or_else(|| present(map, "point")),
            function: present(map, "fn"),
            args: present(map, "fnArgs").or_else(|| present(map, "arg")),
            ..Self::weighted(map)
        })
    }

    /// `{ "Point text": "citation" }`
    fn citation_pair(map: &'a Map<String, Value>) -> Option<(&'a str, &'a str)> {
        if map.len() != 1 {
            return None;
        }
        let (key, value) = map.iter().next()?;
        value.as_str().map(|citation| (key.as_str(), citation))
    }

    fn weighted(map: &'a Map<String, Value>) -> Self {
        RawPoint {
            multiplier: present(map, "weight").or_else(|| present(map, "multiplier")),
            citation: present(map, "citation"),
            ..Default::default()
        }
    }
}

fn normalize_object(map: &Map<String, Value>, prompt_id: &str) -> Result<Point, ParseError> {
    if let Some((key, args)) = map.iter().find(|(key, _)| key.starts_with('$')) {
        let raw = RawPoint {
            args: Some(args).filter(|args| !args.is_null()),
            ..RawPoint::weighted(map)
        };
        return build_point(None, Some(&key[1..]), raw, map, prompt_id);
    }

    if let Some(raw) = RawPoint::full(map) {
        let text = optional_str(raw.text, "text", prompt_id)?;
        let function = optional_str(raw.function, "fn", prompt_id)?;
        return build_point(text, function, raw, map, prompt_id);
    }

    if let Some((text, citation)) = RawPoint::citation_pair(map) {
        return Ok(Point::text(text).with_citation(citation));
    }

    build_point(None, None, RawPoint::default(), map, prompt_id)
}

fn build_point(
    text: Option<&str>,
    function: Option<&str>,
    raw: RawPoint<'_>,
    map: &Map<String, Value>,
    prompt_id: &str,
) -> Result<Point, ParseError> {
    let text = text.filter(|text| !text.is_empty());
    let function = function.filter(|name| !name.is_empty());

    let criterion = match (text, function) {
        (Some(_), Some(_)) => {
            return Err(ParseError::TextAndFunction {
                prompt_id: prompt_id.to_string(),
            })
        }
        (None, None) => {
            return Err(ParseError::MissingCriterion {
                prompt_id: prompt_id.to_string(),
                found: render_value(&Value::Object(map.clone())),
            })
        }
        (Some(text), None) => PointCriterion::Text(text.to_string()),
        (None, Some(name)) => PointCriterion::Function {
            name: canonical_function_name(name),
            args: raw.args.cloned(),
        },
    };

    Ok(Point {
        criterion,
        multiplier: parse_multiplier(raw.multiplier, prompt_id)?,
        citation: optional_str(raw.citation, "citation", prompt_id)?.map(String::from),
    })
}

fn optional_str<'a>(
    value: Option<&'a Value>,
    field: &str,
    prompt_id: &str,
) -> Result<Option<&'a str>, ParseError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ParseError::invalid_field(
            field,
            &format!("point of prompt '{}'", prompt_id),
            "a string",
            other,
        )),
    }
}

fn parse_multiplier(value: Option<&Value>, prompt_id: &str) -> Result<f64, ParseError> {
    let Some(value) = value else {
        return Ok(DEFAULT_MULTIPLIER);
    };
    value
        .as_f64()
        .filter(|m| (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(m))
        .ok_or_else(|| ParseError::InvalidMultiplier {
            found: render_value(value),
            prompt_id: prompt_id.to_string(),
        })
}

/// Canonicalize a point function name (`contain*` → `contains*`, `match*` → `matches*`).
pub fn canonical_function_name(name: &str) -> String {
    for &(stem, canonical) in CANONICAL_STEMS {
        if let Some(rest) = name.strip_prefix(stem) {
            if !name.starts_with(canonical) {
                return format!("{}{}", canonical, rest);
            }
        }
    }
    name.to_string()
}

#[cfg(test)]
#[path = "point_tests.rs"]
mod tests;
