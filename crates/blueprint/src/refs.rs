// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `$ref` expansion against the header's point definitions

use crate::error::ParseError;
use crate::header::DefinitionMap;
use crate::model::{Point, PointCriterion, PointDefinition};
use crate::point::normalize_points;
use serde_json::Value;

/// Function name of a reference point
pub const REF_FUNCTION: &str = "ref";

/// Function name given to string definitions
pub const JS_FUNCTION: &str = "js";

/// Replace every `$ref` point with the definition it names.
///
/// A string definition becomes a `js` point that keeps the referencing
/// point's multiplier and citation. An object definition is normalized as a
/// point in its own right and replaces the reference wholesale.
pub fn expand_refs(
    points: Vec<PointDefinition>,
    defs: &DefinitionMap,
    prompt_id: &str,
) -> Result<Vec<PointDefinition>, ParseError> {
    points
        .into_iter()
        .map(|definition| match definition {
            PointDefinition::Single(point) => {
                expand_point(point, defs, prompt_id).map(PointDefinition::Single)
            }
            PointDefinition::Alternatives(points) => points
                .into_iter()
                .map(|point| expand_point(point, defs, prompt_id))
                .collect::<Result<Vec<_>, _>>()
                .map(PointDefinition::Alternatives),
        })
        .collect()
}

fn expand_point(point: Point, defs: &DefinitionMap, prompt_id: &str) -> Result<Point, ParseError> {
    if point.function_name() != Some(REF_FUNCTION) {
        return Ok(point);
    }

    let name = ref_name(point.function_args())
        .map(String::from)
        .ok_or_else(|| ParseError::InvalidRef {
            prompt_id: prompt_id.to_string(),
        })?;
    let definition = defs.get(&name).ok_or_else(|| ParseError::UndefinedRef {
        name: name.clone(),
        prompt_id: prompt_id.to_string(),
    })?;

    match definition {
        Value::String(expression) => Ok(Point {
            criterion: PointCriterion::Function {
                name: JS_FUNCTION.to_string(),
                args: Some(Value::String(expression.clone())),
            },
            multiplier: point.multiplier,
            citation: point.citation,
        }),
        Value::Object(_) => resolve_object_definition(&name, definition, prompt_id),
        _ => Err(ParseError::InvalidDefinition { name }),
    }
}

fn ref_name(args: Option<&Value>) -> Option<&str> {
    match args? {
        Value::String(name) => Some(name),
        Value::Object(map) => map.get("name").and_then(Value::as_str),
        _ => None,
    }
}

fn resolve_object_definition(
    name: &str,
    definition: &Value,
    prompt_id: &str,
) -> Result<Point, ParseError> {
    let resolved = normalize_points(std::slice::from_ref(definition), prompt_id)?;
    match resolved.into_iter().next() {
        Some(PointDefinition::Single(point)) => Ok(point),
        _ => Err(ParseError::InvalidDefinition {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "refs_tests.rs"]
mod tests;
