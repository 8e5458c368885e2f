// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized blueprint types

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Default multiplier for a point without an explicit weight
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// A fully normalized blueprint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Default system prompt for every prompt in the blueprint.
    ///
    /// An explicit `system: null` in the header reads as absent, so it is
    /// omitted from the output rather than written as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelEntry>,
    /// Reusable point definitions, kept as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_defs: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub temperatures: Vec<f64>,
    /// System prompt variants; `None` runs without a system prompt
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub systems: Vec<Option<String>>,
    /// Header keys without a dedicated field (e.g. `evaluationConfig`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub prompts: Vec<PromptConfig>,
}

impl ComparisonConfig {
    /// Whether the header carries anything beyond the prompts
    pub fn has_header_metadata(&self) -> bool {
        self.id.is_some()
            || self.title.is_some()
            || self.system.is_some()
            || self.description.is_some()
            || !self.tags.is_empty()
            || self.author.is_some()
            || !self.references.is_empty()
            || !self.models.is_empty()
            || self.point_defs.is_some()
            || self.temperature.is_some()
            || !self.temperatures.is_empty()
            || !self.systems.is_empty()
            || !self.extra.is_empty()
    }

    /// Get a prompt by id
    pub fn get_prompt(&self, id: &str) -> Option<&PromptConfig> {
        self.prompts.iter().find(|p| p.id == id)
    }
}

/// Blueprint author: a bare name or a profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Profile {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Name(name) => name,
            Author::Profile { name, .. } => name,
        }
    }
}

/// A citation or reference attached to a blueprint or prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Reference {
    pub fn titled(title: impl Into<String>) -> Self {
        Reference {
            title: title.into(),
            url: None,
        }
    }
}

/// A model under evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelEntry {
    /// Identifier of a known model (e.g. `openai:gpt-4o`)
    Named(String),
    Custom(CustomModel),
}

impl ModelEntry {
    pub fn id(&self) -> &str {
        match self {
            ModelEntry::Named(id) => id,
            ModelEntry::Custom(model) => &model.id,
        }
    }
}

/// A model served from a custom endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomModel {
    pub id: String,
    pub url: String,
    #[serde(rename = "modelName")]
    pub model_name: String,
    /// Provider whose client is reused for the endpoint
    pub inherit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ModelFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    /// Provider-specific settings passed through as written
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Chat,
    Completions,
}

/// A single prompt and its rubric
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "idealResponse", skip_serializing_if = "Option::is_none")]
    pub ideal_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<PromptCitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub points: Vec<PointDefinition>,
    pub should_not: Vec<PointDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PromptCitation {
    Text(String),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Parse a role name; `ai` is accepted as an alias for `assistant`
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user" => Some(Role::User),
            "assistant" | "ai" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }
}

/// One rubric entry: a single point or a set of alternatives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointDefinition {
    Single(Point),
    /// Satisfying any one member satisfies the whole entry
    Alternatives(Vec<Point>),
}

impl PointDefinition {
    /// All leaf points of this entry
    pub fn points(&self) -> &[Point] {
        match self {
            PointDefinition::Single(point) => std::slice::from_ref(point),
            PointDefinition::Alternatives(points) => points,
        }
    }
}

/// A leaf rubric criterion
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub criterion: PointCriterion,
    pub multiplier: f64,
    pub citation: Option<String>,
}

/// What a point checks: a graded statement or a named function
#[derive(Debug, Clone, PartialEq)]
pub enum PointCriterion {
    Text(String),
    Function { name: String, args: Option<Value> },
}

impl Point {
    pub fn text(text: impl Into<String>) -> Self {
        Point {
            criterion: PointCriterion::Text(text.into()),
            multiplier: DEFAULT_MULTIPLIER,
            citation: None,
        }
    }

    pub fn function(name: impl Into<String>, args: Option<Value>) -> Self {
        Point {
            criterion: PointCriterion::Function {
                name: name.into(),
                args,
            },
            multiplier: DEFAULT_MULTIPLIER,
            citation: None,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Function name, if this is a function point
    pub fn function_name(&self) -> Option<&str> {
        match &self.criterion {
            PointCriterion::Function { name, .. } => Some(name),
            PointCriterion::Text(_) => None,
        }
    }

    pub fn function_args(&self) -> Option<&Value> {
        match &self.criterion {
            PointCriterion::Function { args, .. } => args.as_ref(),
            PointCriterion::Text(_) => None,
        }
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.criterion {
            PointCriterion::Text(text) => Some(text),
            PointCriterion::Function { .. } => None,
        }
    }
}

// Points serialize flat, as `{text, multiplier, citation?}` or
// `{fn, fnArgs?, multiplier, citation?}`.
impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.criterion {
            PointCriterion::Text(text) => map.serialize_entry("text", text)?,
            PointCriterion::Function { name, args } => {
                map.serialize_entry("fn", name)?;
                if let Some(args) = args {
                    map.serialize_entry("fnArgs", args)?;
                }
            }
        }
        map.serialize_entry("multiplier", &self.multiplier)?;
        if let Some(citation) = &self.citation {
            map.serialize_entry("citation", citation)?;
        }
        map.end()
    }
}
