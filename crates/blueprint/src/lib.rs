// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Blueprint parsing and normalization
//!
//! A blueprint is a YAML or JSON document describing an evaluation run:
//! prompts, rubric points, models and system prompts. Several historical
//! layouts and shorthands are accepted; all of them normalize to a single
//! [`ComparisonConfig`].
//!
//! ```text
//! content → loader → documents → shape → (header, prompts)
//!         → header → prompt (points → refs → id) → ComparisonConfig
//! ```

mod error;
mod hash;
mod header;
mod loader;
mod model;
mod parser;
mod point;
mod prompt;
mod refs;
mod shape;
mod validator;

pub use error::ParseError;
pub use hash::{canonical_json, content_hash_id};
pub use header::{normalize_header, DefinitionMap, NormalizedHeader};
pub use loader::{load_documents, FileType};
pub use model::{
    Author, ComparisonConfig, CustomModel, Message, ModelEntry, ModelFormat, Point,
    PointCriterion, PointDefinition, PromptCitation, PromptConfig, Reference, Role,
};
pub use parser::{parse_and_normalize_blueprint, parse_blueprint_file};
pub use point::{canonical_function_name, normalize_points, MAX_MULTIPLIER, MIN_MULTIPLIER};
pub use prompt::normalize_prompt;
pub use refs::expand_refs;
pub use shape::{classify_documents, is_config_header, ClassifiedDocuments, DocumentShape};
pub use validator::{validate_blueprint, validate_config, ValidationError, ValidationErrors};
