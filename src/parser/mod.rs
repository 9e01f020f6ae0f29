// ABOUTME: Parser module - turns numbered, labelled LLM prose into records.
// ABOUTME: Schemas drive label resolution, defaults, transforms, and validation.

mod record;
mod schema;
mod text;
mod validate;

pub use record::Record;
pub use schema::{FieldTransform, LabelRule, Schema, SchemaBuilder, clamp_score};
pub use text::{extract_url, parse};
pub use validate::validate;

#[cfg(test)]
mod text_test;
