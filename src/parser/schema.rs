// ABOUTME: Schema - the configuration that shapes parsed records.
// ABOUTME: Ordered label rules, default field set, optional fields, and transforms.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Record, extract_url};

/// A value transform applied to a field's extracted text.
pub type FieldTransform = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// Maps any label containing `needle` to the canonical `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRule {
    /// Lowercase substring searched for in the lowercased label.
    pub needle: String,
    /// Canonical field name the label resolves to.
    pub field: String,
}

/// Describes the shape of every record produced from one kind of agent output.
///
/// Label rules are tried in order and the first rule whose needle occurs in
/// the label wins, so more specific needles must come first.
#[derive(Clone, Default)]
pub struct Schema {
    label_rules: Vec<LabelRule>,
    defaults: Vec<(String, Value)>,
    optional_fields: HashSet<String>,
    transforms: HashMap<String, FieldTransform>,
    url_field: Option<String>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transforms: Vec<_> = self.transforms.keys().collect();
        transforms.sort();
        f.debug_struct("Schema")
            .field("label_rules", &self.label_rules)
            .field("defaults", &self.defaults)
            .field("optional_fields", &self.optional_fields)
            .field("transforms", &transforms)
            .field("url_field", &self.url_field)
            .finish()
    }
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Schema for dated timeline events (political, personal, economic, ...).
    pub fn timeline_event() -> Self {
        Self::builder()
            .rule("year", "date")
            .rule("date", "date")
            .rule("title", "event_title")
            .rule("description", "detailed_summary")
            .rule("location", "location_name")
            .rule("source", "source_url")
            .field("date", Value::Null)
            .field("event_title", "")
            .field("detailed_summary", "")
            .field("location_name", "")
            .optional_field("latitude", Value::Null)
            .optional_field("longitude", Value::Null)
            .field("source_url", "")
            .url_field("source_url")
            .build()
    }

    /// Schema for the people and institutions connected to an artist.
    pub fn artist_network() -> Self {
        Self::builder()
            .rule("duration", "relationship_duration")
            .rule("score", "connection_score")
            .rule("artwork", "related_artwork")
            .rule("source", "source_url")
            .rule("summary", "relationship_summary")
            .rule("relationship", "relationship_summary")
            .rule("entity", "connected_entity_name")
            .rule("name", "connected_entity_name")
            .field("connected_entity_name", "")
            .field("relationship_summary", "")
            .field("relationship_duration", "")
            .optional_field("connection_score", 1)
            .optional_field("related_artwork", "")
            .field("source_url", "")
            .transform("connection_score", clamp_score)
            .url_field("source_url")
            .build()
    }

    /// Resolve a lowercased label to its canonical field name.
    pub fn resolve_label(&self, label: &str) -> Option<&str> {
        self.label_rules
            .iter()
            .find(|rule| label.contains(rule.needle.as_str()))
            .map(|rule| rule.field.as_str())
    }

    /// A fresh record holding an independent copy of every default value.
    pub fn new_record(&self) -> Record {
        let mut record = Record::new();
        for (field, default) in &self.defaults {
            record.set(field.clone(), default.clone());
        }
        record
    }

    /// Fill fields missing from `record` with their defaults.
    ///
    /// Keys the schema does not know are kept so validation can reject them.
    pub fn complete(&self, record: Record) -> Record {
        let mut completed = self.new_record();
        for (field, value) in record.iter() {
            completed.set(field.clone(), value.clone());
        }
        completed
    }

    /// The default value of a field, or `None` if the field is not in the schema.
    pub fn default_for(&self, field: &str) -> Option<&Value> {
        self.defaults
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.default_for(field).is_some()
    }

    pub fn is_optional(&self, field: &str) -> bool {
        self.optional_fields.contains(field)
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.defaults.iter().map(|(name, _)| name.as_str())
    }

    pub fn label_rules(&self) -> &[LabelRule] {
        &self.label_rules
    }

    pub fn transform(&self, field: &str) -> Option<&FieldTransform> {
        self.transforms.get(field)
    }

    pub fn url_field(&self) -> Option<&str> {
        self.url_field.as_deref()
    }

    /// Run URL extraction and field transforms over a record built outside
    /// the text parser, so both paths store the same value shapes.
    ///
    /// Strings are fed through as-is and numbers as their decimal text;
    /// nulls and other values are left alone.
    pub fn normalize(&self, mut record: Record) -> Record {
        if let Some(field) = self.url_field() {
            if let Some(url) = record.get_str(field).map(extract_url) {
                record.set(field, url);
            }
        }

        for (field, transform) in &self.transforms {
            if self.url_field() == Some(field.as_str()) {
                continue;
            }
            let text = match record.get(field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            };
            record.set(field.clone(), transform(&text));
        }

        record
    }
}

/// Builder for [`Schema`].
#[derive(Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Append a label rule. Rules are matched in the order they are added.
    pub fn rule(mut self, needle: impl Into<String>, field: impl Into<String>) -> Self {
        self.schema.label_rules.push(LabelRule {
            needle: needle.into().to_lowercase(),
            field: field.into(),
        });
        self
    }

    /// Declare a required field with its default value.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let name = name.into();
        let default = default.into();
        match self.schema.defaults.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = default,
            None => self.schema.defaults.push((name, default)),
        }
        self
    }

    /// Declare a field that may keep its default value.
    pub fn optional_field(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let name = name.into();
        let mut builder = self.field(name.clone(), default);
        builder.schema.optional_fields.insert(name);
        builder
    }

    /// Register a transform for a field's extracted text.
    pub fn transform<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.schema.transforms.insert(field.into(), Arc::new(f));
        self
    }

    /// Designate the field that receives URL extraction.
    pub fn url_field(mut self, field: impl Into<String>) -> Self {
        self.schema.url_field = Some(field.into());
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

/// Read the leading integer of `raw` and clamp it to 1..=10.
///
/// Text with no leading integer scores 1.
pub fn clamp_score(raw: &str) -> Value {
    let raw = raw.trim();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();

    let score = if digits.is_empty() || negative {
        1
    } else {
        // Overlong digit runs overflow; they are still "above ten".
        digits.parse::<u64>().map_or(10, |n| n.clamp(1, 10))
    };
    Value::from(score)
}
