//! Core types for form generation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::schema::SchemaNode;

// ============================================================================
// Field Tags
// ============================================================================

/// Semantic type of a field's value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Date => "date",
        }
    }

    /// Field type of a literal value; kinds with no field type are strings.
    pub fn of_literal(value: &Value) -> Self {
        match value {
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            _ => FieldType::String,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widget a renderer should use for a field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text input
    #[default]
    Input,
    /// Checkbox / toggle
    Boolean,
    Select,
    Multiselect,
    /// Date picker
    Date,
    /// Numeric range slider
    Range,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Input => "input",
            InputKind::Boolean => "boolean",
            InputKind::Select => "select",
            InputKind::Multiselect => "multiselect",
            InputKind::Date => "date",
            InputKind::Range => "range",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric bounds for range inputs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

// ============================================================================
// Classification
// ============================================================================

/// Result of classifying one schema node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub field_type: FieldType,
    pub input: InputKind,
    pub option_items: Option<Vec<String>>,
    pub range: Option<NumericRange>,
}

impl Classification {
    pub fn new(field_type: FieldType, input: InputKind) -> Self {
        Self {
            field_type,
            input,
            option_items: None,
            range: None,
        }
    }
}

// ============================================================================
// Descriptors and Overrides
// ============================================================================

/// Generated description of one form field.
///
/// Serializes as a flat object: the descriptor fields followed by any
/// caller metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor<'a> {
    /// Field name within the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub input: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,
    /// The schema node the field was generated from
    pub validator: &'a SchemaNode,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

/// Caller-supplied values merged onto a generated descriptor.
///
/// Set fields replace the generated ones; unrecognised keys are kept as
/// metadata, so a plain metadata object deserializes as an override too.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl FieldOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_input(mut self, input: InputKind) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_option_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option_items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(NumericRange { min, max });
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// Per-field overrides keyed by field name
pub type FormOverrides = HashMap<String, FieldOverride>;

/// Generated form: field name to descriptor, in declaration order
pub type Form<'a> = IndexMap<String, FieldDescriptor<'a>>;
