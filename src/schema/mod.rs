//! Record schema model
//!
//! A closed description of record shapes, built either in code with the
//! builder methods on [`SchemaNode`] and [`ObjectSchema`] or imported from a
//! JSON Schema document through [`json_schema`].
//!
//! ```
//! use schema_form::schema::{ObjectSchema, SchemaNode};
//!
//! let record = ObjectSchema::new()
//!     .field("name", SchemaNode::string())
//!     .field("age", SchemaNode::number().min(0.0).max(130.0).optional())
//!     .refine();
//!
//! assert_eq!(record.object().len(), 2);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
pub mod json_schema;

pub use error::{SchemaError, SchemaResult};
pub use json_schema::{record_for, JsonSchemaImporter};

// ============================================================================
// Numeric Constraints
// ============================================================================

/// One end of a numeric constraint
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub value: f64,
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl Bound {
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Constraints carried by a number node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Bound>,
}

impl NumberSchema {
    /// Returns `(min, max)` when both ends are finite and inclusive.
    pub fn inclusive_range(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max))
                if min.inclusive
                    && max.inclusive
                    && min.value.is_finite()
                    && max.value.is_finite() =>
            {
                Some((min.value, max.value))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Schema Node
// ============================================================================

/// A single schema constraint.
///
/// `Optional`, `Nullable` and `Default` are wrapper variants: they decorate
/// an inner node without changing the shape of the value it describes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaNode {
    String,
    Number(NumberSchema),
    Boolean,
    Date,
    Enum {
        options: Vec<String>,
    },
    Array {
        element: Box<SchemaNode>,
    },
    Literal {
        value: Value,
    },
    /// Nested record
    Object(ObjectSchema),
    /// Unconstrained value
    Any,
    Optional {
        inner: Box<SchemaNode>,
    },
    Nullable {
        inner: Box<SchemaNode>,
    },
    Default {
        inner: Box<SchemaNode>,
        value: Value,
    },
}

impl SchemaNode {
    pub fn string() -> Self {
        SchemaNode::String
    }

    pub fn number() -> Self {
        SchemaNode::Number(NumberSchema::default())
    }

    pub fn boolean() -> Self {
        SchemaNode::Boolean
    }

    pub fn date() -> Self {
        SchemaNode::Date
    }

    pub fn any() -> Self {
        SchemaNode::Any
    }

    /// Enumeration of string options, kept in the given order
    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaNode::Enum {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array {
            element: Box::new(element),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        SchemaNode::Literal {
            value: value.into(),
        }
    }

    pub fn object(schema: ObjectSchema) -> Self {
        SchemaNode::Object(schema)
    }

    pub fn optional(self) -> Self {
        SchemaNode::Optional {
            inner: Box::new(self),
        }
    }

    pub fn nullable(self) -> Self {
        SchemaNode::Nullable {
            inner: Box::new(self),
        }
    }

    pub fn with_default(self, value: impl Into<Value>) -> Self {
        SchemaNode::Default {
            inner: Box::new(self),
            value: value.into(),
        }
    }

    /// Inclusive lower bound. Has no effect on non-number nodes.
    pub fn min(self, value: f64) -> Self {
        self.map_number(|n| n.min = Some(Bound::inclusive(value)))
    }

    /// Inclusive upper bound. Has no effect on non-number nodes.
    pub fn max(self, value: f64) -> Self {
        self.map_number(|n| n.max = Some(Bound::inclusive(value)))
    }

    /// Exclusive lower bound. Has no effect on non-number nodes.
    pub fn gt(self, value: f64) -> Self {
        self.map_number(|n| n.min = Some(Bound::exclusive(value)))
    }

    /// Exclusive upper bound. Has no effect on non-number nodes.
    pub fn lt(self, value: f64) -> Self {
        self.map_number(|n| n.max = Some(Bound::exclusive(value)))
    }

    fn map_number(mut self, f: impl FnOnce(&mut NumberSchema)) -> Self {
        if let SchemaNode::Number(number) = &mut self {
            f(number);
        }
        self
    }

    /// The decorated node, if this is a wrapper variant
    pub fn wrapped(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Optional { inner }
            | SchemaNode::Nullable { inner }
            | SchemaNode::Default { inner, .. } => Some(inner),
            _ => None,
        }
    }

    pub fn is_wrapper(&self) -> bool {
        self.wrapped().is_some()
    }

    /// Get the variant name as a string
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Number(_) => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Date => "date",
            SchemaNode::Enum { .. } => "enum",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Literal { .. } => "literal",
            SchemaNode::Object(_) => "object",
            SchemaNode::Any => "any",
            SchemaNode::Optional { .. } => "optional",
            SchemaNode::Nullable { .. } => "nullable",
            SchemaNode::Default { .. } => "default",
        }
    }
}

// ============================================================================
// Object / Record Schemas
// ============================================================================

/// Named fields in declaration order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub fields: IndexMap<String, SchemaNode>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Redeclaring a name replaces its node but keeps the
    /// original position.
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.insert(name, node);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        self.fields.insert(name.into(), node);
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.fields.iter()
    }

    /// Wrap in a refinement pipeline
    pub fn refine(self) -> RecordSchema {
        RecordSchema::Effects {
            effect: Effect::Refinement,
            schema: self,
        }
    }

    /// Wrap in a transform pipeline
    pub fn transform(self) -> RecordSchema {
        RecordSchema::Effects {
            effect: Effect::Transform,
            schema: self,
        }
    }

    pub fn into_record(self) -> RecordSchema {
        RecordSchema::Object(self)
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaNode)> for ObjectSchema {
    fn from_iter<T: IntoIterator<Item = (K, SchemaNode)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Post-processing step attached to an object schema
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    Refinement,
    Transform,
}

/// Top-level input of form generation: an object schema, or a single
/// refinement/transform pipeline around one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordSchema {
    Object(ObjectSchema),
    Effects { effect: Effect, schema: ObjectSchema },
}

impl RecordSchema {
    /// The object schema underneath at most one pipeline layer
    pub fn object(&self) -> &ObjectSchema {
        match self {
            RecordSchema::Object(schema) => schema,
            RecordSchema::Effects { schema, .. } => schema,
        }
    }

    pub fn effect(&self) -> Option<Effect> {
        match self {
            RecordSchema::Object(_) => None,
            RecordSchema::Effects { effect, .. } => Some(*effect),
        }
    }
}

impl From<ObjectSchema> for RecordSchema {
    fn from(schema: ObjectSchema) -> Self {
        RecordSchema::Object(schema)
    }
}
