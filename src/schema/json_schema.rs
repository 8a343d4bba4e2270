//! JSON Schema import with $ref support
//!
//! Converts JSON Schema documents (including the ones `schemars` derives for
//! Rust types) into [`RecordSchema`] / [`SchemaNode`] trees.
//!
//! Properties that are not listed in `required` become `Optional`, a
//! `default` keyword becomes `Default`, and `null` in a type list or union
//! becomes `Nullable`. Anything the model has no variant for imports as
//! `Any`, as does the recursive occurrence of a self-referencing definition.

use schemars::JsonSchema;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use super::error::{SchemaError, SchemaResult};
use super::{Bound, NumberSchema, ObjectSchema, RecordSchema, SchemaNode};
use crate::config::ImportSettings;

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const DEFS_PREFIX: &str = "#/$defs/";

// ============================================================================
// Resolution Context
// ============================================================================

/// Definitions available to one import, plus the refs currently being expanded
struct ResolutionContext<'s> {
    definitions: HashMap<String, &'s Value>,
    visited_refs: HashSet<String>,
}

impl<'s> ResolutionContext<'s> {
    fn from_schema(schema: &'s Value) -> Self {
        let mut definitions = HashMap::new();

        for (key, prefix) in [("definitions", DEFINITIONS_PREFIX), ("$defs", DEFS_PREFIX)] {
            if let Some(defs) = schema.get(key).and_then(Value::as_object) {
                for (name, def) in defs {
                    definitions.insert(format!("{}{}", prefix, name), def);
                }
            }
        }

        Self {
            definitions,
            visited_refs: HashSet::new(),
        }
    }

    /// Returns false when the ref is already being expanded
    fn enter_ref(&mut self, ref_path: &str) -> bool {
        self.visited_refs.insert(ref_path.to_string())
    }

    fn exit_ref(&mut self, ref_path: &str) {
        self.visited_refs.remove(ref_path);
    }
}

// ============================================================================
// Importer
// ============================================================================

/// Imports JSON Schema documents into the schema model
#[derive(Clone, Debug, Default)]
pub struct JsonSchemaImporter {
    settings: ImportSettings,
}

impl JsonSchemaImporter {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Import a document whose root describes an object.
    pub fn import_record(&self, schema: &Value) -> SchemaResult<RecordSchema> {
        let mut ctx = ResolutionContext::from_schema(schema);
        debug!(
            definitions = ctx.definitions.len(),
            "importing record schema"
        );

        match self.resolve(schema, &mut ctx, 0)? {
            SchemaNode::Object(object) => Ok(RecordSchema::Object(object)),
            other => Err(SchemaError::NotAnObject(other.kind().to_string())),
        }
    }

    /// Import a single schema node. `$ref`s resolve against the definitions
    /// of `schema` itself.
    pub fn import_node(&self, schema: &Value) -> SchemaResult<SchemaNode> {
        let mut ctx = ResolutionContext::from_schema(schema);
        self.resolve(schema, &mut ctx, 0)
    }

    /// Import the `schemars` schema of a Rust type.
    pub fn import_type<T: JsonSchema>(&self) -> SchemaResult<RecordSchema> {
        let root = schemars::schema_for!(T);
        let value = serde_json::to_value(&root)?;
        self.import_record(&value)
    }

    fn resolve(
        &self,
        schema: &Value,
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<SchemaNode> {
        if depth > self.settings.max_depth {
            return Err(SchemaError::MaxDepthExceeded(self.settings.max_depth));
        }

        let node = self.resolve_base(schema, ctx, depth)?;

        Ok(match schema.get("default") {
            Some(default) => node.with_default(default.clone()),
            None => node,
        })
    }

    fn resolve_base(
        &self,
        schema: &Value,
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<SchemaNode> {
        // `true` / `false` schemas accept anything / nothing
        let Some(obj) = schema.as_object() else {
            return Ok(SchemaNode::Any);
        };

        if let Some(ref_path) = obj.get("$ref").and_then(Value::as_str) {
            return self.resolve_ref(ref_path, ctx, depth);
        }

        // schemars wraps annotated refs in a single-element allOf
        if let Some(all_of) = obj.get("allOf").and_then(Value::as_array) {
            return match all_of.as_slice() {
                [single] => self.resolve(single, ctx, depth + 1),
                _ => Ok(SchemaNode::Any),
            };
        }

        for key in ["anyOf", "oneOf"] {
            if let Some(variants) = obj.get(key).and_then(Value::as_array) {
                return self.resolve_union(variants, ctx, depth);
            }
        }

        if let Some(value) = obj.get("const") {
            return Ok(SchemaNode::literal(value.clone()));
        }

        if let Some(values) = obj.get("enum").and_then(Value::as_array) {
            return Ok(resolve_enum(values));
        }

        match obj.get("type") {
            Some(Value::String(type_str)) => self.resolve_type(type_str, obj, ctx, depth),
            Some(Value::Array(types)) => {
                let non_null: Vec<&str> = types
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|t| *t != "null")
                    .collect();
                let nullable = non_null.len() < types.len();

                match non_null.as_slice() {
                    [single] => {
                        let node = self.resolve_type(single, obj, ctx, depth)?;
                        Ok(if nullable { node.nullable() } else { node })
                    }
                    _ => Ok(SchemaNode::Any),
                }
            }
            _ if obj.contains_key("properties") => {
                Ok(SchemaNode::Object(self.resolve_object(obj, ctx, depth)?))
            }
            _ => Ok(SchemaNode::Any),
        }
    }

    fn resolve_ref(
        &self,
        ref_path: &str,
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<SchemaNode> {
        if !ref_path.starts_with(DEFINITIONS_PREFIX) && !ref_path.starts_with(DEFS_PREFIX) {
            return Err(SchemaError::UnresolvedRef(ref_path.to_string()));
        }

        let definition = *ctx
            .definitions
            .get(ref_path)
            .ok_or_else(|| SchemaError::DefinitionNotFound(ref_path.to_string()))?;

        // A recursive ref has no finite shape; the inner occurrence is unconstrained
        if !ctx.enter_ref(ref_path) {
            debug!(ref_path, "circular reference imported as any");
            return Ok(SchemaNode::Any);
        }

        trace!(ref_path, "resolving definition");
        let result = self.resolve(definition, ctx, depth + 1);
        ctx.exit_ref(ref_path);
        result
    }

    /// A union of exactly one schema and `null` is a nullable node; any other
    /// union has no single shape.
    fn resolve_union(
        &self,
        variants: &[Value],
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<SchemaNode> {
        let (nulls, non_null): (Vec<&Value>, Vec<&Value>) =
            variants.iter().partition(|v| is_null_schema(v));

        match non_null.as_slice() {
            [single] => {
                let node = self.resolve(single, ctx, depth + 1)?;
                Ok(if nulls.is_empty() { node } else { node.nullable() })
            }
            _ => Ok(SchemaNode::Any),
        }
    }

    fn resolve_type(
        &self,
        type_str: &str,
        obj: &Map<String, Value>,
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<SchemaNode> {
        Ok(match type_str {
            "string" => {
                let format = obj.get("format").and_then(Value::as_str);
                match format {
                    Some(f) if self.settings.date_formats.iter().any(|d| d == f) => SchemaNode::Date,
                    _ => SchemaNode::String,
                }
            }
            "integer" | "number" => SchemaNode::Number(number_schema(obj)),
            "boolean" => SchemaNode::Boolean,
            "array" => {
                let element = match obj.get("items") {
                    Some(items) if items.is_object() => self.resolve(items, ctx, depth + 1)?,
                    _ => SchemaNode::Any,
                };
                SchemaNode::array(element)
            }
            "object" => SchemaNode::Object(self.resolve_object(obj, ctx, depth)?),
            "null" => SchemaNode::literal(Value::Null),
            _ => SchemaNode::Any,
        })
    }

    fn resolve_object(
        &self,
        obj: &Map<String, Value>,
        ctx: &mut ResolutionContext<'_>,
        depth: usize,
    ) -> SchemaResult<ObjectSchema> {
        let required: HashSet<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut object = ObjectSchema::new();
        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            for (name, prop_schema) in props {
                let node = self.resolve(prop_schema, ctx, depth + 1)?;
                let node = if required.contains(name.as_str()) {
                    node
                } else {
                    node.optional()
                };
                object.insert(name.clone(), node);
            }
        }

        Ok(object)
    }
}

/// Import the `schemars` schema of `T` with default settings.
pub fn record_for<T: JsonSchema>() -> SchemaResult<RecordSchema> {
    JsonSchemaImporter::default().import_type::<T>()
}

// ============================================================================
// Helpers
// ============================================================================

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

/// String enums become `Enum`; a `null` member makes it nullable.
fn resolve_enum(values: &[Value]) -> SchemaNode {
    let nullable = values.iter().any(Value::is_null);
    let options: Option<Vec<String>> = values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.as_str().map(String::from))
        .collect();

    match options {
        Some(options) => {
            let node = SchemaNode::Enum { options };
            if nullable {
                node.nullable()
            } else {
                node
            }
        }
        None => SchemaNode::Any,
    }
}

fn number_schema(obj: &Map<String, Value>) -> NumberSchema {
    NumberSchema {
        min: bound(obj, "minimum", "exclusiveMinimum"),
        max: bound(obj, "maximum", "exclusiveMaximum"),
    }
}

/// Handles both the numeric (draft 6+) and boolean (draft 4) exclusive forms
fn bound(obj: &Map<String, Value>, inclusive_key: &str, exclusive_key: &str) -> Option<Bound> {
    let inclusive = obj.get(inclusive_key).and_then(Value::as_f64);

    match obj.get(exclusive_key) {
        Some(Value::Number(n)) => n.as_f64().map(Bound::exclusive),
        Some(Value::Bool(true)) => inclusive.map(Bound::exclusive),
        _ => inclusive.map(Bound::inclusive),
    }
}
