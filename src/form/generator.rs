//! Form generation from record schemas

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use super::classifier::classify_with;
use super::types::{
    Classification, FieldDescriptor, FieldOverride, FieldType, Form, FormOverrides, InputKind,
    NumericRange,
};
use crate::config::FormSettings;
use crate::schema::{ObjectSchema, RecordSchema, SchemaNode};

/// Builds field descriptors with a fixed set of [`FormSettings`].
#[derive(Clone, Debug, Default)]
pub struct FormGenerator {
    settings: FormSettings,
}

impl FormGenerator {
    pub fn new(settings: FormSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn classify(&self, node: &SchemaNode) -> Classification {
        classify_with(node, &self.settings)
    }

    /// Descriptor for a single node, without an accessor.
    pub fn generate_field<'a>(
        &self,
        node: &'a SchemaNode,
        overrides: Option<&FieldOverride>,
    ) -> FieldDescriptor<'a> {
        let class = self.classify(node);
        let descriptor = FieldDescriptor {
            accessor: None,
            field_type: class.field_type,
            input: class.input,
            option_items: class.option_items,
            range: class.range,
            validator: node,
            meta: Default::default(),
        };

        match overrides {
            Some(overrides) => merge_override(descriptor, overrides),
            None => descriptor,
        }
    }

    /// One descriptor per declared field, in declaration order.
    ///
    /// Override entries whose key names no field are ignored.
    pub fn generate<'a>(
        &self,
        schema: &'a RecordSchema,
        overrides: Option<&FormOverrides>,
    ) -> Form<'a> {
        let object = unwrap_record(schema);
        debug!(
            fields = object.len(),
            effect = ?schema.effect(),
            "generating form"
        );

        if let Some(overrides) = overrides {
            for key in overrides.keys().filter(|k| object.get(k).is_none()) {
                debug!(field = %key, "override for unknown field ignored");
            }
        }

        object
            .iter()
            .map(|(name, node)| {
                let field_override = overrides.and_then(|o| o.get(name));
                let mut descriptor = self.generate_field(node, None);
                descriptor.accessor = Some(name.clone());
                if let Some(field_override) = field_override {
                    descriptor = merge_override(descriptor, field_override);
                }

                trace!(
                    field = %name,
                    field_type = %descriptor.field_type,
                    input = %descriptor.input,
                    overridden = field_override.is_some(),
                    "generated field"
                );
                (name.clone(), descriptor)
            })
            .collect()
    }
}

/// The object schema beneath at most one refinement/transform layer.
pub fn unwrap_record(schema: &RecordSchema) -> &ObjectSchema {
    schema.object()
}

/// [`FormGenerator::generate_field`] with default settings.
pub fn generate_form_field<'a>(
    node: &'a SchemaNode,
    overrides: Option<&FieldOverride>,
) -> FieldDescriptor<'a> {
    FormGenerator::default().generate_field(node, overrides)
}

/// [`FormGenerator::generate`] with default settings.
pub fn generate_form<'a>(schema: &'a RecordSchema, overrides: Option<&FormOverrides>) -> Form<'a> {
    FormGenerator::default().generate(schema, overrides)
}

/// Shallow merge: every field set in `overrides` replaces the generated one
/// and its metadata keys are added on top.
///
/// Metadata keys naming a descriptor field are routed to that field, so they
/// never appear twice in the serialized descriptor. `validator` and values
/// that do not parse are dropped.
fn merge_override<'a>(
    mut descriptor: FieldDescriptor<'a>,
    overrides: &FieldOverride,
) -> FieldDescriptor<'a> {
    for (key, value) in &overrides.meta {
        match key.as_str() {
            "accessor" => {
                if let Some(accessor) = reserved_value::<String>(key, value) {
                    descriptor.accessor = Some(accessor);
                }
            }
            "type" => {
                if let Some(field_type) = reserved_value::<FieldType>(key, value) {
                    descriptor.field_type = field_type;
                }
            }
            "input" => {
                if let Some(input) = reserved_value::<InputKind>(key, value) {
                    descriptor.input = input;
                }
            }
            "optionItems" => {
                if let Some(option_items) = reserved_value::<Vec<String>>(key, value) {
                    descriptor.option_items = Some(option_items);
                }
            }
            "range" => {
                if let Some(range) = reserved_value::<NumericRange>(key, value) {
                    descriptor.range = Some(range);
                }
            }
            "validator" => debug!(key = %key, "validator cannot be overridden; dropped"),
            _ => {
                descriptor.meta.insert(key.clone(), value.clone());
            }
        }
    }

    // Typed override fields take precedence over metadata with the same name
    if let Some(accessor) = &overrides.accessor {
        descriptor.accessor = Some(accessor.clone());
    }
    if let Some(field_type) = overrides.field_type {
        descriptor.field_type = field_type;
    }
    if let Some(input) = overrides.input {
        descriptor.input = input;
    }
    if let Some(option_items) = &overrides.option_items {
        descriptor.option_items = Some(option_items.clone());
    }
    if let Some(range) = overrides.range {
        descriptor.range = Some(range);
    }

    descriptor
}

fn reserved_value<T: DeserializeOwned>(key: &str, value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(key, error = %err, "unparsable override value dropped");
            None
        }
    }
}
