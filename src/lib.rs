//! # schema-form
//!
//! Generates form-field descriptors from record schemas. Each field of a
//! record gets a semantic type, an input-widget hint and structured hints
//! (select options, numeric ranges) that a UI form renderer can use directly.
//!
//! ## Features
//!
//! - **Typed schema model**: closed [`SchemaNode`] enum with a builder API
//! - **Transparent wrappers**: optional, nullable and defaulted fields classify as their inner type
//! - **Overrides**: per-field overrides and metadata merged onto generated descriptors
//! - **JSON Schema import**: including schemas derived with `schemars`
//! - **Configuration**: file and environment settings via the `config` crate
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_form::{generate_form, FieldType, InputKind, ObjectSchema, SchemaNode};
//!
//! let schema = ObjectSchema::new()
//!     .field("name", SchemaNode::string())
//!     .field("status", SchemaNode::enumeration(["Active", "Inactive"]))
//!     .field("score", SchemaNode::number().min(0.0).max(10.0).optional())
//!     .refine();
//!
//! let form = generate_form(&schema, None);
//!
//! assert_eq!(form["name"].input, InputKind::Input);
//! assert_eq!(form["status"].input, InputKind::Select);
//! assert_eq!(form["score"].field_type, FieldType::Number);
//! assert_eq!(form["score"].input, InputKind::Range);
//! ```
//!
//! ## Architecture
//!
//! - **schema**: record schema model and JSON Schema import
//! - **form**: classification and form generation
//! - **config**: settings for both

pub mod config;
pub mod form;
pub mod schema;

pub use config::{FormSettings, ImportSettings, Settings};
pub use form::{
    classify, generate_form, generate_form_field, strip_wrappers, unwrap_record, Classification,
    FieldDescriptor, FieldOverride, FieldType, Form, FormGenerator, FormOverrides, InputKind,
    NumericRange,
};
pub use schema::{
    record_for, Bound, Effect, JsonSchemaImporter, NumberSchema, ObjectSchema, RecordSchema,
    SchemaError, SchemaNode, SchemaResult,
};
