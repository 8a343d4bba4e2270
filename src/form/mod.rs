//! Schema-Driven Form Generation
//!
//! Turns record schemas into field descriptors for a form renderer:
//! - Classifier: semantic type and input widget per schema node
//! - Generator: one descriptor per record field, with caller overrides merged in

pub mod classifier;
pub mod generator;
pub mod types;

pub use classifier::{classify, classify_with, strip_wrappers};
pub use generator::{generate_form, generate_form_field, unwrap_record, FormGenerator};
pub use types::*;
