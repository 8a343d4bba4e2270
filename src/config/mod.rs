//! Generator and importer settings
//!
//! Settings are read from an optional file (TOML, JSON or YAML, chosen by
//! extension) and then from `SCHEMA_FORM__*` environment variables, e.g.
//! `SCHEMA_FORM__FORM__NUMERIC_RANGE=false`. Every field has a default, so an
//! empty or missing file yields [`Settings::default`].

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::form::FormGenerator;
use crate::schema::JsonSchemaImporter;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub import: ImportSettings,
}

/// Options for field classification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormSettings {
    /// Emit range inputs for numbers with finite inclusive bounds
    #[serde(default = "default_numeric_range")]
    pub numeric_range: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            numeric_range: default_numeric_range(),
        }
    }
}

fn default_numeric_range() -> bool {
    true
}

/// Options for JSON Schema import
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportSettings {
    /// Maximum nesting depth, counting `$ref` hops
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// String `format`s imported as date nodes
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            date_formats: default_date_formats(),
        }
    }
}

fn default_max_depth() -> usize {
    20
}

fn default_date_formats() -> Vec<String> {
    vec!["date".to_string(), "date-time".to_string()]
}

impl Settings {
    /// Load settings from `path` (if it exists) layered with the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix("SCHEMA_FORM").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        validator::SettingsValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    pub fn generator(&self) -> FormGenerator {
        FormGenerator::new(self.form.clone())
    }

    pub fn importer(&self) -> JsonSchemaImporter {
        JsonSchemaImporter::new(self.import.clone())
    }
}
