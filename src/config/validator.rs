use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if settings.import.max_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "import.max_depth".to_string(),
                reason: "Depth must be greater than 0".to_string(),
            });
        }

        for (idx, format) in settings.import.date_formats.iter().enumerate() {
            if format.trim().is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("import.date_formats[{}]", idx),
                    reason: "Format must not be empty".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
