//! JSON-Schema safety net
//!
//! Validation is advisory: a schema that is missing, unreadable or does not
//! compile disables validation instead of failing. Candidate documents, on
//! the other hand, are read through [`read_document`], which fails hard.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value ("" for the document root)
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "Validation error at {}: {}", path, self.message)
    }
}

/// Draft 7 validator; `None` inside means validation is switched off
pub struct SchemaValidator {
    validator: Option<jsonschema::Validator>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::disabled()
    }
}

impl SchemaValidator {
    /// A validator that accepts everything
    pub fn disabled() -> Self {
        Self { validator: None }
    }

    /// Compile a schema; a schema that does not compile disables validation
    pub fn from_value(schema: &Value) -> Self {
        match jsonschema::draft7::new(schema) {
            Ok(validator) => Self {
                validator: Some(validator),
            },
            Err(err) => {
                log::warn!("Schema does not compile, validation disabled: {}", err);
                Self::disabled()
            }
        }
    }

    /// Load and compile a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("Schema file not found at {}", path.display());
                return Self::disabled();
            }
            Err(err) => {
                log::warn!("Error loading schema {}: {}", path.display(), err);
                return Self::disabled();
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(schema) => Self::from_value(&schema),
            Err(err) => {
                log::warn!("Error loading schema {}: {}", path.display(), err);
                Self::disabled()
            }
        }
    }

    /// Optional schema path, as found in config
    pub fn from_optional_file(path: Option<&Path>) -> Self {
        path.map(Self::from_file).unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.validator.is_some()
    }

    /// Every violation in document order; empty means valid
    pub fn validate(&self, document: &Value) -> Vec<SchemaViolation> {
        let Some(validator) = &self.validator else {
            return Vec::new();
        };
        validator
            .iter_errors(document)
            .map(|err| SchemaViolation {
                path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect()
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.validate(document).is_empty()
    }
}

/// Read a candidate document, failing loudly if it is absent or not JSON
pub fn read_document(path: &Path) -> Result<Value, PipelineError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PipelineError::DataNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(PipelineError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text).map_err(|err| PipelineError::malformed(path, &err))
}
