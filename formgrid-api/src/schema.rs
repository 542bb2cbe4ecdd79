//! Export/import units for a complete form definition.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{Field, Width};

/// File name used when a schema is downloaded.
pub const SCHEMA_FILE_NAME: &str = "form-schema.json";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema json: {0}")]
    Json(#[from] serde_json::Error),
}

/// The exported form: flat field list plus the row-grouped width table.
///
/// `widths` flattened is parallel to `schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub schema: Vec<Field>,
    pub widths: Vec<Vec<Width>>,
}

impl FormSchema {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty JSON with 2-space indentation, as written to [`SCHEMA_FILE_NAME`].
    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn row_count(&self) -> usize {
        self.widths.len()
    }
}

/// A previously saved form handed to the builder for editing.
///
/// The width table is kept as raw JSON: a malformed table must not prevent
/// the fields themselves from loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SavedForm {
    Structured {
        schema: Vec<Field>,
        #[serde(default)]
        widths: JsonValue,
    },
    Flat(Vec<Field>),
}

impl SavedForm {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split into the field list and the raw width table (`Null` if absent).
    pub fn into_parts(self) -> (Vec<Field>, JsonValue) {
        match self {
            Self::Structured { schema, widths } => (schema, widths),
            Self::Flat(schema) => (schema, JsonValue::Null),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Structured { schema, .. } => schema.len(),
            Self::Flat(schema) => schema.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<FormSchema> for SavedForm {
    fn from(form: FormSchema) -> Self {
        let widths = form
            .widths
            .iter()
            .map(|row| {
                JsonValue::Array(
                    row.iter()
                        .map(|w| JsonValue::String(w.as_str().to_string()))
                        .collect(),
                )
            })
            .collect();
        Self::Structured {
            schema: form.schema,
            widths: JsonValue::Array(widths),
        }
    }
}

impl From<Vec<Field>> for SavedForm {
    fn from(fields: Vec<Field>) -> Self {
        Self::Flat(fields)
    }
}
