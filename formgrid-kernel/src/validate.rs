//! Checks run before a schema is saved.

use std::collections::HashMap;

use formgrid_api::{Field, FieldId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("field {id} has no name")]
    MissingName { id: FieldId },

    #[error("name {name:?} is used by {} fields", .ids.len())]
    DuplicateName { name: String, ids: Vec<FieldId> },

    #[error("field {id} offers no options")]
    MissingOptions { id: FieldId },

    #[error("field {id} has min {min} greater than max {max}")]
    InvertedBounds { id: FieldId, min: f64, max: f64 },

    #[error("field {id} has non-positive step {step}")]
    InvalidStep { id: FieldId, step: f64 },
}

impl ValidationIssue {
    /// Whether this issue stops a schema from being finalized. Only an
    /// unnamed value-producing field does; everything else is a warning.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::MissingName { .. })
    }
}

/// Every problem worth reporting about a schema, blocking or not.
/// Titles and spacers produce no value and are exempt from name checks.
pub fn validate(fields: &[Field]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut by_name: HashMap<&str, Vec<FieldId>> = HashMap::new();
    let mut name_order: Vec<&str> = Vec::new();

    for field in fields {
        let kind = field.field_type;

        if kind.is_input() {
            let name = field.name.trim();
            if name.is_empty() {
                issues.push(ValidationIssue::MissingName { id: field.id.clone() });
            } else {
                let ids = by_name.entry(name).or_default();
                if ids.is_empty() {
                    name_order.push(name);
                }
                ids.push(field.id.clone());
            }
        }

        if kind.has_options() && field.options.is_empty() {
            issues.push(ValidationIssue::MissingOptions { id: field.id.clone() });
        }

        if let (Some(min), Some(max)) = (field.min, field.max) {
            if min > max {
                issues.push(ValidationIssue::InvertedBounds {
                    id: field.id.clone(),
                    min,
                    max,
                });
            }
        }

        if let Some(step) = field.step {
            if step <= 0.0 {
                issues.push(ValidationIssue::InvalidStep { id: field.id.clone(), step });
            }
        }
    }

    for name in name_order {
        if let Some(ids) = by_name.remove(name) {
            if ids.len() > 1 {
                issues.push(ValidationIssue::DuplicateName {
                    name: name.to_string(),
                    ids,
                });
            }
        }
    }

    issues
}
