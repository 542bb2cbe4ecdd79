//! Builder error types.

use formgrid_api::FieldId;
use thiserror::Error;

use crate::validate::ValidationIssue;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("unknown field: {0}")]
    UnknownField(FieldId),

    #[error("index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown row: {0}")]
    UnknownRow(usize),

    #[error("no field is being edited")]
    NoEditor,

    #[error("schema has {} validation issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),
}
