//! Formgrid Kernel - The form builder core.
//!
//! This crate contains the layout engine behind the visual form builder:
//! - Field creation and patching
//! - Row layout over the 4-section grid (and the schema/widths mapping)
//! - Grid section resolution for drop targeting
//! - The drag-and-drop state machine
//! - The schema builder that owns the field list, plus its field editor
//! - Schema validation before saving

pub mod builder;
pub mod drag;
pub mod editor;
pub mod field;
pub mod grid;
pub mod layout;
pub mod validate;

mod error;

pub use builder::SchemaBuilder;
pub use drag::{DragConfig, DragMachine, DragPhase, DragSession, DragSource, HoverEvent, Mutation};
pub use editor::FieldEditor;
pub use error::BuilderError;
pub use field::{create_field, FieldPatch};
pub use grid::SectionMap;
pub use layout::{
    derive_schema_with_widths, group_into_rows, parse_schema_with_widths, Row, RowEdge,
};
pub use validate::{validate, ValidationIssue};
