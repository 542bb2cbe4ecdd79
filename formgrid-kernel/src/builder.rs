//! The schema builder - owner of the authoritative field list.
//!
//! Every other component reads the list by reference and asks for changes
//! through the methods here: direct edits from the palette and editor, and
//! [`Mutation`]s produced by the drag state machine.

use formgrid_api::{Field, FieldId, FieldType, FormSchema, Point, Rect, SavedForm};

use crate::drag::{DragConfig, DragMachine, DragSource, HoverEvent, Mutation};
use crate::editor::FieldEditor;
use crate::error::BuilderError;
use crate::field::{create_field, FieldPatch};
use crate::layout::{self, Row};
use crate::validate::{validate, ValidationIssue};

pub type Result<T> = std::result::Result<T, BuilderError>;

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
    editor: Option<FieldEditor>,
    drag: DragMachine,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag_config(config: DragConfig) -> Self {
        Self {
            drag: DragMachine::with_config(config),
            ..Self::default()
        }
    }

    /// Open a previously saved form for editing.
    pub fn from_saved(saved: SavedForm) -> Self {
        let mut builder = Self::new();
        builder.import_schema(saved);
        builder
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        layout::position(&self.fields, id)
    }

    /// Current rows, derived fresh on every call.
    pub fn rows(&self) -> Vec<Row<'_>> {
        layout::group_into_rows(&self.fields)
    }

    fn require_position(&self, id: &FieldId) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| BuilderError::UnknownField(id.clone()))
    }

    // =========================================================================
    // Field list edits
    // =========================================================================

    /// Create a field of `field_type` at `insert_index` (default: end) with
    /// optional attribute overrides. Returns the new field's id.
    pub fn add_field(
        &mut self,
        field_type: FieldType,
        insert_index: Option<usize>,
        overrides: Option<FieldPatch>,
    ) -> FieldId {
        let mut field = create_field(self.fields.len(), field_type);
        if let Some(patch) = overrides {
            patch.apply_to(&mut field);
        }
        let id = field.id.clone();
        let index = insert_index
            .unwrap_or(self.fields.len())
            .min(self.fields.len());
        tracing::debug!(%id, %field_type, index, "Adding field");
        self.fields.insert(index, field);
        id
    }

    pub fn update_field(&mut self, id: &FieldId, patch: FieldPatch) -> Result<()> {
        let index = self.require_position(id)?;
        patch.apply_to(&mut self.fields[index]);
        Ok(())
    }

    /// Remove a field. Closes the editor if it was editing this field.
    pub fn delete_field(&mut self, id: &FieldId) -> Result<Field> {
        let index = self.require_position(id)?;
        if self.editor.as_ref().is_some_and(|e| e.id() == id) {
            self.editor = None;
        }
        tracing::debug!(%id, "Deleting field");
        Ok(self.fields.remove(index))
    }

    /// Move the field at `source` so it ends at `dest` (list-splice semantics).
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<()> {
        let len = self.fields.len();
        if dest >= len {
            return Err(BuilderError::IndexOutOfRange { index: dest, len });
        }
        let next = layout::move_field(&self.fields, source, dest)
            .ok_or(BuilderError::IndexOutOfRange { index: source, len })?;
        self.replace_fields(next);
        Ok(())
    }

    /// Swap in a whole new list at once. Used by compound drag mutations.
    pub fn replace_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
        let orphaned = self
            .editor
            .as_ref()
            .is_some_and(|e| layout::position(&self.fields, e.id()).is_none());
        if orphaned {
            self.editor = None;
        }
    }

    /// Clone a field under a fresh id, right after the original.
    pub fn duplicate_field(&mut self, id: &FieldId) -> Result<FieldId> {
        let index = self.require_position(id)?;
        let mut copy = self.fields[index].clone();
        copy.id = FieldId::generate();
        let new_id = copy.id.clone();
        self.fields.insert(index + 1, copy);
        Ok(new_id)
    }

    /// Change a field's type by replacing it with a new field at the same
    /// position. Shared display attributes carry over; type-specific ones
    /// (options, numeric bounds) do not.
    pub fn retype_field(&mut self, id: &FieldId, field_type: FieldType) -> Result<FieldId> {
        let index = self.require_position(id)?;
        let old = self.delete_field(id)?;
        let mut field = create_field(self.fields.len(), field_type);
        field.name = old.name;
        field.label = old.label;
        field.placeholder = old.placeholder;
        field.helper_text = old.helper_text;
        field.width = old.width;
        field.required = old.required;
        let new_id = field.id.clone();
        tracing::debug!(old = %id, new = %new_id, %field_type, "Retyped field");
        self.fields.insert(index, field);
        Ok(new_id)
    }

    /// Apply a drag mutation. Returns the id of a newly inserted field.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<FieldId>> {
        tracing::debug!(?mutation, "Applying mutation");
        match mutation {
            Mutation::Insert { field_type, index, width } => {
                let overrides = width.map(FieldPatch::width);
                Ok(Some(self.add_field(field_type, Some(index), overrides)))
            }
            Mutation::Resize { id, width } => {
                self.update_field(&id, FieldPatch::width(width))?;
                Ok(None)
            }
            Mutation::Move { id, to, width } => {
                let from = self.require_position(&id)?;
                let mut next = layout::move_field(&self.fields, from, to).ok_or(
                    BuilderError::IndexOutOfRange {
                        index: from,
                        len: self.fields.len(),
                    },
                )?;
                if let Some(width) = width {
                    let at = to.min(next.len() - 1);
                    next[at].width = width;
                }
                self.replace_fields(next);
                Ok(None)
            }
            Mutation::Swap { a, b } => {
                let ia = self.require_position(&a)?;
                let ib = self.require_position(&b)?;
                let len = self.fields.len();
                let next = layout::swap_fields(&self.fields, ia, ib)
                    .ok_or(BuilderError::IndexOutOfRange { index: ia.max(ib), len })?;
                self.replace_fields(next);
                Ok(None)
            }
            Mutation::MoveRow { from, to, edge } => {
                let rows = self.rows().len();
                let bad = if from >= rows { from } else { to };
                let next = layout::move_row(&self.fields, from, to, edge)
                    .ok_or(BuilderError::UnknownRow(bad))?;
                self.replace_fields(next);
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    pub fn drag(&self) -> &DragMachine {
        &self.drag
    }

    pub fn begin_drag(&mut self, source: DragSource) -> String {
        self.drag.begin(source)
    }

    pub fn drag_over(&mut self, hits: &[HoverEvent], pointer: Point, viewport: Rect) -> Option<f32> {
        self.drag.drag_over(hits, pointer, viewport, &self.fields)
    }

    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Resolve a drop and apply it. Returns the applied mutation, if any.
    pub fn drop_payload(&mut self, raw_payload: &str) -> Result<Option<Mutation>> {
        let Some(mutation) = self.drag.drop(raw_payload, &self.fields) else {
            return Ok(None);
        };
        self.apply(mutation.clone())?;
        Ok(Some(mutation))
    }

    // =========================================================================
    // Field editor
    // =========================================================================

    /// Start editing a field. Replaces any editor already open.
    pub fn open_editor(&mut self, id: &FieldId) -> Result<&mut FieldEditor> {
        let index = self.require_position(id)?;
        let editor = FieldEditor::new(self.fields[index].clone());
        Ok(self.editor.insert(editor))
    }

    pub fn editor(&self) -> Option<&FieldEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut FieldEditor> {
        self.editor.as_mut()
    }

    /// Push the editor's copy back as one update and close the editor.
    pub fn save_editor(&mut self) -> Result<()> {
        let editor = self.editor.take().ok_or(BuilderError::NoEditor)?;
        let patch = editor.patch();
        if patch.is_empty() {
            return Ok(());
        }
        self.update_field(editor.id(), patch)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    // =========================================================================
    // Import / export
    // =========================================================================

    pub fn export_schema(&self) -> FormSchema {
        layout::derive_schema_with_widths(&self.fields)
    }

    pub fn import_schema(&mut self, saved: SavedForm) {
        let fields = layout::parse_schema_with_widths(saved);
        tracing::info!("Imported schema with {} fields", fields.len());
        let unknown = fields.iter().filter(|f| f.field_type == FieldType::Unknown).count();
        if unknown > 0 {
            tracing::warn!(unknown, "Schema contains fields of unrecognised type; they lay out as plain inputs");
        }
        self.editor = None;
        self.drag.cancel();
        self.fields = fields;
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate(&self.fields)
    }

    /// Export unless a blocking issue remains. Non-blocking issues are
    /// logged and do not stop the export.
    pub fn finalize(&self) -> Result<FormSchema> {
        let (blocking, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ValidationIssue::is_blocking);
        for issue in &warnings {
            tracing::warn!("{}", issue);
        }
        if !blocking.is_empty() {
            return Err(BuilderError::Invalid(blocking));
        }
        Ok(self.export_schema())
    }
}
