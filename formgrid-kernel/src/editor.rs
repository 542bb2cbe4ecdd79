//! Field property editor.
//!
//! The editor works on a private copy of one field. Nothing reaches the
//! builder's list until [`crate::SchemaBuilder::save_editor`] pushes the
//! whole change as a single patch.

use formgrid_api::{Field, FieldId, FieldOption, Width};

use crate::field::FieldPatch;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    original: Field,
    draft: Field,
}

impl FieldEditor {
    pub fn new(field: Field) -> Self {
        Self {
            draft: field.clone(),
            original: field,
        }
    }

    pub fn id(&self) -> &FieldId {
        &self.original.id
    }

    /// The edited copy.
    pub fn field(&self) -> &Field {
        &self.draft
    }

    pub fn original(&self) -> &Field {
        &self.original
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.draft.label = label.into();
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.draft.placeholder = placeholder.into();
    }

    pub fn set_helper_text(&mut self, helper_text: impl Into<String>) {
        self.draft.helper_text = helper_text.into();
    }

    pub fn set_width(&mut self, width: Width) {
        self.draft.width = width;
    }

    pub fn set_required(&mut self, required: bool) {
        self.draft.required = required;
    }

    pub fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) {
        self.draft.min = min;
        self.draft.max = max;
        self.draft.step = step;
    }

    /// Append a placeholder option (`option_{n}` / `Option {n}`). Returns its index.
    pub fn add_option(&mut self) -> usize {
        let n = self.draft.options.len() + 1;
        self.draft
            .options
            .push(FieldOption::new(format!("option_{}", n), format!("Option {}", n)));
        n - 1
    }

    /// Replace the option at `index`. Returns `false` if out of range.
    pub fn update_option(&mut self, index: usize, option: FieldOption) -> bool {
        match self.draft.options.get_mut(index) {
            Some(slot) => {
                *slot = option;
                true
            }
            None => false,
        }
    }

    /// Remove the option at `index`. Returns `false` if out of range.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if index < self.draft.options.len() {
            self.draft.options.remove(index);
            true
        } else {
            false
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Discard all edits.
    pub fn reset(&mut self) {
        self.draft = self.original.clone();
    }

    /// The accumulated edits as one patch.
    pub fn patch(&self) -> FieldPatch {
        FieldPatch::diff(&self.original, &self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::create_field;
    use formgrid_api::FieldType;

    #[test]
    fn edits_stay_on_the_copy() {
        let field = create_field(0, FieldType::Select);
        let mut editor = FieldEditor::new(field.clone());
        editor.set_label("Favourite color");
        editor.add_option();
        assert_eq!(editor.original(), &field);
        assert!(editor.is_dirty());
        assert_eq!(editor.field().options.len(), 1);
    }

    #[test]
    fn option_editing_by_index() {
        let mut editor = FieldEditor::new(create_field(0, FieldType::Multiple));
        assert_eq!(editor.add_option(), 0);
        assert_eq!(editor.add_option(), 1);
        assert_eq!(editor.field().options[1].value, "option_2");
        assert!(editor.update_option(0, FieldOption::new("red", "Red")));
        assert!(!editor.update_option(5, FieldOption::new("x", "X")));
        assert!(editor.remove_option(1));
        assert!(!editor.remove_option(1));
        assert_eq!(editor.field().options, vec![FieldOption::new("red", "Red")]);
    }

    #[test]
    fn patch_contains_only_changes() {
        let mut editor = FieldEditor::new(create_field(0, FieldType::Number));
        editor.set_bounds(Some(0.0), None, Some(1.0));
        let patch = editor.patch();
        assert_eq!(patch.min, Some(Some(0.0)));
        assert_eq!(patch.max, None);
        assert_eq!(patch.step, Some(Some(1.0)));
        assert_eq!(patch.label, None);
    }

    #[test]
    fn reset_discards_edits() {
        let mut editor = FieldEditor::new(create_field(0, FieldType::Text));
        editor.set_required(true);
        editor.reset();
        assert!(!editor.is_dirty());
        assert!(editor.patch().is_empty());
    }
}
