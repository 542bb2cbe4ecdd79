//! Field creation and partial updates.
//!
//! Normalization of partially specified fields lives on
//! [`formgrid_api::FieldDraft::normalize`]; this module covers what the
//! builder does to fields it owns.

use formgrid_api::{Field, FieldId, FieldOption, FieldType, Width};

/// Create a fresh field of `field_type` for a list that already holds
/// `existing_count` fields.
///
/// Name and label default to `field_{n}`, `title_{n}` or `spacer_{n}` with
/// `n = existing_count + 1`.
pub fn create_field(existing_count: usize, field_type: FieldType) -> Field {
    let key = default_key(existing_count, field_type);
    Field {
        id: FieldId::generate(),
        field_type,
        name: key.clone(),
        label: key,
        placeholder: String::new(),
        helper_text: String::new(),
        width: field_type.default_width(),
        required: false,
        options: Vec::new(),
        min: None,
        max: None,
        step: None,
    }
}

fn default_key(existing_count: usize, field_type: FieldType) -> String {
    let prefix = match field_type {
        FieldType::Spacer => "spacer",
        FieldType::Title => "title",
        _ => "field",
    };
    format!("{}_{}", prefix, existing_count + 1)
}

/// A partial update to a field. `None` leaves the attribute untouched.
///
/// Neither `id` nor `type` can be patched: a type change is a
/// delete-and-recreate (see [`crate::SchemaBuilder::retype_field`]).
/// The numeric bounds are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub width: Option<Width>,
    pub required: Option<bool>,
    pub options: Option<Vec<FieldOption>>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub step: Option<Option<f64>>,
}

impl FieldPatch {
    pub fn width(width: Width) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Patch that turns `from` into `to`, attribute by attribute.
    pub fn diff(from: &Field, to: &Field) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }
        Self {
            name: changed(&from.name, &to.name),
            label: changed(&from.label, &to.label),
            placeholder: changed(&from.placeholder, &to.placeholder),
            helper_text: changed(&from.helper_text, &to.helper_text),
            width: changed(&from.width, &to.width),
            required: changed(&from.required, &to.required),
            options: changed(&from.options, &to.options),
            min: changed(&from.min, &to.min),
            max: changed(&from.max, &to.max),
            step: changed(&from.step, &to.step),
        }
    }

    pub fn apply_to(self, field: &mut Field) {
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(helper_text) = self.helper_text {
            field.helper_text = helper_text;
        }
        if let Some(width) = self.width {
            field.width = width;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = self.options {
            field.options = options;
        }
        if let Some(min) = self.min {
            field.min = min;
        }
        if let Some(max) = self.max {
            field.max = max;
        }
        if let Some(step) = self.step {
            field.step = step;
        }
    }
}
