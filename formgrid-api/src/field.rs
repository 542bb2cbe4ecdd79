//! Field representation - one configurable unit of a form.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// Number of equal sections in one grid row.
pub const GRID_SECTIONS: u8 = 4;

/// Unique identifier for a field. Stable across reorders, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "String")]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Saved forms may carry numeric ids (timestamps); both spellings are
/// accepted. Anything else cannot name a field and gets a fresh id.
impl From<JsonValue> for FieldId {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => Self(s),
            JsonValue::Number(n) => Self(n.to_string()),
            _ => Self::generate(),
        }
    }
}

/// The kind of a field.
///
/// Decoding never fails: a type written by a newer editor (or a value that
/// is not a string at all) becomes [`FieldType::Unknown`], which lays out
/// like a plain input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "&'static str")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Multiple,
    Title,
    Spacer,
    Unknown,
}

impl FieldType {
    /// Lenient parse; unrecognised names become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "date" => Self::Date,
            "select" => Self::Select,
            "multiple" => Self::Multiple,
            "title" => Self::Title,
            "spacer" => Self::Spacer,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Multiple => "multiple",
            Self::Title => "title",
            Self::Spacer => "spacer",
            Self::Unknown => "unknown",
        }
    }

    /// Width a freshly created field of this type gets.
    pub fn default_width(self) -> Width {
        match self {
            Self::Spacer => Width::Fourth,
            _ => Width::Full,
        }
    }

    /// Whether this type produces a value (and therefore needs a `name`).
    pub fn is_input(self) -> bool {
        !matches!(self, Self::Title | Self::Spacer)
    }

    /// Whether `options` carries meaning for this type.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Multiple)
    }
}

impl From<JsonValue> for FieldType {
    fn from(value: JsonValue) -> Self {
        value.as_str().map_or(Self::Unknown, Self::parse)
    }
}

impl From<FieldType> for &'static str {
    fn from(t: FieldType) -> Self {
        t.as_str()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal size of a field, in quarters of a row.
///
/// Decoding never fails: any unrecognised value, string or not, is treated
/// as `Full`, so a stored schema from a newer editor still lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "&'static str")]
pub enum Width {
    Fourth,
    Half,
    ThreeFourths,
    #[default]
    Full,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Fourth, Width::Half, Width::ThreeFourths, Width::Full];

    /// Column span out of [`GRID_SECTIONS`].
    #[inline]
    pub const fn span(self) -> u8 {
        match self {
            Self::Fourth => 1,
            Self::Half => 2,
            Self::ThreeFourths => 3,
            Self::Full => 4,
        }
    }

    /// Inverse of [`Width::span`]. Runs longer than a row clip to `Full`.
    #[inline]
    pub const fn from_span(span: u8) -> Option<Self> {
        match span {
            0 => None,
            1 => Some(Self::Fourth),
            2 => Some(Self::Half),
            3 => Some(Self::ThreeFourths),
            _ => Some(Self::Full),
        }
    }

    /// Lenient parse; unknown values fall back to `Full`.
    pub fn parse(s: &str) -> Self {
        match s {
            "fourth" => Self::Fourth,
            "half" => Self::Half,
            "three-fourths" => Self::ThreeFourths,
            _ => Self::Full,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fourth => "fourth",
            Self::Half => "half",
            Self::ThreeFourths => "three-fourths",
            Self::Full => "full",
        }
    }
}

impl From<JsonValue> for Width {
    fn from(value: JsonValue) -> Self {
        value.as_str().map_or(Self::Full, Self::parse)
    }
}

impl From<Width> for &'static str {
    fn from(w: Width) -> Self {
        w.as_str()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a select/multiple field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A fully populated form field.
///
/// Deserialization goes through [`FieldDraft`], so every decoded field is
/// already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldDraft")]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub helper_text: String,
    pub width: Width,
    pub required: bool,
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "whole_as_integer")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "whole_as_integer")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "whole_as_integer")]
    pub step: Option<f64>,
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write whole numbers without a fraction (`10`, not `10.0`), matching what
/// browser-side consumers of the schema produce and expect.
fn whole_as_integer<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => serializer.serialize_i64(v as i64),
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

impl Field {
    /// Column span of this field.
    #[inline]
    pub fn span(&self) -> u8 {
        self.width.span()
    }
}

/// A field with every attribute optional, as found in partially written or
/// older saved forms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl FieldDraft {
    /// Fill every missing attribute with its default.
    ///
    /// A missing id gets a fresh one, a missing type is `text`, a missing
    /// width is the type's default width.
    pub fn normalize(self) -> Field {
        let field_type = self.field_type.unwrap_or_default();
        Field {
            id: self.id.unwrap_or_else(FieldId::generate),
            field_type,
            name: self.name.unwrap_or_default(),
            label: self.label.unwrap_or_default(),
            placeholder: self.placeholder.unwrap_or_default(),
            helper_text: self.helper_text.unwrap_or_default(),
            width: self.width.unwrap_or_else(|| field_type.default_width()),
            required: self.required.unwrap_or(false),
            options: self.options.unwrap_or_default(),
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

impl From<FieldDraft> for Field {
    fn from(draft: FieldDraft) -> Self {
        draft.normalize()
    }
}

impl From<Field> for FieldDraft {
    fn from(field: Field) -> Self {
        Self {
            id: Some(field.id),
            field_type: Some(field.field_type),
            name: Some(field.name),
            label: Some(field.label),
            placeholder: Some(field.placeholder),
            helper_text: Some(field.helper_text),
            width: Some(field.width),
            required: Some(field.required),
            options: Some(field.options),
            min: field.min,
            max: field.max,
            step: field.step,
        }
    }
}
