//! Drag sources and their transport encoding.
//!
//! The source travels through the platform's drag data as a small JSON
//! string, so a drop can be resolved even if it lands in a different view
//! than the one that started the drag.

use formgrid_api::{FieldId, FieldType};
use serde::{Deserialize, Serialize};

/// What's being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragSource {
    /// A field type from the palette; dropping creates a new field.
    #[serde(rename = "palette")]
    PaletteField {
        #[serde(rename = "fieldType")]
        field_type: FieldType,
    },
    /// An existing field on the canvas.
    #[serde(rename = "field")]
    CanvasField { id: FieldId },
    /// A whole row on the canvas.
    #[serde(rename = "row")]
    CanvasRow {
        #[serde(rename = "rowIndex")]
        row_index: usize,
    },
}

impl DragSource {
    pub fn palette(field_type: FieldType) -> Self {
        Self::PaletteField { field_type }
    }

    pub fn field(id: FieldId) -> Self {
        Self::CanvasField { id }
    }

    pub fn row(row_index: usize) -> Self {
        Self::CanvasRow { row_index }
    }

    pub fn field_id(&self) -> Option<&FieldId> {
        match self {
            Self::CanvasField { id } => Some(id),
            _ => None,
        }
    }

    /// Encode for the drag data transfer.
    pub fn encode(&self) -> String {
        // A tagged enum of strings and integers always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse drag data. The palette only offers known types, so a palette
    /// payload naming anything else is rejected.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        let source: Self = serde_json::from_str(raw)?;
        if let Self::PaletteField {
            field_type: FieldType::Unknown,
        } = source
        {
            return Err(serde::de::Error::custom("unknown palette field type"));
        }
        Ok(source)
    }
}
