//! Plain-text rendering of a form's row layout.

use std::fmt::Write;

use formgrid_api::{Field, GRID_SECTIONS};
use formgrid_kernel::{group_into_rows, SectionMap};

const MEMBER_MARKS: [char; 4] = ['A', 'B', 'C', 'D'];

/// One line per row: the section map (`A`..`D` per member, `.` free)
/// followed by each member's name, type and width.
pub fn render_layout(fields: &[Field]) -> String {
    let mut out = String::new();
    for row in group_into_rows(fields) {
        let map = SectionMap::for_row(&row, None);
        let sections: String = (0..GRID_SECTIONS as usize)
            .map(|s| match map.owner(s) {
                Some(flat) => MEMBER_MARKS[(flat - row.start) % MEMBER_MARKS.len()],
                None => '.',
            })
            .collect();

        let members: Vec<String> = row
            .fields
            .iter()
            .map(|f| format!("{} ({}, {})", display_name(f), f.field_type, f.width))
            .collect();

        let _ = writeln!(out, "row {:<3} [{}]  {}", row.index, sections, members.join(" | "));
    }
    out
}

fn display_name(field: &Field) -> &str {
    if !field.name.is_empty() {
        &field.name
    } else if !field.label.is_empty() {
        &field.label
    } else {
        field.id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgrid_api::{FieldDraft, FieldId, FieldType, Width};

    fn field(name: &str, field_type: FieldType, width: Width) -> Field {
        FieldDraft {
            id: Some(FieldId::from(name)),
            field_type: Some(field_type),
            name: Some(name.to_string()),
            width: Some(width),
            ..Default::default()
        }
        .normalize()
    }

    #[test]
    fn renders_sections_per_row() {
        let fields = vec![
            field("heading", FieldType::Title, Width::Full),
            field("first", FieldType::Text, Width::Half),
            field("age", FieldType::Number, Width::Fourth),
        ];
        let text = render_layout(&fields);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "row 0   [AAAA]  heading (title, full)");
        assert_eq!(lines[1], "row 1   [AAB.]  first (text, half) | age (number, fourth)");
    }

    #[test]
    fn empty_form_renders_nothing() {
        assert_eq!(render_layout(&[]), "");
    }
}
