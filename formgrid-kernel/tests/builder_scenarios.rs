//! End-to-end builder scenarios.
//!
//! Each test drives the builder the way a canvas would: start a drag, report
//! hover regions on a drag-over tick, then drop the payload the drag produced.

use formgrid_api::{Field, FieldId, FieldType, FormSchema, Point, Rect, SavedForm, Width};
use formgrid_kernel::drag::FieldZone;
use formgrid_kernel::{
    derive_schema_with_widths, group_into_rows, parse_schema_with_widths, DragSource, FieldPatch,
    HoverEvent, Mutation, RowEdge, SchemaBuilder,
};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1024.0, 768.0);
const POINTER: Point = Point::new(200.0, 300.0);

/// Builder harness that replays one gesture per call.
struct Canvas {
    builder: SchemaBuilder,
}

impl Canvas {
    fn new() -> Self {
        Self {
            builder: SchemaBuilder::new(),
        }
    }

    fn with_widths(widths: &[Width]) -> Self {
        let mut canvas = Self::new();
        for w in widths {
            canvas
                .builder
                .add_field(FieldType::Text, None, Some(FieldPatch::width(*w)));
        }
        canvas
    }

    fn gesture(&mut self, source: DragSource, hits: &[HoverEvent]) -> Option<Mutation> {
        let payload = self.builder.begin_drag(source);
        self.builder.drag_over(hits, POINTER, VIEWPORT);
        self.builder.drop_payload(&payload).expect("drop failed")
    }

    fn ids(&self) -> Vec<FieldId> {
        self.builder.fields().iter().map(|f| f.id.clone()).collect()
    }

    fn widths(&self) -> Vec<Width> {
        self.builder.fields().iter().map(|f| f.width).collect()
    }

    fn row_shapes(&self) -> Vec<Vec<Width>> {
        self.builder.rows().iter().map(|r| r.widths()).collect()
    }
}

#[test]
fn scenario_a_palette_drop_on_empty_canvas() {
    let mut canvas = Canvas::new();
    canvas.gesture(DragSource::palette(FieldType::Text), &[HoverEvent::Gap(0)]);
    let fields = canvas.builder.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_type, FieldType::Text);
    assert_eq!(fields[0].width, Width::Full);
}

#[test]
fn scenario_a_canvas_background_appends() {
    let mut canvas = Canvas::new();
    canvas.gesture(DragSource::palette(FieldType::Date), &[HoverEvent::Canvas]);
    canvas.gesture(DragSource::palette(FieldType::Spacer), &[HoverEvent::Canvas]);
    let types: Vec<FieldType> = canvas.builder.fields().iter().map(|f| f.field_type).collect();
    assert_eq!(types, vec![FieldType::Date, FieldType::Spacer]);
}

#[test]
fn scenario_b_swap_two_halves() {
    let mut canvas = Canvas::with_widths(&[Width::Half, Width::Half]);
    let before = canvas.ids();
    let m = canvas.gesture(
        DragSource::field(before[1].clone()),
        &[HoverEvent::Field {
            id: before[0].clone(),
            zone: FieldZone::Center,
        }],
    );
    assert!(matches!(m, Some(Mutation::Swap { .. })));
    assert_eq!(canvas.ids(), vec![before[1].clone(), before[0].clone()]);
    assert_eq!(canvas.widths(), vec![Width::Half, Width::Half]);
    assert_eq!(canvas.builder.rows().len(), 1);
}

#[test]
fn scenario_c_full_then_four_fourths() {
    let canvas = Canvas::with_widths(&[Width::Full, Width::Fourth, Width::Fourth, Width::Fourth, Width::Fourth]);
    assert_eq!(
        canvas.row_shapes(),
        vec![vec![Width::Full], vec![Width::Fourth; 4]]
    );
}

#[test]
fn scenario_d_export_widths() {
    let canvas = Canvas::with_widths(&[Width::Half, Width::Half, Width::Full]);
    let form = canvas.builder.export_schema();
    assert_eq!(form.widths, vec![vec![Width::Half, Width::Half], vec![Width::Full]]);

    let json: serde_json::Value = serde_json::from_str(&form.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["widths"], serde_json::json!([["half", "half"], ["full"]]));
}

#[test]
fn scenario_e_palette_into_three_fourths_gap() {
    let mut canvas = Canvas::with_widths(&[Width::Fourth]);
    canvas.gesture(
        DragSource::palette(FieldType::Select),
        &[HoverEvent::GridSection { row: 0, section: 1 }],
    );
    let fields = canvas.builder.fields();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].field_type, FieldType::Select);
    assert_eq!(fields[1].width, Width::ThreeFourths);
    assert_eq!(canvas.builder.rows().len(), 1);
}

#[test]
fn swap_leaves_other_rows_and_attributes_alone() {
    let mut canvas = Canvas::with_widths(&[Width::Full, Width::Fourth, Width::Half, Width::Fourth, Width::Full]);
    let ids = canvas.ids();
    canvas
        .builder
        .update_field(&ids[1], FieldPatch { label: Some("First".into()), required: Some(true), ..Default::default() })
        .unwrap();
    let before: Vec<Field> = canvas.builder.fields().to_vec();
    let rows_before: Vec<Vec<FieldId>> = canvas
        .builder
        .rows()
        .iter()
        .map(|r| r.fields.iter().map(|f| f.id.clone()).collect())
        .collect();

    canvas.gesture(
        DragSource::field(ids[1].clone()),
        &[HoverEvent::Field {
            id: ids[3].clone(),
            zone: FieldZone::Center,
        }],
    );

    let after = canvas.builder.fields();
    assert_eq!(after.len(), before.len());
    for field in &before {
        let moved = after.iter().find(|f| f.id == field.id).unwrap();
        assert_eq!(moved, field);
    }
    assert_eq!(after[1].id, ids[3]);
    assert_eq!(after[3].id, ids[1]);

    let rows_after: Vec<Vec<FieldId>> = canvas
        .builder
        .rows()
        .iter()
        .map(|r| r.fields.iter().map(|f| f.id.clone()).collect())
        .collect();
    assert_eq!(rows_after[0], rows_before[0]);
    assert_eq!(rows_after[2], rows_before[2]);
}

#[test]
fn horizontal_reorder_keeps_width() {
    let mut canvas = Canvas::with_widths(&[Width::Half, Width::Full, Width::Fourth]);
    let ids = canvas.ids();
    canvas.gesture(
        DragSource::field(ids[0].clone()),
        &[HoverEvent::Field {
            id: ids[2].clone(),
            zone: FieldZone::Right,
        }],
    );
    assert_eq!(canvas.ids(), vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    assert_eq!(canvas.widths(), vec![Width::Full, Width::Fourth, Width::Half]);
    assert_eq!(canvas.row_shapes(), vec![vec![Width::Full], vec![Width::Fourth, Width::Half]]);
}

#[test]
fn row_move_preserves_internal_order() {
    let mut canvas = Canvas::with_widths(&[Width::Full, Width::Half, Width::Fourth, Width::Fourth, Width::ThreeFourths]);
    let ids = canvas.ids();
    canvas.gesture(
        DragSource::row(1),
        &[HoverEvent::RowEdge {
            row: 2,
            edge: RowEdge::After,
        }],
    );
    assert_eq!(
        canvas.ids(),
        vec![ids[0].clone(), ids[4].clone(), ids[1].clone(), ids[2].clone(), ids[3].clone()]
    );
}

#[test]
fn resize_in_place_via_grid() {
    let mut canvas = Canvas::with_widths(&[Width::Half]);
    let ids = canvas.ids();
    let m = canvas.gesture(
        DragSource::field(ids[0].clone()),
        &[HoverEvent::GridSection { row: 0, section: 0 }],
    );
    assert_eq!(
        m,
        Some(Mutation::Resize {
            id: ids[0].clone(),
            width: Width::Full
        })
    );
    assert_eq!(canvas.widths(), vec![Width::Full]);
}

#[test]
fn corrupt_payload_changes_nothing() {
    let mut canvas = Canvas::with_widths(&[Width::Half, Width::Half]);
    let before = canvas.builder.fields().to_vec();
    canvas.builder.begin_drag(DragSource::palette(FieldType::Text));
    canvas.builder.drag_over(&[HoverEvent::Gap(0)], POINTER, VIEWPORT);
    let result = canvas.builder.drop_payload("{\"kind\":\"palette\",\"fieldType\":");
    assert!(matches!(result, Ok(None)));
    assert_eq!(canvas.builder.fields(), before.as_slice());
    assert!(!canvas.builder.drag().is_active());
}

#[test]
fn stale_row_drag_changes_nothing() {
    let mut canvas = Canvas::with_widths(&[Width::Full]);
    let before = canvas.builder.fields().to_vec();
    let m = canvas.gesture(
        DragSource::row(5),
        &[HoverEvent::RowEdge {
            row: 0,
            edge: RowEdge::Before,
        }],
    );
    assert_eq!(m, None);
    assert_eq!(canvas.builder.fields(), before.as_slice());
    assert!(!canvas.builder.drag().is_active());
}

#[test]
fn cancel_is_side_effect_free() {
    let mut canvas = Canvas::with_widths(&[Width::Half, Width::Half, Width::Full]);
    let before = canvas.builder.fields().to_vec();
    let ids = canvas.ids();
    canvas.builder.begin_drag(DragSource::field(ids[0].clone()));
    canvas.builder.drag_over(
        &[HoverEvent::Field {
            id: ids[1].clone(),
            zone: FieldZone::Center,
        }],
        Point::new(10.0, 5.0),
        VIEWPORT,
    );
    assert!(canvas.builder.drag().auto_scroll().is_some());
    canvas.builder.cancel_drag();
    assert_eq!(canvas.builder.fields(), before.as_slice());
    assert_eq!(canvas.builder.drag().auto_scroll(), None);
}

#[test]
fn round_trip_through_json() {
    let canvas = Canvas::with_widths(&[
        Width::ThreeFourths,
        Width::Fourth,
        Width::Half,
        Width::Full,
        Width::Fourth,
        Width::Fourth,
        Width::Half,
        Width::ThreeFourths,
    ]);
    let json = canvas.builder.export_schema().to_json_pretty().unwrap();

    let restored = SchemaBuilder::from_saved(SavedForm::from_json(&json).unwrap());
    assert_eq!(restored.fields(), canvas.builder.fields());
    assert_eq!(FormSchema::from_json(&json).unwrap(), restored.export_schema());
}

#[test]
fn round_trip_law_holds_for_width_sequences() {
    let pool = [Width::Fourth, Width::Half, Width::ThreeFourths, Width::Full];
    // Every sequence of up to 5 widths.
    for len in 0..=5u32 {
        for code in 0..4usize.pow(len) {
            let mut c = code;
            let widths: Vec<Width> = (0..len)
                .map(|_| {
                    let w = pool[c % 4];
                    c /= 4;
                    w
                })
                .collect();
            let canvas = Canvas::with_widths(&widths);
            let fields = canvas.builder.fields();

            let restored = parse_schema_with_widths(derive_schema_with_widths(fields).into());
            let restored_widths: Vec<Width> = restored.iter().map(|f| f.width).collect();
            assert_eq!(restored_widths, widths);
            assert_eq!(restored.len(), fields.len());

            for row in group_into_rows(fields) {
                assert!(row.span() <= 4);
            }
        }
    }
}

#[test]
fn legacy_flat_form_with_unknown_width_loads() {
    let json = r#"[
        {"id": 1, "type": "title", "label": "Contact"},
        {"id": 2, "type": "text", "name": "first", "width": "half"},
        {"id": 3, "type": "text", "name": "last", "width": "two-thirds"}
    ]"#;
    let builder = SchemaBuilder::from_saved(SavedForm::from_json(json).unwrap());
    let shapes: Vec<Vec<Width>> = builder.rows().iter().map(|r| r.widths()).collect();
    assert_eq!(shapes, vec![vec![Width::Full], vec![Width::Half], vec![Width::Full]]);
    assert!(builder.validate().is_empty());
}

#[test]
fn form_from_newer_editor_loads_and_lays_out() {
    let json = r#"{
        "schema": [
            {"id": "a", "type": "text", "name": "first", "width": "half"},
            {"id": "b", "type": "rating", "name": "stars", "width": "half"},
            {"id": "c", "type": "text", "name": "notes", "width": 3}
        ],
        "widths": [["half", "half"], ["full"]]
    }"#;
    let builder = SchemaBuilder::from_saved(SavedForm::from_json(json).unwrap());
    assert_eq!(builder.fields()[1].field_type, FieldType::Unknown);
    let shapes: Vec<Vec<Width>> = builder.rows().iter().map(|r| r.widths()).collect();
    assert_eq!(shapes, vec![vec![Width::Half, Width::Half], vec![Width::Full]]);
    assert!(builder.finalize().is_ok());
}
