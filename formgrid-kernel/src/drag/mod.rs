//! Drag-and-drop state machine for the builder canvas.
//!
//! Idle → Dragging(source) → Hovering{gap, field, row, grid section} → Idle.
//!
//! The platform reports what is under the pointer as a list of
//! [`HoverEvent`]s on every drag-over tick. All hover state lives in one
//! [`DragSession`]; a drop resolves the session into at most one
//! [`Mutation`] for the builder to apply. Drop and cancel always return the
//! machine to idle, and cancel never touches the field list.
//!
//! When several targets are hot at once the drop resolves with precedence
//! swap > grid section > horizontal zone > insertion index.

mod payload;
mod scroll;

pub use payload::DragSource;
pub use scroll::{auto_scroll_speed, DragConfig};

use formgrid_api::{Field, FieldId, FieldType, Point, Rect, Width};

use crate::grid::SectionMap;
use crate::layout::{self, RowEdge};

/// Which part of a field card the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldZone {
    /// The card body: swap with a same-row field.
    Center,
    /// Thin drop zone on the left edge: insert before.
    Left,
    /// Thin drop zone on the right edge: insert after.
    Right,
}

/// One hit region under the pointer, as reported by the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent {
    /// Canvas background; a drop appends.
    Canvas,
    /// Insertion gap before flat index `usize`.
    Gap(usize),
    Field { id: FieldId, zone: FieldZone },
    GridSection { row: usize, section: usize },
    RowEdge { row: usize, edge: RowEdge },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTarget {
    pub id: FieldId,
}

/// Empty grid section a drop would fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTarget {
    pub row: usize,
    pub section: usize,
    /// Widest field that fits from `section`.
    pub width: Width,
    /// Flat insertion index, in pre-removal coordinates.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalTarget {
    pub id: FieldId,
    pub after: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTarget {
    pub row: usize,
    pub edge: RowEdge,
}

/// Everything tracked for one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: DragSource,
    pub pointer: Point,
    pub swap_target: Option<SwapTarget>,
    pub grid_target: Option<GridTarget>,
    pub horizontal_target: Option<HorizontalTarget>,
    pub row_target: Option<RowTarget>,
    pub insert_index: Option<usize>,
    /// Auto-scroll speed (px per tick). `None` when not auto-scrolling.
    pub auto_scroll: Option<f32>,
}

impl DragSession {
    fn new(source: DragSource) -> Self {
        Self {
            source,
            pointer: Point::ORIGIN,
            swap_target: None,
            grid_target: None,
            horizontal_target: None,
            row_target: None,
            insert_index: None,
            auto_scroll: None,
        }
    }

    fn clear_targets(&mut self) {
        self.swap_target = None;
        self.grid_target = None;
        self.horizontal_target = None;
        self.row_target = None;
        self.insert_index = None;
    }

    /// Visible phase, following drop precedence.
    pub fn phase(&self) -> DragPhase {
        if self.swap_target.is_some() {
            DragPhase::HoveringField
        } else if self.grid_target.is_some() {
            DragPhase::HoveringGridSection
        } else if self.horizontal_target.is_some() {
            DragPhase::HoveringField
        } else if self.row_target.is_some() {
            DragPhase::HoveringRow
        } else if self.insert_index.is_some() {
            DragPhase::HoveringInsertionGap
        } else {
            DragPhase::Dragging
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    HoveringInsertionGap,
    HoveringField,
    HoveringRow,
    HoveringGridSection,
}

/// A field-list change produced by a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Create a field of `field_type` at `index`, optionally sized.
    Insert {
        field_type: FieldType,
        index: usize,
        width: Option<Width>,
    },
    /// Change a field's width in place.
    Resize { id: FieldId, width: Width },
    /// Move a field so it ends at `to` (post-removal index), optionally resizing it.
    Move {
        id: FieldId,
        to: usize,
        width: Option<Width>,
    },
    /// Exchange the positions of two same-row fields.
    Swap { a: FieldId, b: FieldId },
    /// Move a whole row next to another.
    MoveRow { from: usize, to: usize, edge: RowEdge },
}

/// The drag state machine. At most one session exists at a time.
#[derive(Debug, Default)]
pub struct DragMachine {
    config: DragConfig,
    session: Option<DragSession>,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, DragSession::phase)
    }

    /// Current auto-scroll speed, `None` when idle or away from the edges.
    pub fn auto_scroll(&self) -> Option<f32> {
        self.session.as_ref().and_then(|s| s.auto_scroll)
    }

    /// Start a drag. Returns the payload to hand to the platform's drag data.
    pub fn begin(&mut self, source: DragSource) -> String {
        if self.session.is_some() {
            tracing::debug!("Replacing stale drag session");
        }
        let payload = source.encode();
        tracing::debug!(?source, "Drag started");
        self.session = Some(DragSession::new(source));
        payload
    }

    /// Re-evaluate hover targets for one drag-over tick.
    ///
    /// `hits` lists every region under the pointer; targets not reported
    /// this tick are cleared. Returns the auto-scroll nudge for the canvas
    /// viewport, if any.
    pub fn drag_over(
        &mut self,
        hits: &[HoverEvent],
        pointer: Point,
        viewport: Rect,
        fields: &[Field],
    ) -> Option<f32> {
        let config = self.config;
        let session = self.session.as_mut()?;
        session.pointer = pointer;
        session.clear_targets();
        for hit in hits {
            apply_hover(session, hit, fields);
        }
        session.auto_scroll = auto_scroll_speed(&config, viewport, pointer);
        session.auto_scroll
    }

    /// Pointer left the canvas: drop every target and stop scrolling,
    /// but keep the gesture alive.
    pub fn drag_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear_targets();
            session.auto_scroll = None;
        }
    }

    /// Abort the gesture. Never mutates anything.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("Drag cancelled");
        }
    }

    /// Finish the gesture with the platform's drag data.
    ///
    /// Always returns to idle. An undecodable payload or a drop with no hot
    /// target yields `None`.
    pub fn drop(&mut self, raw_payload: &str, fields: &[Field]) -> Option<Mutation> {
        let session = self.session.take();

        let source = match DragSource::decode(raw_payload) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("Ignoring malformed drag payload: {}", e);
                return None;
            }
        };
        let session = session?;

        let mutation = resolve_drop(&source, &session, fields);
        tracing::debug!(?mutation, "Drop resolved");
        mutation
    }
}

/// Fold one hit region into the session's targets.
fn apply_hover(session: &mut DragSession, hit: &HoverEvent, fields: &[Field]) {
    match (&session.source, hit) {
        (_, HoverEvent::Canvas) => {
            session.insert_index.get_or_insert(fields.len());
        }
        (_, HoverEvent::Gap(index)) => {
            session.insert_index = Some((*index).min(fields.len()));
        }

        (DragSource::CanvasRow { .. }, HoverEvent::RowEdge { row, edge }) => {
            if *row < layout::row_ranges(fields).len() {
                session.row_target = Some(RowTarget { row: *row, edge: *edge });
            }
        }
        (DragSource::CanvasRow { .. }, _) => {}

        (_, HoverEvent::RowEdge { row, edge }) => {
            if let Some(range) = layout::row_ranges(fields).get(*row) {
                session.insert_index = Some(match edge {
                    RowEdge::Before => range.start,
                    RowEdge::After => range.end,
                });
            }
        }

        (source, HoverEvent::GridSection { row, section }) => {
            let rows = layout::group_into_rows(fields);
            let Some(row_ref) = rows.get(*row) else {
                return;
            };
            let map = SectionMap::for_row(row_ref, source.field_id());
            if let Some(width) = map.available_width(*section) {
                session.grid_target = Some(GridTarget {
                    row: *row,
                    section: *section,
                    width,
                    index: row_ref.start + map.insert_offset(*section),
                });
            }
        }

        (DragSource::CanvasField { id: source_id }, HoverEvent::Field { id, zone }) => {
            if source_id == id {
                return;
            }
            match zone {
                FieldZone::Center => {
                    let (Some(a), Some(b)) = (layout::position(fields, source_id), layout::position(fields, id)) else {
                        return;
                    };
                    if layout::same_row(fields, a, b) {
                        session.swap_target = Some(SwapTarget { id: id.clone() });
                    }
                }
                FieldZone::Left | FieldZone::Right => {
                    session.horizontal_target = Some(HorizontalTarget {
                        id: id.clone(),
                        after: *zone == FieldZone::Right,
                    });
                }
            }
        }

        (DragSource::PaletteField { .. }, HoverEvent::Field { id, zone }) => {
            let Some(index) = layout::position(fields, id) else {
                return;
            };
            match zone {
                FieldZone::Left => session.insert_index = Some(index),
                FieldZone::Right => session.insert_index = Some(index + 1),
                FieldZone::Center => {}
            }
        }
    }
}

/// Index a moved field ends at when dropped at pre-removal index `target`.
fn splice_index(source: usize, target: usize) -> usize {
    if source < target {
        target - 1
    } else {
        target
    }
}

fn resolve_drop(source: &DragSource, session: &DragSession, fields: &[Field]) -> Option<Mutation> {
    match source {
        DragSource::PaletteField { field_type } => {
            if let Some(grid) = session.grid_target {
                return Some(Mutation::Insert {
                    field_type: *field_type,
                    index: grid.index,
                    width: Some(grid.width),
                });
            }
            session.insert_index.map(|index| Mutation::Insert {
                field_type: *field_type,
                index: index.min(fields.len()),
                width: None,
            })
        }

        DragSource::CanvasField { id } => {
            let from = layout::position(fields, id)?;

            if let Some(swap) = &session.swap_target {
                // Rows may have shifted since the target was picked.
                match layout::position(fields, &swap.id) {
                    Some(to) if layout::same_row(fields, from, to) => {
                        return Some(Mutation::Swap {
                            a: id.clone(),
                            b: swap.id.clone(),
                        });
                    }
                    _ => tracing::debug!("Swap target no longer shares a row; ignoring"),
                }
            }

            if let Some(grid) = session.grid_target {
                let to = splice_index(from, grid.index);
                return Some(if to == from {
                    Mutation::Resize {
                        id: id.clone(),
                        width: grid.width,
                    }
                } else {
                    Mutation::Move {
                        id: id.clone(),
                        to,
                        width: Some(grid.width),
                    }
                });
            }

            if let Some(target) = &session.horizontal_target {
                let index = layout::position(fields, &target.id)?;
                let to = splice_index(from, index + usize::from(target.after));
                return (to != from).then(|| Mutation::Move {
                    id: id.clone(),
                    to,
                    width: None,
                });
            }

            let index = session.insert_index?;
            let to = splice_index(from, index.min(fields.len()));
            (to != from).then(|| Mutation::Move {
                id: id.clone(),
                to,
                width: None,
            })
        }

        DragSource::CanvasRow { row_index } => {
            let target = session.row_target?;
            let rows = layout::row_ranges(fields).len();
            if *row_index >= rows || target.row >= rows {
                tracing::debug!(row_index, target = target.row, rows, "Ignoring row drop for a missing row");
                return None;
            }
            (target.row != *row_index).then_some(Mutation::MoveRow {
                from: *row_index,
                to: target.row,
                edge: target.edge,
            })
        }
    }
}
