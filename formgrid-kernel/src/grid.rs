//! Grid section resolution for drop targeting.
//!
//! A row is 4 fixed sections of 25% each. Members are anchored left to
//! right at the cumulative span of their predecessors. Resolution runs on
//! every drag-over tick, so [`SectionMap`] is a small `Copy` value with no
//! heap state.

use formgrid_api::{FieldId, Width, GRID_SECTIONS};

use crate::layout::Row;

const SECTIONS: usize = GRID_SECTIONS as usize;

/// Occupancy of one row's sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionMap {
    /// Bit `s` set when section `s` is occupied.
    occupied: u8,
    /// Flat index of the field covering each section.
    owners: [Option<usize>; SECTIONS],
    /// Anchor section of each member, in row order.
    anchors: [u8; SECTIONS],
    members: u8,
}

impl SectionMap {
    pub const EMPTY: Self = Self {
        occupied: 0,
        owners: [None; SECTIONS],
        anchors: [0; SECTIONS],
        members: 0,
    };

    /// Map a row. `skip` leaves one member's sections free (but still
    /// anchored), so a field can be resized into the space it already uses.
    pub fn for_row(row: &Row<'_>, skip: Option<&FieldId>) -> Self {
        let mut map = Self::EMPTY;
        let mut cursor = 0u8;

        for (offset, field) in row.fields.iter().enumerate() {
            if cursor >= GRID_SECTIONS {
                break;
            }
            map.anchors[map.members as usize] = cursor;
            map.members += 1;

            let span = field.span().min(GRID_SECTIONS - cursor);
            if skip != Some(&field.id) {
                for s in cursor..cursor + span {
                    map.occupied |= 1 << s;
                    map.owners[s as usize] = Some(row.start + offset);
                }
            }
            cursor += span;
        }
        map
    }

    /// Map built from a raw occupancy bitmap (low 4 bits).
    pub fn from_bitmap(bits: u8) -> Self {
        Self {
            occupied: bits & 0x0f,
            ..Self::EMPTY
        }
    }

    #[inline]
    pub fn bitmap(&self) -> u8 {
        self.occupied
    }

    #[inline]
    pub fn is_occupied(&self, section: usize) -> bool {
        section < SECTIONS && self.occupied & (1 << section) != 0
    }

    pub fn owner(&self, section: usize) -> Option<usize> {
        self.owners.get(section).copied().flatten()
    }

    /// Widest field that fits starting at `section`: the run of contiguous
    /// free sections from there, or `None` when occupied or out of range.
    pub fn available_width(&self, section: usize) -> Option<Width> {
        if section >= SECTIONS || self.is_occupied(section) {
            return None;
        }
        let run = (section..SECTIONS)
            .take_while(|&s| !self.is_occupied(s))
            .count();
        Width::from_span(run as u8)
    }

    pub fn available_widths(&self) -> [Option<Width>; SECTIONS] {
        [
            self.available_width(0),
            self.available_width(1),
            self.available_width(2),
            self.available_width(3),
        ]
    }

    pub fn free_sections(&self) -> u8 {
        GRID_SECTIONS - self.occupied.count_ones() as u8
    }

    /// Number of members anchored before `section`; the offset within the
    /// row at which a field dropped on `section` is inserted.
    pub fn insert_offset(&self, section: usize) -> usize {
        self.anchors[..self.members as usize]
            .iter()
            .filter(|&&anchor| (anchor as usize) < section)
            .count()
    }
}
