//! Edge auto-scroll while dragging over the canvas.

use formgrid_api::{Point, Rect};

/// Tuning for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Height of the top/bottom band (px) that triggers auto-scroll.
    pub scroll_edge: f32,
    /// Scroll speed at the very edge, in px per drag-over tick.
    pub scroll_max_speed: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            scroll_edge: 40.0,
            scroll_max_speed: 8.0,
        }
    }
}

/// Compute auto-scroll speed based on cursor distance from the viewport edges.
///
/// Proportional to how deep the pointer is in the edge band. Negative scrolls
/// up, positive scrolls down, `None` outside the bands.
pub fn auto_scroll_speed(config: &DragConfig, viewport: Rect, pos: Point) -> Option<f32> {
    let edge = config.scroll_edge;
    if edge <= 0.0 {
        return None;
    }

    let speed = if pos.y < viewport.y + edge {
        let dist = (viewport.y + edge - pos.y).min(edge);
        -(dist / edge) * config.scroll_max_speed
    } else if pos.y > viewport.bottom() - edge {
        let dist = (pos.y - (viewport.bottom() - edge)).min(edge);
        (dist / edge) * config.scroll_max_speed
    } else {
        0.0
    };

    (speed.abs() > 0.1).then_some(speed)
}
