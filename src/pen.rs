use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Bounding rect of the drawing surface in its parent's coordinate space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Converts captured samples into path commands.
///
/// The pen keeps no stroke data of its own. It only counts committed strokes
/// so the owning [`crate::StrokeStore`] can check its bookkeeping, and it
/// remembers the last surface rect it was told about.
#[derive(Debug, Clone, Default)]
pub struct Pen {
    offset: Option<SurfaceRect>,
    committed: usize,
}

impl Pen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the surface rect. Samples are not translated by it.
    pub fn set_offset(&mut self, rect: SurfaceRect) {
        self.offset = Some(rect);
    }

    /// The last recorded surface rect, `None` before the first layout
    pub fn offset(&self) -> Option<SurfaceRect> {
        self.offset
    }

    /// Build a path from the samples: a move-to the first sample followed by
    /// a line-to every later one. No samples yields an empty path.
    pub fn points_to_svg(&self, points: &[Point]) -> String {
        let Some((first, rest)) = points.split_first() else {
            return String::new();
        };

        let mut path = String::with_capacity(16 * points.len());
        let _ = write!(path, "M {},{}", first.x, first.y);
        for point in rest {
            let _ = write!(path, " L {},{}", point.x, point.y);
        }
        path
    }

    pub fn add_stroke(&mut self, _points: &[Point]) {
        self.committed += 1;
    }

    pub fn rewind_stroke(&mut self) {
        self.committed = self.committed.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.committed = 0;
    }

    pub(crate) fn reset_to(&mut self, committed: usize) {
        self.committed = committed;
    }

    pub fn stroke_count(&self) -> usize {
        self.committed
    }
}
