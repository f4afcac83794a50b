use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Colour of the live preview when none is configured
pub const DEFAULT_COLOR: &str = "#000000";
/// Colour given to strokes once they are committed to the history
pub const DEFAULT_COMMITTED_COLOR: &str = "#9b6ed69e";
pub const DEFAULT_STROKE_WIDTH: f32 = 4.0;

// Raw samples of one continuous interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    // Create an empty stroke for capturing
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    // Add a sample to the end of the stroke
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// A lone tap renders nothing as a path, so give it a second sample
    /// offset diagonally by `floor(sqrt(stroke_width) / 2)`.
    pub fn pad_single_tap(&mut self, stroke_width: f32) {
        if self.points.len() == 1 {
            let p = self.points[0];
            let distance = (stroke_width.max(0.0).sqrt() / 2.0).floor();
            self.points.push(Point::new(p.x + distance, p.y + distance, p.t));
        }
    }
}

/// Presentation attributes of a committed stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: f32,
    pub fill: String,
    pub stroke_linecap: String,
    pub stroke_linejoin: String,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, stroke_width: f32) -> Self {
        Self {
            stroke: color.into(),
            stroke_width,
            fill: "none".to_owned(),
            stroke_linecap: "round".to_owned(),
            stroke_linejoin: "round".to_owned(),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_STROKE_WIDTH)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAttributes {
    /// Path commands, as produced by [`crate::Pen::points_to_svg`]
    pub d: String,
    #[serde(flatten)]
    pub style: StrokeStyle,
}

/// A renderable element of the stroke history
///
/// Serialized as `{"type": "Path", "attributes": {...}}` so saved drawings
/// can be fed back in as an initial history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "attributes")]
pub enum StrokeElement {
    Path(PathAttributes),
}

impl StrokeElement {
    pub fn path(d: impl Into<String>, style: StrokeStyle) -> Self {
        Self::Path(PathAttributes { d: d.into(), style })
    }

    /// Get the element type as a string
    pub fn element_type(&self) -> &'static str {
        match self {
            Self::Path(_) => "Path",
        }
    }

    pub fn d(&self) -> &str {
        match self {
            Self::Path(attrs) => &attrs.d,
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        match self {
            Self::Path(attrs) => &attrs.style,
        }
    }

    /// Attributes in their camelCase form, in declaration order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Path(attrs) => vec![
                ("d", attrs.d.clone()),
                ("stroke", attrs.style.stroke.clone()),
                ("strokeWidth", attrs.style.stroke_width.to_string()),
                ("fill", attrs.style.fill.clone()),
                ("strokeLinecap", attrs.style.stroke_linecap.clone()),
                ("strokeLinejoin", attrs.style.stroke_linejoin.clone()),
            ],
        }
    }
}
