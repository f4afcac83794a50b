use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stroke::{DEFAULT_COLOR, DEFAULT_COMMITTED_COLOR, DEFAULT_STROKE_WIDTH, StrokeElement, StrokeStyle};

/// Settings supplied by whoever embeds the drawing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct SurfaceConfig {
    /// Initial history, e.g. a previously saved drawing
    pub strokes: Option<Vec<StrokeElement>>,
    pub stroke_width: f32,
    /// Colour of the stroke being drawn
    pub color: String,
    /// Colour of strokes once committed
    pub committed_color: String,
    /// Directory exports are written into
    pub path: PathBuf,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            strokes: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
            color: DEFAULT_COLOR.to_owned(),
            committed_color: DEFAULT_COMMITTED_COLOR.to_owned(),
            path: PathBuf::from("."),
        }
    }
}

impl SurfaceConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Style given to committed strokes
    pub fn committed_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.committed_color.clone(), self.stroke_width)
    }

    /// Style of the live preview
    pub fn preview_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color.clone(), self.stroke_width)
    }
}
