use serde::{Deserialize, Serialize};

/// A single input sample captured while a pointer is down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Timestamp in milliseconds, monotonic within one interaction
    pub t: f64,
}

impl Point {
    pub fn new(x: f32, y: f32, t: f64) -> Self {
        Self { x, y, t }
    }
}
