#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod input;
pub mod pen;
pub mod persistence;
pub mod point;
pub mod renderer;
pub mod store;
pub mod stroke;

pub use app::GesturePadApp;
pub use config::SurfaceConfig;
pub use controller::{InteractionController, InteractionState};
pub use error::{ConfigError, PathParseError, PersistenceError};
pub use input::{InputEvent, InputHandler};
pub use pen::{Pen, SurfaceRect};
pub use persistence::{BlobWriter, ExportTicket, FsBlobWriter};
pub use point::Point;
pub use renderer::PathRenderer;
pub use store::{DrainedSamples, StrokeStore};
pub use stroke::{Stroke, StrokeElement, StrokeStyle};
