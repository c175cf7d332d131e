#![warn(missing_docs)]

//! Rounded, highlighter-style backgrounds for text that wraps across lines.
//!
//! Each visual line gets a rounded rectangle, and consecutive lines are joined by
//! small corner fills so the whole span reads as one continuous pill.

/// Span style configuration.
pub mod style;

/// Reusable fill path buffer.
pub mod path;

/// Connective corner shapes between consecutive lines.
pub mod corners;

/// Draw-command sinks.
pub mod canvas;

/// Host-side line geometry and text measurement.
pub mod measure;

mod error;
mod renderer;

pub use canvas::{BackgroundCanvas, DrawCommand, RecordingCanvas, WindowCanvas};
pub use corners::CornerFill;
pub use error::*;
pub use measure::{FixedAdvanceMeasurer, LineGeometry, TextMeasurer};
pub use path::{FillPath, PathVerb};
pub use renderer::*;
pub use style::RoundedBackgroundStyle;
