use gpui::{
    BorderStyle, Bounds, Corners, Edges, Hsla, PaintQuad, Pixels, Point, Window, point,
};

use crate::FillPath;

/// Receives the draw commands of a [`LineBackgroundRenderer`](crate::LineBackgroundRenderer).
///
/// Coordinates are span-local: x is relative to where the host places the start of
/// the text, y is whatever the host passed as the line's top and bottom. Every
/// command is a solid, anti-aliased fill.
pub trait BackgroundCanvas {
    /// Fills a rectangle whose four corners are rounded by `corner_radius`.
    fn draw_rounded_rect(&mut self, bounds: Bounds<Pixels>, corner_radius: Pixels, color: Hsla);

    /// Fills a closed path.
    fn draw_path(&mut self, path: &FillPath, color: Hsla);
}

/// Paints into a gpui window, translating span-local coordinates by `origin`.
pub struct WindowCanvas<'a> {
    window: &'a mut Window,
    origin: Point<Pixels>,
}

impl<'a> WindowCanvas<'a> {
    /// Creates a canvas whose local `(0, 0)` lands on `origin` in window space.
    pub fn new(window: &'a mut Window, origin: Point<Pixels>) -> Self {
        Self { window, origin }
    }
}

impl BackgroundCanvas for WindowCanvas<'_> {
    fn draw_rounded_rect(&mut self, bounds: Bounds<Pixels>, corner_radius: Pixels, color: Hsla) {
        let origin = self.origin;
        self.window.paint_quad(PaintQuad {
            bounds: Bounds::from_corners(
                point(origin.x + bounds.left(), origin.y + bounds.top()),
                point(origin.x + bounds.right(), origin.y + bounds.bottom()),
            ),
            corner_radii: Corners::all(corner_radius),
            background: color.into(),
            border_widths: Edges::default(),
            border_color: Hsla::transparent_black(),
            border_style: BorderStyle::default(),
        });
    }

    fn draw_path(&mut self, path: &FillPath, color: Hsla) {
        // Zero-radius fills have no area and gpui refuses to build them.
        if let Some(path) = path.build(self.origin) {
            self.window.paint_path(path, color);
        }
    }
}

/// One recorded draw command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A [`BackgroundCanvas::draw_rounded_rect`] call.
    RoundedRect {
        /// Rectangle bounds.
        bounds: Bounds<Pixels>,
        /// Corner radius, identical on both axes.
        corner_radius: Pixels,
        /// Fill color.
        color: Hsla,
    },
    /// A [`BackgroundCanvas::draw_path`] call.
    Path {
        /// Snapshot of the path at the time of the call.
        path: FillPath,
        /// Fill color.
        color: Hsla,
    },
}

/// Canvas that records commands instead of painting them.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands in the order they were issued.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Bounds of every recorded rounded rectangle, in order.
    pub fn rounded_rects(&self) -> Vec<Bounds<Pixels>> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::RoundedRect { bounds, .. } => Some(*bounds),
                DrawCommand::Path { .. } => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl BackgroundCanvas for RecordingCanvas {
    fn draw_rounded_rect(&mut self, bounds: Bounds<Pixels>, corner_radius: Pixels, color: Hsla) {
        self.commands.push(DrawCommand::RoundedRect {
            bounds,
            corner_radius,
            color,
        });
    }

    fn draw_path(&mut self, path: &FillPath, color: Hsla) {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            color,
        });
    }
}
