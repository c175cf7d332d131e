//! A small, reusable path buffer for the corner fills.
//!
//! Corner shapes are traced in span-local coordinates into a [`FillPath`], which is
//! overwritten for every shape. Painting converts it into a gpui [`Path`] in window
//! space.

use gpui::{Path, PathBuilder, Pixels, Point, point};
use smallvec::SmallVec;

/// One drawing instruction of a [`FillPath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathVerb {
    /// Starts a new contour.
    MoveTo(Point<Pixels>),
    /// Straight segment to the point.
    LineTo(Point<Pixels>),
    /// Cubic bezier segment.
    CubicTo {
        /// First control point.
        ctrl_a: Point<Pixels>,
        /// Second control point.
        ctrl_b: Point<Pixels>,
        /// End point.
        to: Point<Pixels>,
    },
    /// Closes the current contour.
    Close,
}

/// Filled path made of a handful of verbs, stored inline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillPath {
    verbs: SmallVec<[PathVerb; 6]>,
}

impl FillPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every verb so the buffer can be reused for the next shape.
    pub fn reset(&mut self) {
        self.verbs.clear();
    }

    /// Starts a new contour at `to`.
    pub fn move_to(&mut self, to: Point<Pixels>) {
        self.verbs.push(PathVerb::MoveTo(to));
    }

    /// Adds a straight segment to `to`.
    pub fn line_to(&mut self, to: Point<Pixels>) {
        self.verbs.push(PathVerb::LineTo(to));
    }

    /// Adds a cubic bezier segment ending at `to`.
    pub fn cubic_to(&mut self, ctrl_a: Point<Pixels>, ctrl_b: Point<Pixels>, to: Point<Pixels>) {
        self.verbs.push(PathVerb::CubicTo { ctrl_a, ctrl_b, to });
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        self.verbs.push(PathVerb::Close);
    }

    /// The recorded verbs, in order.
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// Returns true if nothing has been traced since the last reset.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Converts the path into a gpui path, translated by `origin`.
    ///
    /// Returns `None` when the path is empty or gpui cannot tessellate it.
    pub fn build(&self, origin: Point<Pixels>) -> Option<Path<Pixels>> {
        if self.verbs.is_empty() {
            return None;
        }

        let at = |p: Point<Pixels>| point(origin.x + p.x, origin.y + p.y);
        let mut builder = PathBuilder::fill();

        for verb in &self.verbs {
            match *verb {
                PathVerb::MoveTo(to) => builder.move_to(at(to)),
                PathVerb::LineTo(to) => builder.line_to(at(to)),
                PathVerb::CubicTo { ctrl_a, ctrl_b, to } => {
                    builder.cubic_bezier_to(at(to), at(ctrl_a), at(ctrl_b))
                }
                PathVerb::Close => builder.close(),
            }
        }

        builder.build().ok()
    }
}
