//! Corner fills that join two vertically stacked rounded rectangles.
//!
//! Every fill is traced around an anchor on the seam between the previous line's
//! bottom edge and the current line's top edge. With `t` the line top and `r` the
//! corner radius, the shapes look like this (y grows downwards):
//!
//! ```text
//!   LeftWedge              RightWedge
//!
//!   (x, t-r)                     (x, t-r)
//!   |\                               /|
//!   | >(x+r, t)           (x-r, t)<  |
//!   |/                               \|
//!   (x, t+r)                     (x, t+r)
//!
//!   BottomJoin             TopJoin
//!
//!        (x, t-r)
//!          |'.
//!   -------+---'--         -------+---.--
//!   (x-r, t)  (x+r, t)     (x-r, t)|.'(x+r, t)
//!                                  (x, t+r)
//! ```
//!
//! The joins use a cubic whose control points sit on the anchor's vertical, so the
//! inner side curves into the step between the two lines.

use gpui::{Pixels, Point, point};

use crate::FillPath;

/// Which connective shape to draw at a line seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CornerFill {
    /// Triangle on the shared left edge, `radius` above and below the seam.
    LeftWedge,
    /// The line grew: fill under the previous line's right edge, curving upwards.
    BottomJoin,
    /// The line shrank: fill at the current line's right edge, curving downwards.
    TopJoin,
    /// Same width: triangle on the shared right edge.
    RightWedge,
}

impl CornerFill {
    /// Picks the right-hand fill for a seam from the previous and current widths.
    ///
    /// Exactly one variant is returned for every pair: `<` grows, `>` shrinks,
    /// anything else (equal) is the unchanged wedge.
    pub fn for_widths(previous_width: Pixels, width: Pixels) -> Self {
        if previous_width < width {
            CornerFill::BottomJoin
        } else if previous_width > width {
            CornerFill::TopJoin
        } else {
            CornerFill::RightWedge
        }
    }

    /// Traces this fill into `path`, replacing whatever it held.
    ///
    /// `anchor` is the point on the seam the shape is built around: its x is the
    /// relevant edge, its y the current line's top.
    pub fn trace(self, path: &mut FillPath, anchor: Point<Pixels>, radius: Pixels) {
        let Point { x, y: top } = anchor;
        path.reset();

        match self {
            CornerFill::LeftWedge => {
                path.move_to(point(x, top + radius));
                path.line_to(point(x, top - radius));
                path.line_to(point(x + radius, top));
                path.line_to(point(x, top + radius));
            }
            CornerFill::BottomJoin => {
                path.move_to(point(x + radius, top));
                path.line_to(point(x - radius, top));
                path.line_to(point(x, top - radius));
                path.cubic_to(
                    point(x, top - radius),
                    point(x, top),
                    point(x + radius, top),
                );
            }
            CornerFill::TopJoin => {
                path.move_to(point(x + radius, top));
                path.line_to(point(x - radius, top));
                path.line_to(point(x, top + radius));
                path.cubic_to(
                    point(x, top + radius),
                    point(x, top),
                    point(x + radius, top),
                );
            }
            CornerFill::RightWedge => {
                path.move_to(point(x, top - radius));
                path.line_to(point(x, top + radius));
                path.line_to(point(x - radius, top));
                path.line_to(point(x, top - radius));
            }
        }

        path.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathVerb;
    use gpui::px;

    #[test]
    fn test_for_widths_is_exhaustive() {
        let widths = [px(0.), px(90.), px(110.), px(120.)];

        for &previous in &widths {
            for &current in &widths {
                let expected = if previous < current {
                    CornerFill::BottomJoin
                } else if previous > current {
                    CornerFill::TopJoin
                } else {
                    CornerFill::RightWedge
                };
                assert_eq!(CornerFill::for_widths(previous, current), expected);
            }
        }
    }

    #[test]
    fn test_left_wedge_spans_radius_around_seam() {
        let mut path = FillPath::new();
        CornerFill::LeftWedge.trace(&mut path, point(px(-5.), px(20.)), px(5.));

        assert_eq!(
            path.verbs(),
            &[
                PathVerb::MoveTo(point(px(-5.), px(25.))),
                PathVerb::LineTo(point(px(-5.), px(15.))),
                PathVerb::LineTo(point(px(0.), px(20.))),
                PathVerb::LineTo(point(px(-5.), px(25.))),
                PathVerb::Close,
            ]
        );
    }

    #[test]
    fn test_bottom_join_curves_above_seam() {
        let mut path = FillPath::new();
        CornerFill::BottomJoin.trace(&mut path, point(px(105.), px(20.)), px(5.));

        assert_eq!(
            path.verbs(),
            &[
                PathVerb::MoveTo(point(px(110.), px(20.))),
                PathVerb::LineTo(point(px(100.), px(20.))),
                PathVerb::LineTo(point(px(105.), px(15.))),
                PathVerb::CubicTo {
                    ctrl_a: point(px(105.), px(15.)),
                    ctrl_b: point(px(105.), px(20.)),
                    to: point(px(110.), px(20.)),
                },
                PathVerb::Close,
            ]
        );
    }

    #[test]
    fn test_top_join_curves_below_seam() {
        let mut path = FillPath::new();
        CornerFill::TopJoin.trace(&mut path, point(px(85.), px(20.)), px(5.));

        assert_eq!(path.verbs()[2], PathVerb::LineTo(point(px(85.), px(25.))));
        assert_eq!(
            path.verbs()[3],
            PathVerb::CubicTo {
                ctrl_a: point(px(85.), px(25.)),
                ctrl_b: point(px(85.), px(20.)),
                to: point(px(90.), px(20.)),
            }
        );
    }

    #[test]
    fn test_trace_overwrites_previous_shape() {
        let mut path = FillPath::new();
        CornerFill::BottomJoin.trace(&mut path, point(px(105.), px(20.)), px(5.));
        CornerFill::RightWedge.trace(&mut path, point(px(85.), px(40.)), px(5.));

        assert_eq!(path.verbs().len(), 5);
        assert_eq!(path.verbs()[0], PathVerb::MoveTo(point(px(85.), px(35.))));
    }
}
