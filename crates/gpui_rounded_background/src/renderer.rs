use gpui::{Bounds, Pixels, point};
use smallvec::SmallVec;

use crate::{
    BackgroundCanvas, CornerFill, FillPath, LineGeometry, RenderError, RoundedBackgroundStyle,
    TextMeasurer,
};

/// Computed width and right edge of the last line drawn in the current pass.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PreviousLine {
    width: Pixels,
    right_edge: Pixels,
}

/// Continuity state of one rendering pass over a span.
#[derive(Clone, Copy, Debug, Default)]
struct PassState {
    last_line_index: Option<usize>,
    previous: Option<PreviousLine>,
    /// State as it was before `previous` was committed; restored when the last
    /// line is drawn again.
    before_previous: Option<PreviousLine>,
}

/// What [`LineBackgroundRenderer::render_line`] drew for one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    /// Index of the line within the span.
    pub line_index: usize,
    /// Measured text width plus padding on both sides.
    pub actual_width: Pixels,
    /// Width after smoothing against the previous line.
    pub width: Pixels,
    /// Bounds of the rounded rectangle, in span-local coordinates.
    pub bounds: Bounds<Pixels>,
    /// Connective corner fills drawn after the rectangle, in order.
    pub corner_fills: SmallVec<[CornerFill; 2]>,
}

/// Applies the width smoothing rule for a line following one of `previous_width`.
///
/// Widths closer than one corner diameter are pulled together: a slightly narrower
/// line snaps to the previous width, a slightly wider line overshoots so the corner
/// fill has room. The first line of a pass (`None`) is never smoothed.
pub fn smooth_width(
    previous_width: Option<Pixels>,
    actual_width: Pixels,
    corner_radius: Pixels,
) -> Pixels {
    let Some(previous_width) = previous_width else {
        return actual_width;
    };

    let diameter = corner_radius * 2.0;
    let delta = (previous_width - actual_width).abs();

    if actual_width < previous_width && delta < diameter {
        previous_width
    } else if actual_width > previous_width && delta < diameter {
        actual_width + (diameter - delta)
    } else {
        actual_width
    }
}

/// Draws the rounded background of a span one visual line at a time.
///
/// The host calls [`render_line`](Self::render_line) (or
/// [`draw_background`](Self::draw_background)) for lines `0, 1, 2, ...` of one
/// pass. Line 0 always starts a new pass. Drawing the last line again is allowed
/// and reproduces the same output; any other order is rejected.
///
/// One renderer belongs to one span. It is not meant to be shared between
/// concurrent passes.
#[derive(Debug)]
pub struct LineBackgroundRenderer {
    style: RoundedBackgroundStyle,
    state: PassState,
    path: FillPath,
}

impl LineBackgroundRenderer {
    /// Creates a renderer for a span drawn with `style`.
    pub fn new(style: RoundedBackgroundStyle) -> Self {
        Self {
            style,
            state: PassState::default(),
            path: FillPath::new(),
        }
    }

    /// Forgets the previous line, as if no line had been drawn yet.
    pub fn reset(&mut self) {
        self.state = PassState::default();
    }

    /// Smoothed width of the last drawn line, if any.
    pub fn previous_width(&self) -> Option<Pixels> {
        self.state.previous.map(|previous| previous.width)
    }

    /// Right edge of the last drawn line, if any.
    pub fn previous_right_edge(&self) -> Option<Pixels> {
        self.state.previous.map(|previous| previous.right_edge)
    }

    /// Measures the line's text with `measurer` and draws its background.
    pub fn draw_background(
        &mut self,
        canvas: &mut impl BackgroundCanvas,
        measurer: &impl TextMeasurer,
        line: &LineGeometry<'_>,
    ) -> Result<LineShape, RenderError> {
        let measured_text_width = measurer.measure(line.text, line.range.clone());
        self.render_line(
            canvas,
            measured_text_width,
            line.top,
            line.bottom,
            line.line_index,
        )
    }

    /// Draws the background of one line.
    ///
    /// Emits the line's rounded rectangle, then for every line after the first the
    /// left wedge and exactly one right-hand fill picked by comparing the previous
    /// and current (smoothed) widths.
    pub fn render_line(
        &mut self,
        canvas: &mut impl BackgroundCanvas,
        measured_text_width: Pixels,
        line_top: Pixels,
        line_bottom: Pixels,
        line_index: usize,
    ) -> Result<LineShape, RenderError> {
        self.begin_line(line_index)?;

        let padding = self.style.padding();
        let radius = self.style.corner_radius();
        let color = self.style.fill_color();
        let previous = self.state.previous;

        let actual_width = measured_text_width + padding * 2.0;
        let width = smooth_width(previous.map(|p| p.width), actual_width, radius);

        // Horizontal placement belongs to the host: the shape always starts one
        // padding to the left of the text origin.
        let shape_left = Pixels::ZERO - padding;
        let shape_right = shape_left + width;
        let bounds = Bounds::from_corners(
            point(shape_left, line_top),
            point(shape_right, line_bottom),
        );

        canvas.draw_rounded_rect(bounds, radius, color);

        let mut corner_fills = SmallVec::new();
        if let Some(previous) = previous {
            CornerFill::LeftWedge.trace(&mut self.path, point(shape_left, line_top), radius);
            canvas.draw_path(&self.path, color);
            corner_fills.push(CornerFill::LeftWedge);

            let fill = CornerFill::for_widths(previous.width, width);
            let anchor_x = match fill {
                CornerFill::BottomJoin => previous.right_edge,
                CornerFill::TopJoin | CornerFill::RightWedge => shape_right,
                CornerFill::LeftWedge => shape_left,
            };
            fill.trace(&mut self.path, point(anchor_x, line_top), radius);
            canvas.draw_path(&self.path, color);
            corner_fills.push(fill);
        }

        log::trace!(
            "line {line_index}: actual width {actual_width:?}, drawn width {width:?}, fills {corner_fills:?}"
        );

        self.state = PassState {
            last_line_index: Some(line_index),
            previous: Some(PreviousLine {
                width,
                right_edge: shape_right,
            }),
            before_previous: previous,
        };

        Ok(LineShape {
            line_index,
            actual_width,
            width,
            bounds,
            corner_fills,
        })
    }

    /// Checks the line order and prepares the continuity state for `line_index`.
    fn begin_line(&mut self, line_index: usize) -> Result<(), RenderError> {
        match self.state.last_line_index {
            _ if line_index == 0 => self.reset(),
            Some(last) if line_index == last + 1 => {}
            Some(last) if line_index == last => {
                self.state.previous = self.state.before_previous;
            }
            last => {
                let expected = last.map_or(0, |last| last + 1);
                log::warn!("rejected background for line {line_index}, expected line {expected}");
                return Err(RenderError::LineOutOfOrder {
                    expected,
                    actual: line_index,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, FixedAdvanceMeasurer, PathVerb, RecordingCanvas};
    use gpui::{Hsla, px, rgb};

    fn renderer(padding: f32, radius: f32) -> LineBackgroundRenderer {
        let style = RoundedBackgroundStyle::new(rgb(0x00ffff), px(padding), px(radius)).unwrap();
        LineBackgroundRenderer::new(style)
    }

    fn line_box(line_index: usize) -> (Pixels, Pixels) {
        let top = px(20.) * line_index as f32;
        (top, top + px(20.))
    }

    fn draw(
        renderer: &mut LineBackgroundRenderer,
        canvas: &mut RecordingCanvas,
        measured: f32,
        line_index: usize,
    ) -> LineShape {
        let (top, bottom) = line_box(line_index);
        renderer
            .render_line(canvas, px(measured), top, bottom, line_index)
            .unwrap()
    }

    fn path_at(canvas: &RecordingCanvas, index: usize) -> &FillPath {
        match &canvas.commands()[index] {
            DrawCommand::Path { path, .. } => path,
            other => panic!("expected a path, got {other:?}"),
        }
    }

    #[test]
    fn test_first_line_is_not_smoothed() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        let shape = draw(&mut renderer, &mut canvas, 100., 0);

        assert_eq!(shape.width, px(110.));
        assert_eq!(shape.actual_width, px(110.));
        assert!(shape.corner_fills.is_empty());
        assert_eq!(canvas.commands().len(), 1, "First line only draws its rectangle");
        assert_eq!(
            canvas.commands()[0],
            DrawCommand::RoundedRect {
                bounds: Bounds::from_corners(point(px(-5.), px(0.)), point(px(105.), px(20.))),
                corner_radius: px(5.),
                color: Hsla::from(rgb(0x00ffff)),
            }
        );
    }

    #[test]
    fn test_smooth_width_snaps_slightly_narrower_line() {
        assert_eq!(smooth_width(Some(px(110.)), px(107.), px(5.)), px(110.));
        assert_eq!(smooth_width(Some(px(110.)), px(100.1), px(5.)), px(110.));
    }

    #[test]
    fn test_smooth_width_overshoots_slightly_wider_line() {
        let previous = px(110.);
        let actual = px(112.);
        let radius = px(5.);

        let expected = actual + (radius * 2.0 - (actual - previous));
        assert_eq!(smooth_width(Some(previous), actual, radius), expected);
        assert_eq!(expected, px(120.));
    }

    #[test]
    fn test_smooth_width_leaves_distant_widths_alone() {
        assert_eq!(smooth_width(Some(px(110.)), px(90.), px(5.)), px(90.));
        assert_eq!(smooth_width(Some(px(110.)), px(100.), px(5.)), px(100.));
        assert_eq!(smooth_width(Some(px(110.)), px(120.), px(5.)), px(120.));
        assert_eq!(smooth_width(Some(px(110.)), px(110.), px(5.)), px(110.));
        assert_eq!(smooth_width(None, px(42.), px(5.)), px(42.));
    }

    #[test]
    fn test_smooth_width_with_zero_radius() {
        assert_eq!(smooth_width(Some(px(110.)), px(109.), px(0.)), px(109.));
        assert_eq!(smooth_width(Some(px(110.)), px(111.), px(0.)), px(111.));
    }

    #[test]
    fn test_shrinking_line_draws_top_join() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        let shape = draw(&mut renderer, &mut canvas, 80., 1);

        assert_eq!(shape.actual_width, px(90.));
        assert_eq!(shape.width, px(90.));
        assert_eq!(
            shape.bounds,
            Bounds::from_corners(point(px(-5.), px(20.)), point(px(85.), px(40.)))
        );
        assert_eq!(
            shape.corner_fills.as_slice(),
            &[CornerFill::LeftWedge, CornerFill::TopJoin]
        );

        // rect0, rect1, left wedge, top join
        assert_eq!(canvas.commands().len(), 4);
        assert_eq!(
            path_at(&canvas, 2).verbs()[0],
            PathVerb::MoveTo(point(px(-5.), px(25.)))
        );
        assert_eq!(
            path_at(&canvas, 3).verbs()[0],
            PathVerb::MoveTo(point(px(90.), px(20.))),
            "Top join is anchored at the current right edge"
        );
        assert_eq!(renderer.previous_width(), Some(px(90.)));
        assert_eq!(renderer.previous_right_edge(), Some(px(85.)));
    }

    #[test]
    fn test_growing_line_draws_bottom_join() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        let shape = draw(&mut renderer, &mut canvas, 104., 1);

        assert_eq!(shape.actual_width, px(114.));
        assert_eq!(shape.width, px(120.));
        assert_eq!(
            shape.bounds,
            Bounds::from_corners(point(px(-5.), px(20.)), point(px(115.), px(40.)))
        );
        assert_eq!(
            shape.corner_fills.as_slice(),
            &[CornerFill::LeftWedge, CornerFill::BottomJoin]
        );
        assert_eq!(
            path_at(&canvas, 3).verbs()[2],
            PathVerb::LineTo(point(px(105.), px(15.))),
            "Bottom join is anchored at the previous right edge"
        );
    }

    #[test]
    fn test_snapped_line_draws_right_wedge() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        let shape = draw(&mut renderer, &mut canvas, 96., 1);

        assert_eq!(shape.width, px(110.));
        assert_eq!(
            shape.corner_fills.as_slice(),
            &[CornerFill::LeftWedge, CornerFill::RightWedge]
        );
        assert_eq!(
            path_at(&canvas, 3).verbs()[0],
            PathVerb::MoveTo(point(px(105.), px(15.)))
        );
    }

    #[test]
    fn test_every_following_line_draws_exactly_two_fills() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();
        let widths = [100., 80., 84., 200., 195., 195., 10.];

        for (line_index, &measured) in widths.iter().enumerate() {
            canvas.clear();
            let shape = draw(&mut renderer, &mut canvas, measured, line_index);

            if line_index == 0 {
                assert_eq!(canvas.commands().len(), 1);
                continue;
            }
            assert_eq!(canvas.commands().len(), 3, "line {line_index}");
            assert_eq!(shape.corner_fills.len(), 2);
            assert_eq!(shape.corner_fills[0], CornerFill::LeftWedge);
            assert_ne!(shape.corner_fills[1], CornerFill::LeftWedge);
        }
    }

    #[test]
    fn test_redrawing_last_line_is_idempotent() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        canvas.clear();
        let first = draw(&mut renderer, &mut canvas, 104., 1);
        let first_commands = canvas.commands().to_vec();

        canvas.clear();
        let second = draw(&mut renderer, &mut canvas, 104., 1);

        assert_eq!(first, second);
        assert_eq!(first_commands, canvas.commands());
    }

    #[test]
    fn test_line_zero_starts_a_new_pass() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        draw(&mut renderer, &mut canvas, 50., 1);

        canvas.clear();
        let shape = draw(&mut renderer, &mut canvas, 104., 0);

        assert_eq!(shape.width, px(114.));
        assert_eq!(canvas.commands().len(), 1);
    }

    #[test]
    fn test_skipped_line_is_rejected_without_side_effects() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        draw(&mut renderer, &mut canvas, 100., 0);
        canvas.clear();

        let (top, bottom) = line_box(2);
        let err = renderer
            .render_line(&mut canvas, px(80.), top, bottom, 2)
            .unwrap_err();

        assert_eq!(
            err,
            RenderError::LineOutOfOrder {
                expected: 1,
                actual: 2
            }
        );
        assert!(canvas.commands().is_empty());
        assert_eq!(renderer.previous_width(), Some(px(110.)));

        let shape = draw(&mut renderer, &mut canvas, 80., 1);
        assert_eq!(shape.corner_fills[1], CornerFill::TopJoin);
    }

    #[test]
    fn test_pass_must_start_at_line_zero() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();

        let err = renderer
            .render_line(&mut canvas, px(10.), px(0.), px(20.), 3)
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::LineOutOfOrder {
                expected: 0,
                actual: 3
            }
        );

        renderer.reset();
        assert_eq!(renderer.previous_width(), None);
    }

    #[test]
    fn test_draw_background_measures_line_slice() {
        let mut renderer = renderer(5., 5.);
        let mut canvas = RecordingCanvas::new();
        let measurer = FixedAdvanceMeasurer::new(px(10.));
        let text = "highlighted text wraps";

        let shape = renderer
            .draw_background(
                &mut canvas,
                &measurer,
                &LineGeometry {
                    left: px(0.),
                    right: px(200.),
                    top: px(0.),
                    baseline: px(16.),
                    bottom: px(20.),
                    text,
                    range: 0..12,
                    line_index: 0,
                },
            )
            .unwrap();

        assert_eq!(shape.actual_width, px(130.));
        assert_eq!(
            shape.bounds,
            Bounds::from_corners(point(px(-5.), px(0.)), point(px(125.), px(20.)))
        );
    }
}
