use std::{cell::RefCell, ops::Range, rc::Rc};

use gpui::{
    App, AvailableSpace, Bounds, Element, ElementId, Font, GlobalElementId, Hsla,
    InspectorElementId, IntoElement, LayoutId, LineLayout, Pixels, SharedString, Style, TextAlign,
    TextRun, Window, WrapBoundary, WrappedLine, point, size,
};
use gpui_rounded_background::{
    BackgroundCanvas, LineBackgroundRenderer, LineGeometry, LineShape, RenderError,
    RoundedBackgroundStyle, TextMeasurer, WindowCanvas,
};
use smallvec::SmallVec;

use crate::config::HighlightConfig;

/// Text painted over a rounded background that follows its line wrapping.
///
/// Every visual line gets its own rounded rectangle, and consecutive lines are
/// joined so the span reads as a single highlighter stroke. Unset properties fall
/// back to the global [`HighlightConfig`].
pub struct HighlightedText {
    id: ElementId,
    text: SharedString,
    style: Option<RoundedBackgroundStyle>,
    text_color: Option<Hsla>,
    text_size: Option<Pixels>,
    line_height: Option<Pixels>,
    font_family: Option<SharedString>,
}

impl HighlightedText {
    pub fn new(id: impl Into<ElementId>, text: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            style: None,
            text_color: None,
            text_size: None,
            line_height: None,
            font_family: None,
        }
    }

    /// Sets the background style of the span.
    pub fn style(mut self, style: RoundedBackgroundStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn text_color(mut self, color: impl Into<Hsla>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn text_size(mut self, size: Pixels) -> Self {
        self.text_size = Some(size);
        self
    }

    pub fn line_height(mut self, line_height: Pixels) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn font_family(mut self, family: impl Into<SharedString>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    fn resolve(&self, window: &Window, cx: &App) -> ResolvedHighlight {
        let config = cx
            .try_global::<HighlightConfig>()
            .unwrap_or_else(|| HighlightConfig::builtin());

        let style = match self.style {
            Some(style) => Some(style),
            None => match config.default_span_style() {
                Ok(style) => Some(style),
                Err(err) => {
                    log::warn!("highlight config {:?} has no usable span style: {err}", config.name);
                    None
                }
            },
        };

        let mut font = window.text_style().font();
        font.family = self
            .font_family
            .clone()
            .unwrap_or_else(|| config.text.font_family.clone());

        ResolvedHighlight {
            style,
            font,
            font_size: self.text_size.unwrap_or(config.text.size),
            line_height: self.line_height.unwrap_or(config.text.line_height),
            text_color: self.text_color.unwrap_or_else(|| config.text.color.into()),
            shaped: Rc::default(),
        }
    }
}

/// Lines shaped by the layout pass, kept for prepaint.
struct ShapedText {
    /// Box width the lines were wrapped for, `None` when unconstrained.
    width: Option<Pixels>,
    /// Widest unwrapped line plus padding.
    content_width: Pixels,
    lines: Vec<WrappedLine>,
}

impl ShapedText {
    /// Returns true if shaping again for a box of `width` would give the same lines.
    fn fits(&self, width: Pixels) -> bool {
        self.width == Some(width)
            || (width >= self.content_width
                && self.lines.iter().all(|line| line.wrap_boundaries.is_empty()))
    }
}

/// Properties of a [`HighlightedText`] resolved against the global config during
/// layout.
#[derive(Clone)]
pub struct ResolvedHighlight {
    style: Option<RoundedBackgroundStyle>,
    font: Font,
    font_size: Pixels,
    line_height: Pixels,
    text_color: Hsla,
    shaped: Rc<RefCell<Option<ShapedText>>>,
}

impl ResolvedHighlight {
    fn padding(&self) -> Pixels {
        self.style.map_or(Pixels::ZERO, |style| style.padding())
    }

    /// Shapes `text` wrapped so that the padded background fits in `width`.
    fn shape(&self, text: &SharedString, width: Option<Pixels>, window: &Window) -> Vec<WrappedLine> {
        if text.is_empty() {
            return Vec::new();
        }

        let wrap_width = width.map(|width| (width - self.padding() * 2.0).max(Pixels::ZERO));
        let run = TextRun {
            len: text.len(),
            font: self.font.clone(),
            color: self.text_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        window
            .text_system()
            .shape_text(text.clone(), self.font_size, &[run], wrap_width, None)
            .map(|lines| lines.into_vec())
            .unwrap_or_default()
    }
}

/// Wrapped lines shaped against the final bounds.
pub struct HighlightedTextPrepaintState {
    lines: Vec<WrappedLine>,
}

/// Measures slices of one logical line from its unwrapped layout.
struct LineLayoutMeasurer<'a> {
    layout: &'a LineLayout,
    line_start: usize,
}

impl TextMeasurer for LineLayoutMeasurer<'_> {
    fn measure(&self, _text: &str, range: Range<usize>) -> Pixels {
        let start = range.start.saturating_sub(self.line_start);
        let end = range.end.saturating_sub(self.line_start);
        self.layout.x_for_index(end) - self.layout.x_for_index(start)
    }
}

/// One visual line, with its byte range over the whole text.
struct VisualLine<'a> {
    layout: &'a LineLayout,
    /// Byte offset of the logical line this visual line belongs to.
    line_start: usize,
    range: Range<usize>,
}

/// Byte offset, within its logical line, where a wrap boundary starts a new visual line.
fn boundary_offset(layout: &LineLayout, boundary: &WrapBoundary) -> usize {
    layout
        .runs
        .get(boundary.run_ix)
        .and_then(|run| run.glyphs.get(boundary.glyph_ix))
        .map_or(boundary.glyph_ix, |glyph| glyph.index)
}

/// Splits a logical line of `len` bytes at the given wrap offsets.
///
/// Offsets are clamped so the ranges stay ordered and cover `0..len` without gaps.
fn split_line(len: usize, boundaries: impl IntoIterator<Item = usize>) -> SmallVec<[Range<usize>; 2]> {
    let mut ranges = SmallVec::new();
    let mut start = 0;

    for boundary in boundaries {
        let end = boundary.clamp(start, len);
        ranges.push(start..end);
        start = end;
    }
    ranges.push(start..len);

    ranges
}

fn visual_lines(lines: &[WrappedLine]) -> Vec<VisualLine<'_>> {
    let mut visual = Vec::new();
    let mut line_start = 0;

    for line in lines {
        let layout: &LineLayout = &line.unwrapped_layout;
        let boundaries = line
            .wrap_boundaries
            .iter()
            .map(|boundary| boundary_offset(layout, boundary));

        for range in split_line(line.len(), boundaries) {
            visual.push(VisualLine {
                layout,
                line_start,
                range: line_start + range.start..line_start + range.end,
            });
        }

        // Shaping drops the newline between logical lines.
        line_start += line.len() + 1;
    }

    visual
}

fn visual_line_count(lines: &[WrappedLine]) -> usize {
    lines
        .iter()
        .map(|line| line.wrap_boundaries.len() + 1)
        .sum()
}

/// Draws the background of every visual line of `lines`, in order, as one pass.
///
/// Line boxes are `line_height` tall and stacked from `y = 0`; `x = 0` is where
/// the text starts.
fn paint_backgrounds(
    renderer: &mut LineBackgroundRenderer,
    canvas: &mut impl BackgroundCanvas,
    lines: &[WrappedLine],
    text: &str,
    line_height: Pixels,
    wrap_width: Pixels,
) -> Result<Vec<LineShape>, RenderError> {
    visual_lines(lines)
        .into_iter()
        .enumerate()
        .map(|(line_index, line)| {
            let measurer = LineLayoutMeasurer {
                layout: line.layout,
                line_start: line.line_start,
            };
            let half_leading = (line_height - line.layout.ascent - line.layout.descent) / 2.;
            let top = line_height * line_index as f32;

            renderer.draw_background(
                canvas,
                &measurer,
                &LineGeometry {
                    left: Pixels::ZERO,
                    right: wrap_width,
                    top,
                    baseline: top + half_leading + line.layout.ascent,
                    bottom: top + line_height,
                    text,
                    range: line.range,
                    line_index,
                },
            )
        })
        .collect()
}

impl IntoElement for HighlightedText {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for HighlightedText {
    type RequestLayoutState = ResolvedHighlight;
    type PrepaintState = HighlightedTextPrepaintState;

    fn id(&self) -> Option<ElementId> {
        Some(self.id.clone())
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let resolved = self.resolve(window, cx);
        let text = self.text.clone();

        let layout_id = window.request_measured_layout(Style::default(), {
            let resolved = resolved.clone();
            move |known_dimensions, available_space, window, _cx| {
                let width = known_dimensions.width.or(match available_space.width {
                    AvailableSpace::Definite(x) => Some(x),
                    _ => None,
                });

                let lines = resolved.shape(&text, width, window);
                let height = resolved.line_height * visual_line_count(&lines) as f32;

                let content_width = lines
                    .iter()
                    .map(|line| line.unwrapped_layout.width)
                    .fold(Pixels::ZERO, |a, b| if b > a { b } else { a })
                    + resolved.padding() * 2.0;

                let result_width = match (known_dimensions.width, width) {
                    (Some(known), _) => known,
                    (None, Some(available)) => content_width.min(available),
                    (None, None) => content_width,
                };

                resolved.shaped.replace(Some(ShapedText {
                    width,
                    content_width,
                    lines,
                }));
                size(result_width, height)
            }
        });

        (layout_id, resolved)
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        _cx: &mut App,
    ) -> Self::PrepaintState {
        let width = bounds.size.width;
        let lines = match request_layout.shaped.take() {
            Some(shaped) if shaped.fits(width) => shaped.lines,
            _ => request_layout.shape(&self.text, Some(width), window),
        };

        HighlightedTextPrepaintState { lines }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let resolved = &*request_layout;
        let line_height = resolved.line_height;
        let text_origin = point(bounds.left() + resolved.padding(), bounds.top());
        let wrap_width = (bounds.size.width - resolved.padding() * 2.0).max(Pixels::ZERO);

        if let Some(style) = resolved.style {
            // One paint is one pass over the span, so every frame starts fresh.
            let mut renderer = LineBackgroundRenderer::new(style);
            let mut canvas = WindowCanvas::new(window, text_origin);

            if let Err(err) = paint_backgrounds(
                &mut renderer,
                &mut canvas,
                &prepaint.lines,
                &self.text,
                line_height,
                wrap_width,
            ) {
                log::error!("stopped painting highlight {:?}: {err}", self.id);
            }
        }

        let mut y_offset = bounds.top();
        for line in &prepaint.lines {
            line.paint(
                point(text_origin.x, y_offset),
                line_height,
                TextAlign::Left,
                Some(bounds),
                window,
                cx,
            )
            .ok();

            y_offset += line_height * (line.wrap_boundaries.len() + 1) as f32;
        }
    }
}
