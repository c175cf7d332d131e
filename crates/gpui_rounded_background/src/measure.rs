use std::ops::Range;

use gpui::Pixels;
use unicode_segmentation::UnicodeSegmentation;

/// Everything a host layout engine knows about one visual line of the span.
///
/// Only `top`, `bottom`, `line_index` and the measured width of `text[range]` feed
/// the background geometry. Horizontal placement stays with the host, so `left`,
/// `right` and `baseline` are carried for completeness only.
#[derive(Clone, Debug)]
pub struct LineGeometry<'a> {
    /// Left edge of the line box.
    pub left: Pixels,
    /// Right edge of the line box.
    pub right: Pixels,
    /// Top of the line box.
    pub top: Pixels,
    /// Baseline of the line's text.
    pub baseline: Pixels,
    /// Bottom of the line box.
    pub bottom: Pixels,
    /// Text of the whole span.
    pub text: &'a str,
    /// Byte range of this line within `text`.
    pub range: Range<usize>,
    /// Zero-based index of the line within the span.
    pub line_index: usize,
}

/// Measures the advance width of a slice of text.
pub trait TextMeasurer {
    /// Width of `text[range]`, excluding any padding.
    fn measure(&self, text: &str, range: Range<usize>) -> Pixels;
}

/// Monospace measurer: every grapheme cluster advances by the same amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Width of a single grapheme.
    pub advance: Pixels,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer with the given per-grapheme advance.
    pub fn new(advance: Pixels) -> Self {
        Self { advance }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, range: Range<usize>) -> Pixels {
        let count = text
            .get(range)
            .map_or(0, |slice| slice.graphemes(true).count());
        self.advance * count as f32
    }
}
