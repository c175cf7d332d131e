use gpui::{Hsla, Pixels};

use crate::StyleError;

/// Fill color, horizontal padding and corner radius of one highlighted span.
///
/// Created once when the highlighted region is defined and read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedBackgroundStyle {
    fill_color: Hsla,
    padding: Pixels,
    corner_radius: Pixels,
}

impl RoundedBackgroundStyle {
    /// Creates a style, rejecting negative or non-finite lengths.
    pub fn new(
        fill_color: impl Into<Hsla>,
        padding: Pixels,
        corner_radius: Pixels,
    ) -> Result<Self, StyleError> {
        if !is_valid_length(padding) {
            return Err(StyleError::InvalidPadding(padding.to_f64() as f32));
        }
        if !is_valid_length(corner_radius) {
            return Err(StyleError::InvalidCornerRadius(
                corner_radius.to_f64() as f32,
            ));
        }

        Ok(Self {
            fill_color: fill_color.into(),
            padding,
            corner_radius,
        })
    }

    /// Returns a copy of this style painted with another color.
    pub fn with_fill_color(self, fill_color: impl Into<Hsla>) -> Self {
        Self {
            fill_color: fill_color.into(),
            ..self
        }
    }

    /// The solid fill used for every shape of the span.
    pub fn fill_color(&self) -> Hsla {
        self.fill_color
    }

    /// Horizontal inset added on both sides of the measured text width.
    pub fn padding(&self) -> Pixels {
        self.padding
    }

    /// Rounding of the rectangles, also the size of the corner fills.
    pub fn corner_radius(&self) -> Pixels {
        self.corner_radius
    }
}

fn is_valid_length(value: Pixels) -> bool {
    let value = value.to_f64();
    value.is_finite() && value >= 0.0
}
