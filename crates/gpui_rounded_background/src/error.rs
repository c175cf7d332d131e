use thiserror::Error;

/// Rejected span style parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StyleError {
    /// Padding was negative, NaN or infinite.
    #[error("padding must be a finite, non-negative length (got {0})")]
    InvalidPadding(f32),
    /// Corner radius was negative, NaN or infinite.
    #[error("corner radius must be a finite, non-negative length (got {0})")]
    InvalidCornerRadius(f32),
}

/// Rejected line invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Lines of one pass must arrive as 0, 1, 2, ... (re-rendering the last
    /// line is allowed).
    #[error("line {actual} drawn out of order (expected line {expected})")]
    #[allow(missing_docs)]
    LineOutOfOrder { expected: usize, actual: usize },
}
