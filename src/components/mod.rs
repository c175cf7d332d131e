mod highlighted_text;
pub use highlighted_text::HighlightedText;
