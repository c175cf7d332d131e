use std::{fs, path::Path, sync::LazyLock};

use anyhow::Context as _;
use gpui::{Global, Hsla, Pixels, Rgba, SharedString};
use gpui_rounded_background::{RoundedBackgroundStyle, StyleError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::deserializers::{de_palette, de_pixels};

/// Errors produced while loading a [`HighlightConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("invalid highlight config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The span section describes an impossible style.
    #[error("invalid span style: {0}")]
    Style(#[from] StyleError),
}

/// Complete highlight configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HighlightConfig {
    pub name: SharedString,
    pub span: SpanConfig,
    pub text: TextConfig,
    /// Colors a span may be painted with.
    #[serde(deserialize_with = "de_palette")]
    pub palette: SmallVec<[Rgba; 6]>,
}

/// The configuration shipped with the crate, parsed on first use.
static BUILTIN: LazyLock<HighlightConfig> = LazyLock::new(|| {
    HighlightConfig::from_json(include_str!("../../config/default.json"))
        .expect("built-in highlight config is valid")
});

impl HighlightConfig {
    /// The configuration shipped with the crate.
    pub fn builtin() -> &'static HighlightConfig {
        &BUILTIN
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<HighlightConfig, ConfigError> {
        let config: HighlightConfig = serde_json::from_str(json.as_ref())?;
        config.span_style(config.span.color)?;
        Ok(config)
    }

    /// Reads a JSON configuration from disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<HighlightConfig> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("could not read highlight config at {path:?}"))?;
        let config = Self::from_json(json)
            .with_context(|| format!("could not load highlight config at {path:?}"))?;

        log::debug!("loaded highlight config {:?} from {path:?}", config.name);
        Ok(config)
    }

    /// Builds the span style of this configuration painted with `color`.
    pub fn span_style(&self, color: impl Into<Hsla>) -> Result<RoundedBackgroundStyle, StyleError> {
        RoundedBackgroundStyle::new(color, self.span.padding, self.span.corner_radius)
    }

    /// The span style with the configured default color.
    pub fn default_span_style(&self) -> Result<RoundedBackgroundStyle, StyleError> {
        self.span_style(self.span.color)
    }
}

impl AsRef<HighlightConfig> for HighlightConfig {
    fn as_ref(&self) -> &HighlightConfig {
        self
    }
}

impl Global for HighlightConfig {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpanConfig {
    pub color: Rgba,
    #[serde(deserialize_with = "de_pixels")]
    pub padding: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub corner_radius: Pixels,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TextConfig {
    pub font_family: SharedString,
    #[serde(deserialize_with = "de_pixels")]
    pub size: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub line_height: Pixels,
    pub color: Rgba,
}
