use gpui::App;

use crate::config::{HighlightConfig, HighlightConfigExt};

/// Installs the built-in highlight configuration unless one is already set.
pub fn init(cx: &mut App) {
    if !cx.has_global::<HighlightConfig>() {
        cx.set_highlight_config(HighlightConfig::builtin());
    }
}
