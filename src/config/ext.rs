use gpui::App;

use crate::config::HighlightConfig;

/// Extension trait for accessing and modifying the global highlight configuration.
pub trait HighlightConfigExt {
    /// Replaces the highlight configuration.
    fn set_highlight_config<T: AsRef<HighlightConfig>>(&mut self, config: T);

    /// Gets an immutable reference to the highlight configuration.
    fn highlight_config(&self) -> &HighlightConfig;
}

impl HighlightConfigExt for App {
    fn set_highlight_config<T: AsRef<HighlightConfig>>(&mut self, config: T) {
        self.set_global::<HighlightConfig>(config.as_ref().clone())
    }

    fn highlight_config(&self) -> &HighlightConfig {
        self.global()
    }
}
