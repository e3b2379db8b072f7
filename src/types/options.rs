/// How the plugin treats framework style assets.
///
/// Only `Stub` and `Expose` inject extra rules; `Enabled` (the default) and
/// `Disabled` leave style handling to the existing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleMode {
    /// Styles are imported and processed normally.
    #[default]
    Enabled,
    /// Styles are not imported; nothing is injected.
    Disabled,
    /// Framework style assets are stubbed out with a null loader.
    Stub,
    /// Framework style assets are exposed through a dedicated resolver and
    /// style stage instead of the normal CSS chain.
    Expose,
}

/// Recognized plugin options with their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// Enable rule discovery and rewriting. Default `true`.
    pub auto_import: bool,
    /// Style asset handling. Default [`StyleMode::Enabled`].
    pub styles: StyleMode,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            auto_import: true,
            styles: StyleMode::Enabled,
        }
    }
}

impl PluginOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auto_import(mut self, enabled: bool) -> Self {
        self.auto_import = enabled;
        self
    }

    #[must_use]
    pub fn styles(mut self, mode: StyleMode) -> Self {
        self.styles = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = PluginOptions::new();
        assert!(opts.auto_import);
        assert_eq!(opts.styles, StyleMode::Enabled);
    }

    #[test]
    fn builder_overrides() {
        let opts = PluginOptions::new()
            .auto_import(false)
            .styles(StyleMode::Expose);
        assert!(!opts.auto_import);
        assert_eq!(opts.styles, StyleMode::Expose);
    }
}
