//! Card canvas settings

/// Size and formatting of the rendered SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    pub width: f64,
    pub height: f64,
    /// Emit the `<?xml ...?>` declaration
    pub standalone: bool,
    pub pretty_print: bool,
    /// Prepended to every CSS class, e.g. `card-hotspot`
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 640.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("card-".to_string()),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, one element per line
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_card_canvas() {
        let config = SvgConfig::new();
        assert!(config.height > config.width);
        assert_eq!(config.class_prefix.as_deref(), Some("card-"));
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig::new().with_pretty_print(false);
        assert!(!config.pretty_print);
        assert!(config.standalone);
    }
}
