//! Configuration for the view engine

use std::path::PathBuf;

/// Configuration for the view engine
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Directory whose templates override the built-in pages
    pub template_dir: Option<PathBuf>,

    /// Template file extension (default: ".hbs")
    pub template_extension: String,

    /// Re-read the template directory on every render
    pub dev_mode: bool,

    /// Error on missing variables
    pub strict_mode: bool,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self {
            template_dir: None,
            template_extension: ".hbs".to_string(),
            dev_mode: false,
            strict_mode: false,
        }
    }

    /// Load override templates from `dir`
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.template_extension = ext.into();
        self
    }

    pub fn with_dev_mode(mut self, enable: bool) -> Self {
        self.dev_mode = enable;
        self
    }

    pub fn with_strict_mode(mut self, enable: bool) -> Self {
        self.strict_mode = enable;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert!(config.template_dir.is_none());
        assert_eq!(config.template_extension, ".hbs");
        assert!(!config.dev_mode);
        assert!(!config.strict_mode);
    }

    #[test]
    fn test_builder() {
        let config = ViewConfig::new()
            .with_template_dir("views")
            .with_extension(".html")
            .with_dev_mode(true)
            .with_strict_mode(true);

        assert_eq!(config.template_dir, Some(PathBuf::from("views")));
        assert_eq!(config.template_extension, ".html");
        assert!(config.dev_mode);
        assert!(config.strict_mode);
    }
}
