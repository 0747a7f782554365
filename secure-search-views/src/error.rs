//! Error types for page rendering

use thiserror::Error;

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Error, Debug)]
pub enum ViewError {
    /// Template rendering error
    #[error("Template rendering error: {0}")]
    RenderError(String),

    /// Template parsing error
    #[error("Template parsing error: {0}")]
    ParseError(String),

    /// IO error when loading templates
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<handlebars::RenderError> for ViewError {
    fn from(err: handlebars::RenderError) -> Self {
        ViewError::RenderError(err.to_string())
    }
}

impl From<handlebars::TemplateError> for ViewError {
    fn from(err: handlebars::TemplateError) -> Self {
        ViewError::ParseError(err.to_string())
    }
}
