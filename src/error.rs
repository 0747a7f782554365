// Error types for the application layer

use secure_search_config::ConfigError;
use secure_search_core::Error as HttpError;
use secure_search_views::ViewError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Flash cookie rejected: {0}")]
    Flash(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Http(inner) => inner,
            AppError::View(e) => HttpError::Render(e.to_string()),
            AppError::Io(e) => HttpError::Io(e),
            other => HttpError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_errors_keep_their_status() {
        let err: HttpError = AppError::Http(HttpError::BadRequest("bad form".into())).into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_view_errors_become_500() {
        let err: HttpError = AppError::View(ViewError::RenderError("boom".into())).into();
        assert!(matches!(err, HttpError::Render(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_flash_errors_are_internal() {
        let err: HttpError = AppError::Flash("bad key".into()).into();
        assert_eq!(err.status_code(), 500);
    }
}
