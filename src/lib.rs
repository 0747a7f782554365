//! # Secure Search
//!
//! A single search form that screens every submitted term for script and
//! SQL-injection payloads before echoing it back.
//!
//! - `GET /` renders the form together with any pending warnings.
//! - `POST /search` runs the term through [`secure_search_input::evaluate`].
//!   An accepted term is shown sanitized on the results page. A rejected term
//!   is dropped, and the browser is redirected home with a flashed warning.
//!
//! ```no_run
//! use secure_search::{AppConfig, app};
//! use secure_search_core::HttpRequest;
//!
//! # async fn run() -> secure_search::Result<()> {
//! let router = app::from_config(&AppConfig::default())?;
//! let response = router
//!     .handle(
//!         HttpRequest::new("POST", "/search")
//!             .with_header("Content-Type", "application/x-www-form-urlencoded")
//!             .with_body("search_term=rust"),
//!     )
//!     .await;
//! assert!(response.body_text().contains("rust"));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod controller;
pub mod error;
pub mod flash;
pub mod render;
pub mod security;

pub use controller::SearchController;
pub use error::{AppError, Result};
pub use flash::{
    FLASH_COOKIE, FlashMessage, FlashMessages, MAX_PENDING_MESSAGES, Notifier, Severity,
};
pub use render::Renderer;
pub use security::SecurityHeaders;

pub use secure_search_config::AppConfig;
