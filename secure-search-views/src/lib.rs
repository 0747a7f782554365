//! Page rendering for the secure search application.
//!
//! Two pages are built in: `index` (the search form plus flashed messages)
//! and `results` (the accepted term). Either can be replaced by dropping a
//! template of the same name into the configured template directory.
//!
//! ```rust
//! use secure_search_views::{Page, ViewConfig, ViewEngine};
//! use serde_json::json;
//!
//! let engine = ViewEngine::new(ViewConfig::default()).unwrap();
//! let html = engine
//!     .render_page(Page::Results, &json!({"search_term": "hello world"}))
//!     .unwrap();
//! assert!(html.contains("hello world"));
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::ViewConfig;
pub use engine::{Page, ViewEngine};
pub use error::{Result, ViewError};
