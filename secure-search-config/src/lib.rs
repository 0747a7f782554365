//! Configuration for the secure search application.
//!
//! Settings are resolved once at process start. Each source overrides the
//! one before it:
//!
//! 1. built-in defaults
//! 2. a TOML file named by `SECURE_SEARCH_CONFIG`
//! 3. a `.env` file in the working directory
//! 4. `SECURE_SEARCH_*` environment variables
//!
//! ```
//! use secure_search_config::AppConfig;
//!
//! let vars = vec![("SECURE_SEARCH_PORT".to_string(), "8080".to_string())];
//! let config = AppConfig::load_from(None, vars).unwrap();
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.host, "0.0.0.0");
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileConfig};
pub use settings::{
    AppConfig, CONFIG_PATH_VAR, ENV_PREFIX, MIN_SECRET_KEY_LEN, PLACEHOLDER_SECRET_KEY,
};
