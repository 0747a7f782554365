// Application settings and their load order

use crate::env::EnvLoader;
use crate::loader::{ConfigLoader, FileConfig};
use crate::{ConfigError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefix for environment overrides, e.g. `SECURE_SEARCH_PORT`
pub const ENV_PREFIX: &str = "SECURE_SEARCH";

/// Environment variable naming a TOML file to load
pub const CONFIG_PATH_VAR: &str = "SECURE_SEARCH_CONFIG";

/// Development-only signing key. Never deploy with it.
pub const PLACEHOLDER_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Shortest accepted signing key, in bytes
pub const MIN_SECRET_KEY_LEN: usize = 16;

/// Process-start configuration for the application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// Signs the flash cookie
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Directory of template overrides
    pub template_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            secret_key: PLACEHOLDER_SECRET_KEY.to_string(),
            template_dir: None,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process: `SECURE_SEARCH_CONFIG` file, then `.env`, then
    /// `SECURE_SEARCH_*` variables. Later sources win.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::LoadError(format!(".env: {}", e))),
        }

        let file = env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(file.as_deref(), env::vars())
    }

    /// Load from an explicit file (if any) and an explicit set of variables
    pub fn load_from<I>(file: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();

        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            config.apply_file(ConfigLoader::load_file(path)?);
        }

        let overrides = EnvLoader::new(Some(ENV_PREFIX.to_string())).load_from(vars);
        config.apply_env(&overrides)?;

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(secret_key) = file.secret_key {
            self.secret_key = secret_key;
        }
        if let Some(dir) = file.template_dir {
            self.template_dir = Some(dir);
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        if let Some(format) = file.log_format {
            self.log_format = format;
        }
    }

    fn apply_env(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(host) = vars.get("host") {
            self.host = host.clone();
        }
        if let Some(port) = vars.get("port") {
            self.port = port.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!("{}_PORT: not a port number: {:?}", ENV_PREFIX, port))
            })?;
        }
        if let Some(debug) = vars.get("debug") {
            self.debug = parse_bool(debug).ok_or_else(|| {
                ConfigError::ParseError(format!("{}_DEBUG: not a boolean: {:?}", ENV_PREFIX, debug))
            })?;
        }
        if let Some(secret_key) = vars.get("secret_key") {
            self.secret_key = secret_key.clone();
        }
        if let Some(dir) = vars.get("template_dir") {
            self.template_dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }
        if let Some(level) = vars.get("log_level") {
            self.log_level = level.clone();
        }
        if let Some(format) = vars.get("log_format") {
            self.log_format = format.clone();
        }
        Ok(())
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ConfigError::ValidationError(
                "port must be non-zero".to_string(),
            ));
        }

        if self.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::ValidationError(format!(
                "secret_key must be at least {} bytes",
                MIN_SECRET_KEY_LEN
            )));
        }

        if self.is_placeholder_secret() {
            warn!("secret_key is the development placeholder; set SECURE_SEARCH_SECRET_KEY");
        }

        Ok(())
    }

    pub fn is_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET_KEY
    }

    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert!(config.is_placeholder_secret());
        assert_eq!(config.template_dir, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_load_without_sources_is_default() {
        let config = AppConfig::load_from(None, Vec::new()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "port = 8000\nhost = \"127.0.0.1\"\n").unwrap();

        let config = AppConfig::load_from(
            Some(&path),
            vars(&[("SECURE_SEARCH_PORT", "9000"), ("SECURE_SEARCH_DEBUG", "yes")]),
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.debug);
    }

    #[test]
    fn test_unprefixed_vars_are_ignored() {
        let config = AppConfig::load_from(None, vars(&[("PORT", "1234")])).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_bad_port_is_parse_error() {
        let result = AppConfig::load_from(None, vars(&[("SECURE_SEARCH_PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_bad_bool_is_parse_error() {
        let result = AppConfig::load_from(None, vars(&[("SECURE_SEARCH_DEBUG", "maybe")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_template_dir_clears_it() {
        let config = AppConfig::load_from(
            None,
            vars(&[("SECURE_SEARCH_TEMPLATE_DIR", "")]),
        )
        .unwrap();
        assert_eq!(config.template_dir, None);
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let zero_port = AppConfig {
            port: 0,
            ..AppConfig::default()
        };
        assert!(matches!(zero_port.validate(), Err(ConfigError::ValidationError(_))));

        let short_secret = AppConfig {
            secret_key: "short".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(short_secret.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_secret_is_not_serialized() {
        let config = AppConfig {
            secret_key: "0123456789abcdef-real".to_string(),
            ..AppConfig::default()
        };
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("0123456789abcdef-real"));
        assert!(rendered.contains("port = 5000"));
    }
}
