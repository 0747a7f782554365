//! Handlebars template engine wrapper

use crate::{Result, config::ViewConfig, error::ViewError};
use handlebars::Handlebars;
use parking_lot::RwLock;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");
const RESULTS_TEMPLATE: &str = include_str!("../templates/results.hbs");

/// The pages the application can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Search form with flashed messages
    Index,
    /// The accepted, sanitized term
    Results,
}

impl Page {
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Results => "results",
        }
    }
}

/// Handlebars-backed page renderer
#[derive(Clone)]
pub struct ViewEngine {
    handlebars: Arc<RwLock<Handlebars<'static>>>,
    config: ViewConfig,
}

impl ViewEngine {
    /// Build an engine with the built-in pages plus any overrides from the
    /// configured template directory
    pub fn new(config: ViewConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_mode);

        let engine = Self {
            handlebars: Arc::new(RwLock::new(handlebars)),
            config,
        };

        engine.load_templates(&mut engine.handlebars.write())?;

        Ok(engine)
    }

    /// Register the built-in pages, then overlay the template directory
    fn load_templates(&self, handlebars: &mut Handlebars<'static>) -> Result<()> {
        handlebars.register_template_string(Page::Index.template_name(), INDEX_TEMPLATE)?;
        handlebars.register_template_string(Page::Results.template_name(), RESULTS_TEMPLATE)?;

        if let Some(ref dir) = self.config.template_dir {
            if !dir.is_dir() {
                return Err(ViewError::ConfigError(format!(
                    "Template directory not found: {:?}",
                    dir
                )));
            }
            self.load_templates_from_dir(handlebars, dir, dir)?;
        }

        Ok(())
    }

    /// Load templates from a directory recursively
    fn load_templates_from_dir(
        &self,
        handlebars: &mut Handlebars<'static>,
        root: &Path,
        dir: &Path,
    ) -> Result<()> {
        let extension = self.config.template_extension.trim_start_matches('.');

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                self.load_templates_from_dir(handlebars, root, &path)?;
                continue;
            }

            if path.extension().is_some_and(|ext| ext == extension) {
                let template_name = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .with_extension("")
                    .to_string_lossy()
                    .replace('\\', "/");

                let content = fs::read_to_string(&path)?;
                debug!(template = %template_name, "registering template override");
                handlebars.register_template_string(&template_name, content)?;
            }
        }

        Ok(())
    }

    /// Render a registered template with data
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        if self.config.dev_mode {
            self.reload_templates()?;
        }

        self.handlebars
            .read()
            .render(template, data)
            .map_err(ViewError::from)
    }

    pub fn render_page<T: Serialize>(&self, page: Page, data: &T) -> Result<String> {
        self.render(page.template_name(), data)
    }

    /// Register a template from string
    pub fn register_template(&self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .write()
            .register_template_string(name, template)
            .map_err(ViewError::from)
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.read().has_template(name)
    }

    /// Drop everything and load the built-in pages and the directory again.
    ///
    /// Readers never observe the registry half-loaded.
    pub fn reload_templates(&self) -> Result<()> {
        let mut handlebars = self.handlebars.write();
        handlebars.clear_templates();
        self.load_templates(&mut handlebars)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_pages_registered() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        assert!(engine.has_template("index"));
        assert!(engine.has_template("results"));
    }

    #[test]
    fn test_render_index_with_messages() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        let html = engine
            .render_page(
                Page::Index,
                &json!({"messages": [{"category": "error", "message": "Nope"}]}),
            )
            .unwrap();

        assert!(html.contains("Secure Search Application"));
        assert!(html.contains(r#"id="search_term""#));
        assert!(html.contains(r#"name="search_term""#));
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains(r#"<div class="alert alert-error">Nope</div>"#));
    }

    #[test]
    fn test_render_index_without_messages() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        let html = engine.render_page(Page::Index, &json!({"messages": []})).unwrap();
        assert!(!html.contains("alert-error\">"));
    }

    #[test]
    fn test_message_text_is_escaped() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        let html = engine
            .render_page(
                Page::Index,
                &json!({"messages": [{"category": "info", "message": "<b>x</b>"}]}),
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn test_render_results_inserts_term_verbatim() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        let html = engine
            .render_page(Page::Results, &json!({"search_term": "fish &amp; chips"}))
            .unwrap();

        assert!(html.contains("Search Results"));
        assert!(html.contains("fish &amp; chips"));
        assert!(html.contains(r#"<a href="/">← Return to Home Page</a>"#));
    }

    #[test]
    fn test_directory_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("results.hbs"), "<p>{{{search_term}}}</p>").unwrap();

        let engine = ViewEngine::new(ViewConfig::new().with_template_dir(dir.path())).unwrap();
        let html = engine
            .render_page(Page::Results, &json!({"search_term": "rust"}))
            .unwrap();

        assert_eq!(html, "<p>rust</p>");
    }

    #[test]
    fn test_nested_templates_are_named_by_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("partials").join("footer.hbs"), "bye").unwrap();

        let engine = ViewEngine::new(ViewConfig::new().with_template_dir(dir.path())).unwrap();
        assert!(engine.has_template("partials/footer"));
    }

    #[test]
    fn test_missing_directory_is_config_error() {
        let result = ViewEngine::new(ViewConfig::new().with_template_dir("/no/such/dir/for/views"));
        assert!(matches!(result, Err(ViewError::ConfigError(_))));
    }

    #[test]
    fn test_dev_mode_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("results.hbs");
        fs::write(&file, "v1").unwrap();

        let engine = ViewEngine::new(
            ViewConfig::new()
                .with_template_dir(dir.path())
                .with_dev_mode(true),
        )
        .unwrap();
        assert_eq!(engine.render("results", &json!({})).unwrap(), "v1");

        fs::write(&file, "v2").unwrap();
        assert_eq!(engine.render("results", &json!({})).unwrap(), "v2");
    }

    #[test]
    fn test_dev_mode_renders_while_reloading() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("results.hbs"), "<p>{{{search_term}}}</p>").unwrap();

        let engine = ViewEngine::new(
            ViewConfig::new()
                .with_template_dir(dir.path())
                .with_dev_mode(true),
        )
        .unwrap();

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let html = engine
                            .render_page(Page::Results, &json!({"search_term": "x"}))
                            .unwrap();
                        assert_eq!(html, "<p>x</p>");
                        assert!(engine.has_template("index"));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let engine = ViewEngine::new(ViewConfig::new().with_strict_mode(true)).unwrap();
        engine.register_template("greet", "Hello {{name}}").unwrap();
        assert!(engine.render("greet", &json!({})).is_err());
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let engine = ViewEngine::new(ViewConfig::default()).unwrap();
        assert!(matches!(
            engine.render("missing", &json!({})),
            Err(ViewError::RenderError(_))
        ));
    }
}
