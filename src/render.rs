// Page rendering seam

use secure_search_views::{Page, ViewEngine, ViewError};
use serde_json::Value;

/// Produces the HTML for a page from its data
pub trait Renderer: Send + Sync {
    fn render(&self, page: Page, data: &Value) -> Result<String, ViewError>;
}

impl Renderer for ViewEngine {
    fn render(&self, page: Page, data: &Value) -> Result<String, ViewError> {
        self.render_page(page, data)
    }
}
