//! Request handlers for the two pages.

use crate::flash::{FlashMessages, Notifier, Severity};
use crate::render::Renderer;
use crate::{FLASH_COOKIE, Result};
use secure_search_core::{HttpRequest, HttpResponse};
use secure_search_input::{Screening, Verdict, screen};
use secure_search_views::Page;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Serves the search form and screens submitted terms
#[derive(Clone)]
pub struct SearchController {
    renderer: Arc<dyn Renderer>,
    secret: Arc<[u8]>,
}

impl SearchController {
    pub fn new(renderer: Arc<dyn Renderer>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            renderer,
            secret: Arc::from(secret.as_ref()),
        }
    }

    /// `GET /`: the form, with any messages left by a rejected search
    pub async fn index(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut flashes = FlashMessages::from_request(&request, &self.secret);
        let messages = flashes.take();

        let body = self.renderer.render(Page::Index, &json!({ "messages": messages }))?;
        let response = HttpResponse::html(body);

        if request.cookie(FLASH_COOKIE).is_some() {
            Ok(response.with_cookie(&FlashMessages::clear_cookie()))
        } else {
            Ok(response)
        }
    }

    /// `POST /search`: screen the term, then either show it or bounce back
    /// to the form with a warning.
    ///
    /// A missing or undecodable `search_term` is screened as the empty string;
    /// a repeated one uses its first value.
    pub async fn search(&self, request: HttpRequest) -> Result<HttpResponse> {
        let raw = request.form_value("search_term").unwrap_or_default();
        let Screening { verdict, rule } = screen(&raw);

        match verdict {
            Verdict::Accepted(term) => {
                info!(length = term.chars().count(), "search term accepted");
                let body = self
                    .renderer
                    .render(Page::Results, &json!({ "search_term": term }))?;
                Ok(HttpResponse::html(body))
            }
            Verdict::Rejected(rejection) => {
                warn!(kind = rejection.kind(), rule = rule.unwrap_or("-"), "search term rejected");

                let mut flashes = FlashMessages::from_request(&request, &self.secret);
                flashes.flash(rejection.user_message(), Severity::Error);

                Ok(HttpResponse::redirect("/").with_cookie(&flashes.to_cookie(&self.secret)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secure_search_views::ViewError;
    use serde_json::Value;
    use std::sync::Mutex;

    const SECRET: &[u8] = b"controller-test-secret-key";

    /// Records what it was asked to render
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(Page, Value)>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, page: Page, data: &Value) -> std::result::Result<String, ViewError> {
            self.calls.lock().unwrap().push((page, data.clone()));
            Ok(format!("{:?}", page))
        }
    }

    fn controller() -> (SearchController, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::default());
        (SearchController::new(renderer.clone(), SECRET), renderer)
    }

    fn post(body: &str) -> HttpRequest {
        HttpRequest::new("POST", "/search")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(body)
    }

    #[tokio::test]
    async fn test_accepted_term_renders_results() {
        let (controller, renderer) = controller();
        let response = controller.search(post("search_term=it%27s+%3Cb%3Ebold%3C%2Fb%3E")).await.unwrap();

        assert_eq!(response.status, 200);
        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls[0].0, Page::Results);
        assert_eq!(calls[0].1["search_term"], "it&#x27;s bold");
    }

    #[tokio::test]
    async fn test_rejected_term_redirects_with_flash() {
        let (controller, renderer) = controller();
        let response = controller
            .search(post("search_term=%3Cscript%3Ealert(1)%3C%2Fscript%3E"))
            .await
            .unwrap();

        assert_eq!(response.status, 302);
        assert_eq!(response.header("location"), Some("/"));
        assert!(renderer.calls.lock().unwrap().is_empty());

        let cookie = &response.cookies[0];
        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let mut flashes = FlashMessages::decode(value, SECRET).unwrap();
        let messages = flashes.take();
        assert_eq!(messages[0].category, Severity::Error);
        assert_eq!(
            messages[0].message,
            "Potential XSS attack detected. Input cleared for security."
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_empty_term() {
        let (controller, _) = controller();
        let response = controller.search(post("")).await.unwrap();
        assert_eq!(response.status, 302);
    }

    #[tokio::test]
    async fn test_repeated_field_uses_first_value() {
        let (controller, renderer) = controller();
        let response = controller
            .search(post("search_term=hello&search_term=world"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(renderer.calls.lock().unwrap()[0].1["search_term"], "hello");
    }

    #[tokio::test]
    async fn test_index_without_cookie_sets_nothing() {
        let (controller, renderer) = controller();
        let response = controller.index(HttpRequest::new("GET", "/")).await.unwrap();

        assert!(response.cookies.is_empty());
        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls[0].0, Page::Index);
        assert_eq!(calls[0].1["messages"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_index_consumes_cookie() {
        let (controller, renderer) = controller();
        let mut pending = FlashMessages::new();
        pending.flash("Invalid input: Search term cannot be empty".into(), Severity::Error);
        let cookie = format!("flash={}", pending.encode(SECRET).unwrap());

        let response = controller
            .index(HttpRequest::new("GET", "/").with_header("Cookie", cookie))
            .await
            .unwrap();

        assert!(response.cookies[0].starts_with("flash=;"));
        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls[0].1["messages"][0]["category"], "error");
        assert_eq!(
            calls[0].1["messages"][0]["message"],
            "Invalid input: Search term cannot be empty"
        );
    }
}
