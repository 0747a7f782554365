// Response hardening headers

use secure_search_core::Router;

/// Headers added to every response the application sends
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    pub content_type_options: String,
    pub xss_protection: String,
    pub frame_options: String,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self {
            content_type_options: "nosniff".to_string(),
            xss_protection: "1; mode=block".to_string(),
            frame_options: "DENY".to_string(),
        }
    }
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("X-Content-Type-Options", self.content_type_options.as_str()),
            ("X-XSS-Protection", self.xss_protection.as_str()),
            ("X-Frame-Options", self.frame_options.as_str()),
        ]
    }

    /// Register the headers as router defaults, so error pages carry them too
    pub fn install(&self, router: &mut Router) {
        for (name, value) in self.headers() {
            router.default_header(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secure_search_core::{HttpRequest, HttpResponse};

    #[tokio::test]
    async fn test_install_covers_errors() {
        let mut router = Router::new();
        router.get("/", |_req| async { Ok(HttpResponse::html("home")) });
        SecurityHeaders::new().install(&mut router);

        for path in ["/", "/missing"] {
            let response = router.handle(HttpRequest::new("GET", path)).await;
            assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
            assert_eq!(response.header("x-xss-protection"), Some("1; mode=block"));
            assert_eq!(response.header("x-frame-options"), Some("DENY"));
        }
    }
}
