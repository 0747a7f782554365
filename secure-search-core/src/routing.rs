// Routing system for HTTP requests

use crate::{Error, HttpMethod, HttpRequest, HttpResponse, server::error_response};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;

/// Boxed future returned by a route handler
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// A route handler function type
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Route definition with handler
#[derive(Clone)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub handler: HandlerFn,
}

/// Router for managing routes and dispatching requests
#[derive(Clone, Default)]
pub struct Router {
    pub routes: Vec<Route>,
    /// Headers added to every response, error responses included
    pub default_headers: Vec<(String, String)>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            default_headers: Vec::new(),
        }
    }

    /// Add a header to every response unless the handler already set it
    pub fn default_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.default_headers.push((name.into(), value.into()));
    }

    pub fn apply_default_headers(&self, mut response: HttpResponse) -> HttpResponse {
        for (name, value) in &self.default_headers {
            if response.header(name).is_none() {
                response.headers.insert(name.clone(), value.clone());
            }
        }
        response
    }

    /// Route the request and always produce a response: errors become
    /// plain-text error pages, and default headers are applied.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        let method = request.method.clone();
        let path = request.path.split('?').next().unwrap_or_default().to_string();

        let response = match self.route(request).await {
            Ok(response) => {
                info!(%method, %path, status = response.status, "request handled");
                response
            }
            Err(err) => error_response(&method, &path, err),
        };

        self.apply_default_headers(response)
    }

    /// Add a route to the router
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Register an async handler for `method` + `path`
    pub fn on<F, Fut>(&mut self, method: HttpMethod, path: &str, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.add_route(Route {
            method,
            path: path.to_string(),
            handler: Arc::new(move |req: HttpRequest| -> HandlerFuture {
                let handler = handler.clone();
                Box::pin(async move { handler(req).await })
            }),
        });
    }

    pub fn get<F, Fut>(&mut self, path: &str, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.on(HttpMethod::GET, path, handler);
    }

    pub fn post<F, Fut>(&mut self, path: &str, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.on(HttpMethod::POST, path, handler);
    }

    /// Find a route that matches the request and run it.
    ///
    /// A known path requested with the wrong method is a 405, an unknown path
    /// a 404.
    pub async fn route(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        let (path, query_string) = match request.path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (request.path.clone(), None),
        };

        if let Some(query) = query_string {
            request.query_params = parse_query_string(&query);
        }
        request.path = path.clone();

        let mut path_known = false;
        for route in &self.routes {
            if route.path != path {
                continue;
            }
            path_known = true;

            if route.method.as_str() == request.method {
                return (route.handler)(request).await;
            }
        }

        if path_known {
            Err(Error::MethodNotAllowed(format!("{} {}", request.method, path)))
        } else {
            Err(Error::RouteNotFound(format!("{} {}", request.method, path)))
        }
    }
}

/// Parse a query string into a map of decoded parameters
fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let mut split = part.splitn(2, '=');
            let key = decode_component(split.next()?);
            let value = decode_component(split.next().unwrap_or(""));
            Some((key, value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
