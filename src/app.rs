// Application assembly

use crate::controller::SearchController;
use crate::render::Renderer;
use crate::security::SecurityHeaders;
use crate::{AppError, Result};
use secure_search_config::AppConfig;
use secure_search_core::{Error as HttpError, Router};
use secure_search_views::{ViewConfig, ViewEngine};
use std::sync::Arc;
use tracing::info;

/// Wire the controller onto `GET /` and `POST /search`
pub fn build_router(controller: SearchController) -> Router {
    let mut router = Router::new();

    let index = controller.clone();
    router.get("/", move |req| {
        let controller = index.clone();
        async move { controller.index(req).await.map_err(HttpError::from) }
    });

    router.post("/search", move |req| {
        let controller = controller.clone();
        async move { controller.search(req).await.map_err(HttpError::from) }
    });

    SecurityHeaders::new().install(&mut router);
    router
}

/// Build the full application from configuration
pub fn from_config(config: &AppConfig) -> Result<Router> {
    let mut view_config = ViewConfig::new().with_dev_mode(config.debug);
    if let Some(ref dir) = config.template_dir {
        view_config = view_config.with_template_dir(dir);
    }

    let renderer: Arc<dyn Renderer> = Arc::new(ViewEngine::new(view_config)?);
    info!(
        template_dir = ?config.template_dir,
        reload = config.debug,
        "views ready"
    );

    Ok(build_router(SearchController::new(
        renderer,
        config.secret_key.as_bytes(),
    )))
}

/// Resolve `host:port` to a socket address
pub async fn resolve_bind_address(config: &AppConfig) -> Result<std::net::SocketAddr> {
    let address = config.bind_address();
    tokio::net::lookup_host(&address)
        .await?
        .next()
        .ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("{} did not resolve to an address", address),
            ))
        })
}
