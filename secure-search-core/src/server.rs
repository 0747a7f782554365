// HTTP server loop

use crate::{Error, HttpRequest, HttpResponse, Router};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// A bound listener ready to serve a router
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind to `addr`. Port 0 picks a free port.
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process is stopped
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. Connections already accepted run to
    /// completion on their own tasks.
    pub async fn serve_with_shutdown<S>(self, router: Router, shutdown: S) -> Result<(), Error>
    where
        S: Future<Output = ()>,
    {
        let router = Arc::new(router);
        info!(addr = %self.local_addr()?, "server listening");

        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                },
                _ = &mut shutdown => {
                    info!("shutdown signal received, no longer accepting connections");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let router = router.clone();
                    async move { Ok::<_, Infallible>(handle_request(req, router).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    debug!(%peer, error = %err, "error serving connection");
                }
            });
        }
    }
}

/// Handle an incoming HTTP request
async fn handle_request(req: Request<IncomingBody>, router: Arc<Router>) -> Response<Full<Bytes>> {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut request = HttpRequest::new(method, path);

    for (name, value) in req.headers() {
        if let Ok(value_str) = value.to_str() {
            request.headers.insert(name.to_string(), value_str.to_string());
        }
    }

    let response = match read_body(req).await {
        Ok(body) => {
            request.body = body;
            router.handle(request).await
        }
        Err(err) => {
            router.apply_default_headers(error_response(&request.method, &request.path, err))
        }
    };

    into_hyper(response)
}

async fn read_body(req: Request<IncomingBody>) -> Result<Vec<u8>, Error> {
    match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes().to_vec()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(Error::PayloadTooLarge(
            format!("request body exceeds {} bytes", MAX_BODY_BYTES),
        )),
        Err(e) => Err(Error::BadRequest(format!("failed to read request body: {}", e))),
    }
}

/// Turn a routing or handler error into a plain-text response
pub fn error_response(method: &str, path: &str, err: Error) -> HttpResponse {
    let status = err.status_code();
    if err.is_server_error() {
        error!(%method, %path, status, error = %err, "request failed");
    } else {
        warn!(%method, %path, status, error = %err, "request rejected");
    }
    HttpResponse::text(status, err.public_message())
}

fn into_hyper(response: HttpResponse) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(response.status);

    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    for cookie in &response.cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|e| {
            error!(error = %e, "invalid response head");
            let mut fallback = Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
