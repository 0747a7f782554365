//! End-to-end tests over a real socket

use secure_search_core::*;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn start(router: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        server
            .serve_with_shutdown(router, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });

    (addr, tx)
}

async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

fn test_router() -> Router {
    let mut router = Router::new();
    router.get("/", |_req| async { Ok(HttpResponse::html("<h1>home</h1>")) });
    router.post("/echo", |req| async move {
        let map = parse_form_map(&req.body)?;
        Ok(HttpResponse::html(map.get("v").cloned().unwrap_or_default()))
    });
    router
}

#[tokio::test]
async fn test_get_over_socket() {
    let (addr, _stop) = start(test_router()).await;

    let response = raw_request(
        addr,
        "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("text/html; charset=utf-8"));
    assert!(response.ends_with("<h1>home</h1>"));
}

#[tokio::test]
async fn test_post_form_over_socket() {
    let (addr, _stop) = start(test_router()).await;
    let body = "v=hello+world";
    let request = format!(
        "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    let response = raw_request(addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("hello world"));
}

#[tokio::test]
async fn test_unknown_route_over_socket() {
    let (addr, _stop) = start(test_router()).await;

    let response = raw_request(
        addr,
        "GET /nope HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 404"));
}
