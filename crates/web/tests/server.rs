use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use relay_web::{handler_fn, BoxError, Handler, Next, Request, Response, ResponseError, Router, Server};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

#[derive(Serialize)]
struct User {
    name: &'static str,
    age: u8,
}

/// Tags every response, errors included.
struct Tag;

#[async_trait::async_trait]
impl Handler for Tag {
    async fn call(&self, req: &Request, res: &mut Response, next: Next<'_>) -> Result<(), BoxError> {
        res.set_header("X-Tag", "relay");
        next.run(req, res).await
    }
}

fn router(entered: Arc<Notify>) -> Router {
    Router::builder()
        .use_global(Tag)
        .get(
            "/",
            handler_fn(|req, res, next| {
                async move {
                    res.set_text_body("hello world");
                    next.run(req, res).await
                }
                .boxed()
            }),
        )
        .get(
            "/",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_text_body("hello world2");
                    Ok(())
                }
                .boxed()
            }),
        )
        .get(
            "/user",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_json_body(&User { name: "ferris", age: 9 })?;
                    Ok(())
                }
                .boxed()
            }),
        )
        .use_path(
            "/admin",
            handler_fn(|req, res, next| {
                async move {
                    match req.header("Authorization") {
                        Some("secret") => next.run(req, res).await,
                        _ => Err(ResponseError::unauthorized("no entry").into()),
                    }
                }
                .boxed()
            }),
        )
        .delete(
            "/admin",
            handler_fn(|_req, res, _next| {
                async move {
                    res.set_text_body("deleted");
                    Ok(())
                }
                .boxed()
            }),
        )
        .get(
            "/boom",
            handler_fn(|_req, _res, _next| async move { Err(BoxError::from("database is down")) }.boxed()),
        )
        .get(
            "/slow",
            handler_fn(move |_req, res, _next| {
                let entered = Arc::clone(&entered);
                async move {
                    entered.notify_one();
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    res.set_text_body("slow");
                    Ok(())
                }
                .boxed()
            }),
        )
        .build()
}

struct TestServer {
    server: Arc<Server>,
    address: SocketAddr,
    serving: JoinHandle<()>,
    entered: Arc<Notify>,
}

async fn start() -> TestServer {
    let entered = Arc::new(Notify::new());
    let server = Arc::new(Server::builder().router(router(Arc::clone(&entered))).build().unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let serving = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.serve(listener).await })
    };

    TestServer { server, address, serving, entered }
}

async fn connect_and_send(address: SocketAddr, request: &str) -> TcpStream {
    let mut stream = TcpStream::connect(address).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    stream
}

async fn read_response(mut stream: TcpStream) -> String {
    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf)).await.unwrap().unwrap();
    String::from_utf8(buf).unwrap()
}

async fn send(address: SocketAddr, request: &str) -> String {
    read_response(connect_and_send(address, request).await).await
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}

#[tokio::test]
async fn second_handler_in_chain_wins() {
    let test_server = start().await;

    let response = send(test_server.address, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("\r\nX-Tag: relay\r\n"));
    assert!(response.contains("\r\nContent-Type: text/html; charset=utf-8\r\n"));
    assert!(response.contains("\r\nContent-Length: 12\r\n"));
    assert!(response.contains("\r\nDate: "));
    assert_eq!(body(&response), "hello world2");
}

#[tokio::test]
async fn json_body() {
    let test_server = start().await;

    let response = send(test_server.address, "GET /user HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("\r\nContent-Type: application/json\r\n"));
    assert_eq!(body(&response), r#"{"name":"ferris","age":9}"#);
}

#[tokio::test]
async fn route_not_found_keeps_global_headers() {
    let test_server = start().await;

    let response = send(test_server.address, "POST / HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("\r\nX-Tag: relay\r\n"));
    assert_eq!(body(&response), "no route defined for POST /");
}

#[tokio::test]
async fn path_middleware_guards_route() {
    let test_server = start().await;

    let rejected = send(test_server.address, "DELETE /admin HTTP/1.1\r\n\r\n").await;
    assert!(rejected.starts_with("HTTP/1.1 401 Unauthorized\r\n"));
    assert_eq!(body(&rejected), "no entry");

    let accepted = send(test_server.address, "DELETE /admin HTTP/1.1\r\nAuthorization: secret\r\n\r\n").await;
    assert!(accepted.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body(&accepted), "deleted");
}

#[tokio::test]
async fn handler_error_is_internal() {
    let test_server = start().await;

    let response = send(test_server.address, "GET /boom HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    assert_eq!(body(&response), "Internal Server Error");
}

#[tokio::test]
async fn malformed_requests_are_internal() {
    let test_server = start().await;

    for request in ["GARBAGE\r\n\r\n", "get / HTTP/1.1\r\n\r\n", "HEAD / HTTP/1.1\r\n\r\n"] {
        let response = send(test_server.address, request).await;
        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"), "request {request:?} got {response:?}");
        assert!(!response.contains("X-Tag"));
    }
}

#[tokio::test]
async fn concurrent_connections() {
    let test_server = start().await;

    let requests = (0..16).map(|_| send(test_server.address, "GET / HTTP/1.1\r\n\r\n"));
    let responses = futures::future::join_all(requests).await;

    assert!(responses.iter().all(|response| body(response) == "hello world2"));
}

#[tokio::test]
async fn close_stops_accepting() {
    let test_server = start().await;
    assert_eq!(body(&send(test_server.address, "GET / HTTP/1.1\r\n\r\n").await), "hello world2");

    test_server.server.close();

    tokio::time::timeout(Duration::from_secs(5), test_server.serving).await.unwrap().unwrap();
    assert!(test_server.server.is_closed());
    assert!(TcpStream::connect(test_server.address).await.is_err());
}

#[tokio::test]
async fn close_lets_in_flight_connections_finish() {
    let test_server = start().await;
    let stream = connect_and_send(test_server.address, "GET /slow HTTP/1.1\r\n\r\n").await;
    test_server.entered.notified().await;

    test_server.server.close();
    tokio::time::timeout(Duration::from_secs(5), test_server.serving).await.unwrap().unwrap();

    let response = read_response(stream).await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body(&response), "slow");
}
