//! Wire level building blocks of the relay HTTP/1.1 server
//!
//! This crate reads a request off a connection, decodes the request line and headers by
//! hand, hands the request to a [`handler::Handler`] together with a mutable
//! [`protocol::Response`], and serializes that response back onto the wire.
//!
//! Every connection carries exactly one request: it is read in full, handled once and
//! closed.
//!
//! # Example
//!
//! ```no_run
//! use std::fmt;
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use http::StatusCode;
//! use relay_http::connection::HttpConnection;
//! use relay_http::handler::{ErrorStatus, Handler};
//! use relay_http::protocol::{Request, Response};
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//!
//! struct Never;
//!
//! impl fmt::Display for Never {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("never")
//!     }
//! }
//!
//! impl ErrorStatus for Never {
//!     fn status(&self) -> StatusCode {
//!         StatusCode::INTERNAL_SERVER_ERROR
//!     }
//! }
//!
//! struct HelloWorld;
//!
//! #[async_trait]
//! impl Handler for HelloWorld {
//!     type Error = Never;
//!
//!     async fn call(&self, req: &Request, res: &mut Response) -> Result<(), Self::Error> {
//!         info!(path = req.path(), "receive request");
//!         res.set_text_body("Hello World!");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(HelloWorld);
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: one request per connection, from reading to closing
//! - [`protocol`]: methods, requests, responses and errors
//! - [`codec`]: the wire reader, the request decoder and the response encoder
//! - [`handler`]: the handler trait and error to status mapping
//!
//! # Limitations
//!
//! - HTTP/1.1 only, no keep-alive and no chunked transfer encoding
//! - Request bodies are ignored
//! - No TLS support (use a reverse proxy for HTTPS)
//! - Maximum request size: 64KB by default

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
