//! Routes, middleware and handler chains on top of [`relay_http`].
//!
//! A [`Router`] holds two tables built once at startup: routes keyed by method and
//! exact path, and middleware keyed by exact path (or [`router::WILDCARD`] for every
//! request). Each entry owns a chain of [`Handler`]s that share one response and hand
//! control to each other through [`Next`].
//!
//! # Example
//!
//! ```no_run
//! use futures::FutureExt;
//! use relay_web::{handler_fn, ResponseError, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .use_global(handler_fn(|req, res, next| {
//!             async move {
//!                 res.set_header("X-Powered-By", "relay");
//!                 next.run(req, res).await
//!             }
//!             .boxed()
//!         }))
//!         .get("/", handler_fn(|_req, res, _next| {
//!             async move {
//!                 res.set_text_body("hello world");
//!                 Ok(())
//!             }
//!             .boxed()
//!         }))
//!         .get("/private", handler_fn(|_req, _res, _next| {
//!             async move { Err(ResponseError::unauthorized("go away").into()) }.boxed()
//!         }))
//!         .build();
//!
//!     let server = Server::builder().router(router).build().unwrap();
//!     server.listen(8080).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod server;

pub mod router;

pub use error::BoxError;
pub use error::DispatchError;
pub use error::ResponseError;
pub use handler::handler_fn;
pub use handler::BoxHandler;
pub use handler::FnHandler;
pub use handler::Handler;
pub use handler::Next;
pub use router::Router;
pub use router::RouterBuilder;
pub use server::Server;
pub use server::ServerBuildError;
pub use server::ServerBuilder;
pub use server::ServerError;

pub use relay_http::protocol::{Method, Request, Response};
