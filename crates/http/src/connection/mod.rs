//! HTTP connection handling module
//!
//! - [`HttpConnection`]: serves a single request on an accepted connection:
//!   - Reads and decodes the request
//!   - Runs the [`Handler`](crate::handler::Handler)
//!   - Turns failures into error responses
//!   - Writes the response and closes the connection

mod http_connection;

pub use http_connection::HttpConnection;
