//! HTTP request representation.
//!
//! A [`Request`] is produced once per connection by the request decoder and is
//! read-only afterwards. Header names keep the exact casing they had on the wire.

use std::collections::HashMap;

use crate::protocol::Method;

/// A decoded HTTP request: request line plus headers, without a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, version: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self { method, path: path.into(), version: version.into(), headers }
    }

    /// Returns the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the raw request target, e.g. `/index.html`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the protocol version token, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns all headers. Keys are case-sensitive.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header by its exact (case-sensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
