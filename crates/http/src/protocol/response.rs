//! HTTP response builder.
//!
//! A [`Response`] is created with sensible defaults (`HTTP/1.1`, `200 OK` and an html
//! content type) and then mutated in place by every handler taking part in a request.
//! Setters return `&mut Self` so calls can be chained:
//!
//! ```
//! use http::StatusCode;
//! use relay_http::protocol::Response;
//!
//! let mut response = Response::new();
//! response.set_status(StatusCode::CREATED).set_header("X-Request-Id", "42").set_text_body("created");
//! assert_eq!(response.body(), b"created".as_slice());
//! ```
//!
//! `Content-Length` and `Date` are never stored here, they are computed when the
//! response is encoded, see [`crate::codec::ResponseEncoder`] and [`Response::serialize`].

use std::fmt::Display;

use bytes::{Bytes, BytesMut};
use http::StatusCode;
use indexmap::IndexMap;
use serde::Serialize;

use crate::codec::encode_response;

pub const CONTENT_TYPE: &str = "Content-Type";

const DEFAULT_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Clone)]
pub struct Response {
    version: String,
    status: StatusCode,
    headers: IndexMap<String, String>,
    body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        let mut headers = IndexMap::new();
        headers.insert(CONTENT_TYPE.to_string(), mime::TEXT_HTML_UTF_8.to_string());
        Self { version: DEFAULT_VERSION.to_string(), status: StatusCode::OK, headers, body: Bytes::new() }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    /// Sets a header. Setting an existing key replaces its value but keeps its position.
    ///
    /// Line breaks in `key` or `value` never reach the wire, the encoder drops them.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serializes `value` as the json body and sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` can't be represented as json, the
    /// response is left untouched in that case.
    pub fn set_json_body<T>(&mut self, value: &T) -> Result<&mut Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(value)?;
        self.body = Bytes::from(body);
        Ok(self.set_header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref()))
    }

    /// Sets the body to the string form of `text` and marks it as utf-8 html.
    ///
    /// Numbers are written with their `Display` form, not json encoded.
    pub fn set_text_body<T: Display>(&mut self, text: T) -> &mut Self {
        self.body = Bytes::from(text.to_string());
        self.set_header(CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())
    }

    /// Turns this response into an error response: the status and body are replaced,
    /// headers set so far are kept.
    pub fn fail<T: Display>(&mut self, status: StatusCode, message: T) -> &mut Self {
        self.set_status(status).set_text_body(message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Renders the status line, headers, computed `Content-Length` and `Date`, and the body.
    pub fn serialize(&self) -> Bytes {
        let mut dst = BytesMut::new();
        encode_response(self, &mut dst);
        dst.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_response() {
        let response = Response::new();

        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html; charset=utf-8"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn text_body() {
        let mut response = Response::new();
        response.set_status(StatusCode::OK).set_version("HTTP/1.1").set_text_body("test");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html; charset=utf-8"));
        assert_eq!(response.body(), b"test");
    }

    #[test]
    fn number_body_is_stringified() {
        let mut response = Response::new();
        response.set_json_body(&json!([1])).unwrap();
        response.set_text_body(42);

        assert_eq!(response.body(), b"42");
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn json_body() {
        let mut response = Response::new();
        response.set_status(StatusCode::OK).set_version("HTTP/1.2").set_json_body(&json!({"hello": "world"})).unwrap();

        assert_eq!(response.version(), "HTTP/1.2");
        assert_eq!(response.header(CONTENT_TYPE), Some("application/json"));
        assert_eq!(response.body(), br#"{"hello":"world"}"#);
    }

    #[test]
    fn json_body_from_struct() {
        #[derive(Serialize)]
        struct User<'a> {
            name: &'a str,
            age: u8,
        }

        let mut response = Response::new();
        response.set_json_body(&User { name: "zava", age: 18 }).unwrap();

        assert_eq!(response.body(), br#"{"name":"zava","age":18}"#);
    }

    #[test]
    fn header_override_keeps_position() {
        let mut response = Response::new();
        response.set_header("X-First", "1").set_header("X-Second", "2").set_header("X-First", "3");

        let keys = response.headers().keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec![CONTENT_TYPE, "X-First", "X-Second"]);
        assert_eq!(response.header("X-First"), Some("3"));
    }

    #[test]
    fn fail_keeps_headers() {
        let mut response = Response::new();
        response.set_header("X-Powered-By", "relay").set_json_body(&json!({"ok": true})).unwrap();
        response.fail(StatusCode::NOT_FOUND, "not found");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.header("X-Powered-By"), Some("relay"));
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html; charset=utf-8"));
        assert_eq!(response.body(), b"not found");
    }

    #[test]
    fn serialize_text_response() {
        let mut response = Response::new();
        response.set_text_body("test");

        let bytes = response.serialize();
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\n"));
        assert!(text.contains("\r\nContent-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\ntest"));
    }
}
