//! HTTP codec module for reading requests off the wire and writing responses back
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`read_message`]: drains a connection into the raw request text
//!   - [`decode_request`]: splits the text into a request line and headers, see
//!     [`split_lines`], [`parse_request_line`] and [`parse_headers`]
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: serializes a [`Response`](crate::protocol::Response) including
//!     the computed `Content-Length` and `Date` headers
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use relay_http::codec::{decode_request, ResponseEncoder};
//! use relay_http::protocol::{Method, Response};
//! use tokio_util::codec::Encoder;
//!
//! let request = decode_request("GET /hello HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//! assert_eq!(request.method(), Method::Get);
//!
//! let mut response = Response::new();
//! response.set_text_body(format!("hello from {}", request.path()));
//!
//! let mut buffer = BytesMut::new();
//! ResponseEncoder::new().encode(response, &mut buffer).unwrap();
//! assert!(buffer.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

mod request_decoder;
mod response_encoder;
mod wire_reader;

pub use request_decoder::{decode_request, parse_headers, parse_request_line, split_lines, RequestLine};
pub use response_encoder::ResponseEncoder;
pub(crate) use response_encoder::encode_response;
pub use wire_reader::{read_message, DEFAULT_MAX_MESSAGE_BYTES, READ_CHUNK_SIZE};
