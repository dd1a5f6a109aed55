//! HTTP response encoder
//!
//! Serializes a [`Response`] into raw bytes: the status line, the user headers in
//! insertion order, the computed `Content-Length` and `Date` headers, a blank line and
//! finally the body.
//!
//! This is the only place `Content-Length` and `Date` are produced. If a handler set
//! either of them by hand (in any letter case) the stored value is ignored and the
//! computed one is written instead. `CR` and `LF` inside header names and values are
//! dropped.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::{Response, SendError};

/// Initial buffer size allocated for the response head
const INIT_HEADER_SIZE: usize = 4 * 1024;

const CONTENT_LENGTH: &str = "Content-Length";
const DATE: &str = "Date";

/// Encoder for HTTP responses implementing the [`Encoder`] trait.
#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_response(&item, dst);
        Ok(())
    }
}

/// Writes the whole wire form of `response` into `dst`.
pub(crate) fn encode_response(response: &Response, dst: &mut BytesMut) {
    dst.reserve(INIT_HEADER_SIZE + response.body().len());

    // status line, e.g. `HTTP/1.1 404 Not Found`
    let status = response.status();
    dst.put_slice(response.version().as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(status.as_str().as_bytes());
    if let Some(reason) = status.canonical_reason() {
        dst.put_u8(b' ');
        dst.put_slice(reason.as_bytes());
    }
    dst.put_slice(b"\r\n");

    for (name, value) in response.headers() {
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) || name.eq_ignore_ascii_case(DATE) {
            continue;
        }
        put_header(dst, name.as_bytes(), value.as_bytes());
    }

    // byte length, not char length
    put_header(dst, CONTENT_LENGTH.as_bytes(), response.body().len().to_string().as_bytes());

    let mut date = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut date);
    put_header(dst, DATE.as_bytes(), &date[..]);

    dst.put_slice(b"\r\n");
    dst.put_slice(response.body());
}

#[inline]
fn put_header(dst: &mut BytesMut, name: &[u8], value: &[u8]) {
    put_field(dst, name);
    dst.put_slice(b": ");
    put_field(dst, value);
    dst.put_slice(b"\r\n");
}

/// Writes a header name or value with any `CR` or `LF` dropped, so a handler supplied
/// header can never end the head early.
#[inline]
fn put_field(dst: &mut BytesMut, field: &[u8]) {
    if !field.iter().any(|b| matches!(b, b'\r' | b'\n')) {
        dst.put_slice(field);
        return;
    }
    for &b in field.iter().filter(|b| !matches!(b, b'\r' | b'\n')) {
        dst.put_u8(b);
    }
}
