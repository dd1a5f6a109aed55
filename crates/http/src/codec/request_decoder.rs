//! HTTP request decoder
//!
//! Turns the text produced by [`read_message`](super::read_message) into a [`Request`].
//! Decoding happens in three steps:
//!
//! 1. [`split_lines`]: split the message on `CRLF`
//! 2. [`parse_request_line`]: `GET /index.html HTTP/1.1` into method, path and version
//! 3. [`parse_headers`]: `Name: value` lines up to the first blank line
//!
//! The request body, if any, is ignored.

use std::collections::HashMap;

use tracing::trace;

use crate::ensure;
use crate::protocol::{Method, ParseError, Request};

const LINE_SEPARATOR: &str = "\r\n";
const HEADER_SEPARATOR: &str = ": ";

/// The three tokens of a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: Method,
    pub path: &'a str,
    pub version: &'a str,
}

/// Splits a raw message on `CRLF`.
///
/// # Errors
///
/// Returns [`ParseError::MalformedMessage`] when there is nothing to split.
pub fn split_lines(text: &str) -> Result<Vec<&str>, ParseError> {
    ensure!(!text.is_empty(), ParseError::MalformedMessage);
    Ok(text.split(LINE_SEPARATOR).collect())
}

/// Parses a request line such as `GET / HTTP/1.1`.
///
/// Tokens are separated by single spaces and there must be exactly three of them.
///
/// # Errors
///
/// - [`ParseError::MalformedRequestLine`] if the line doesn't have three tokens
/// - [`ParseError::UnknownMethod`] if the first token isn't a supported [`Method`]
pub fn parse_request_line(line: &str) -> Result<RequestLine<'_>, ParseError> {
    let tokens = line.split(' ').collect::<Vec<_>>();
    let [method, path, version] = tokens[..] else {
        return Err(ParseError::malformed_request_line(line));
    };

    let method = Method::try_from(method)?;
    Ok(RequestLine { method, path, version })
}

/// Collects `Name: value` header lines into a map.
///
/// Parsing stops at the first blank line. Lines without a `": "` separator are skipped,
/// the value is everything after the first separator and a repeated name keeps its last
/// value.
pub fn parse_headers<'a, I>(lines: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = HashMap::new();
    for line in lines.into_iter().take_while(|line| !line.is_empty()) {
        match line.split_once(HEADER_SEPARATOR) {
            Some((name, value)) => {
                headers.insert(name.to_string(), value.to_string());
            }
            None => trace!(line, "skip header line without separator"),
        }
    }
    headers
}

/// Decodes a whole request message.
///
/// # Errors
///
/// Any error from [`split_lines`] or [`parse_request_line`].
pub fn decode_request(text: &str) -> Result<Request, ParseError> {
    let lines = split_lines(text)?;
    let (first_line, header_lines) = lines.split_first().ok_or(ParseError::MalformedMessage)?;

    let RequestLine { method, path, version } = parse_request_line(first_line)?;
    let headers = parse_headers(header_lines.iter().copied());

    trace!(%method, path, version, header_count = headers.len(), "decoded request");
    Ok(Request::new(method, path, version, headers))
}
