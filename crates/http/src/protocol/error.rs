use std::io;

use http::StatusCode;
use thiserror::Error;

use crate::handler::ErrorStatus;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("http message is empty")]
    MalformedMessage,

    #[error("malformed request line: {line:?}, expect method, path and version")]
    MalformedRequestLine { line: String },

    #[error("unknown http method: {method:?}")]
    UnknownMethod { method: String },

    #[error("message size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeMessage { current_size: usize, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(line: S) -> Self {
        Self::MalformedRequestLine { line: line.to_string() }
    }

    pub fn unknown_method<S: ToString>(method: S) -> Self {
        Self::UnknownMethod { method: method.to_string() }
    }

    pub fn too_large_message(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeMessage { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Every decoding failure is answered with `500 Internal Server Error`.
impl ErrorStatus for ParseError {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
