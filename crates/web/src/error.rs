//! Errors raised while dispatching a request.
//!
//! Handlers return [`BoxError`], so any error type can be propagated with `?`. To answer
//! with a specific status, return a [`ResponseError`]; everything else becomes
//! `500 Internal Server Error`.

use std::error::Error;

use http::StatusCode;
use relay_http::handler::ErrorStatus;
use relay_http::protocol::Method;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// An error carrying the status code and message the client should see.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use relay_web::{BoxError, ResponseError};
///
/// fn check_token(token: Option<&str>) -> Result<(), BoxError> {
///     match token {
///         Some("secret") => Ok(()),
///         _ => Err(ResponseError::unauthorized("missing token").into()),
///     }
/// }
///
/// assert!(check_token(None).is_err());
/// ```
#[derive(Debug, Clone, Error)]
#[error("{status}: {message}")]
pub struct ResponseError {
    status: StatusCode,
    message: String,
}

impl ResponseError {
    pub fn new<S: ToString>(status: StatusCode, message: S) -> Self {
        Self { status, message: message.to_string() }
    }

    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized<S: ToString>(message: S) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found<S: ToString>(message: S) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal<S: ToString>(message: S) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route defined for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("handler error: {source}")]
    Handler { source: BoxError },
}

impl DispatchError {
    pub fn route_not_found<S: ToString>(method: Method, path: S) -> Self {
        Self::RouteNotFound { method, path: path.to_string() }
    }

    pub fn handler<E: Into<BoxError>>(e: E) -> Self {
        Self::Handler { source: e.into() }
    }

    fn response_error(&self) -> Option<&ResponseError> {
        match self {
            DispatchError::Handler { source } => source.downcast_ref::<ResponseError>(),
            DispatchError::RouteNotFound { .. } => None,
        }
    }
}

impl ErrorStatus for DispatchError {
    fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::Handler { .. } => self.response_error().map_or(StatusCode::INTERNAL_SERVER_ERROR, ResponseError::status),
        }
    }

    /// Messages of unexpected handler errors stay in the logs, the client only sees the
    /// status reason.
    fn message(&self) -> String {
        match self {
            DispatchError::RouteNotFound { .. } => self.to_string(),
            DispatchError::Handler { .. } => match self.response_error() {
                Some(e) => e.message().to_string(),
                None => StatusCode::INTERNAL_SERVER_ERROR.canonical_reason().unwrap_or_default().to_string(),
            },
        }
    }
}
