//! Connection level request handling.
//!
//! A [`Handler`] receives the decoded request and the response that will be written
//! back once it returns. Errors are turned into an error response by the connection,
//! the status code and body come from [`ErrorStatus`].

use std::fmt::Display;

use async_trait::async_trait;
use http::StatusCode;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: ErrorStatus + Display + Send;

    /// Handles one request by mutating `res` in place.
    async fn call(&self, req: &Request, res: &mut Response) -> Result<(), Self::Error>;
}

/// Maps an error to the response sent back to the client.
pub trait ErrorStatus {
    /// Status code of the error response.
    fn status(&self) -> StatusCode;

    /// Body of the error response, the canonical reason of [`Self::status`] by default.
    fn message(&self) -> String {
        self.status().canonical_reason().unwrap_or_default().to_string()
    }
}
