//! Handlers and the handler chain protocol.
//!
//! A chain is an ordered list of handlers. Each handler gets the request, the response
//! shared by the whole chain and a [`Next`] pointing at the rest of the chain. A handler
//! either returns without touching `next`, which ends the chain, or calls
//! [`Next::run`] to run the remaining handlers and wait for them to finish.

use std::fmt;

use async_trait::async_trait;
use futures::future::BoxFuture;
use relay_http::protocol::{Request, Response};

use crate::BoxError;

/// A type erased handler, as stored in a chain.
pub type BoxHandler = Box<dyn Handler>;

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, req: &Request, res: &mut Response, next: Next<'_>) -> Result<(), BoxError>;
}

/// The continuation of a handler chain.
///
/// `Next` is a cursor over the handlers that haven't run yet. It is consumed by
/// [`Next::run`], so every handler can advance the chain at most once.
pub struct Next<'chain> {
    rest: &'chain [BoxHandler],
}

impl<'chain> Next<'chain> {
    pub(crate) fn new(chain: &'chain [BoxHandler]) -> Self {
        Self { rest: chain }
    }

    /// Runs the next handler, which in turn decides whether the chain goes on.
    ///
    /// Does nothing once the chain is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any of the remaining handlers.
    pub async fn run(self, req: &Request, res: &mut Response) -> Result<(), BoxError> {
        match self.rest.split_first() {
            Some((handler, rest)) => handler.call(req, res, Next::new(rest)).await,
            None => Ok(()),
        }
    }

    /// Number of handlers that haven't run yet.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("remaining", &self.remaining()).finish()
    }
}

/// A closure based handler, see [`handler_fn`].
pub struct FnHandler<F> {
    f: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

/// Wraps a closure into a [`Handler`].
///
/// The closure returns a boxed future borrowing the request, the response and `next`:
///
/// ```
/// use futures::FutureExt;
/// use relay_web::handler_fn;
///
/// let powered_by = handler_fn(|req, res, next| {
///     async move {
///         res.set_header("X-Powered-By", "relay");
///         next.run(req, res).await
///     }
///     .boxed()
/// });
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: for<'a> Fn(&'a Request, &'a mut Response, Next<'a>) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    FnHandler { f }
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: for<'a> Fn(&'a Request, &'a mut Response, Next<'a>) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    async fn call(&self, req: &Request, res: &mut Response, next: Next<'_>) -> Result<(), BoxError> {
        (self.f)(req, res, next).await
    }
}
