//! Route and middleware tables, and the dispatch of a request through them.
//!
//! Routes are keyed by method and exact path, middleware by exact path. The special
//! path [`WILDCARD`] holds the middleware that runs for every request. Registering the
//! same key twice appends the new handler to the existing chain.

use std::fmt;

use relay_http::protocol::{Method, Request, Response};
use tracing::trace;

use crate::error::DispatchError;
use crate::handler::{BoxHandler, Handler, Next};

/// Path of the middleware chain that runs for every request
pub const WILDCARD: &str = "*";

/// The frozen route and middleware tables, see [`Router::builder`].
pub struct Router {
    routes: Vec<RouteDefinition>,
    middlewares: Vec<MiddlewareDefinition>,
}

pub struct RouteDefinition {
    method: Method,
    path: String,
    chain: Vec<BoxHandler>,
}

pub struct MiddlewareDefinition {
    path: String,
    chain: Vec<BoxHandler>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the route registered for `method` and `path`.
    pub fn route(&self, method: Method, path: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|route| route.method == method && route.path == path)
    }

    /// Finds the middleware registered for `path`, [`WILDCARD`] included.
    pub fn middleware(&self, path: &str) -> Option<&MiddlewareDefinition> {
        self.middlewares.iter().find(|middleware| middleware.path == path)
    }

    /// Runs `req` through the wildcard middleware, the middleware of its path and
    /// finally the chain of its route.
    ///
    /// Every chain is awaited to completion before the next one starts, so a middleware
    /// error means later chains never run.
    ///
    /// A request whose path is [`WILDCARD`] itself runs the wildcard middleware once,
    /// it is not run again as the middleware of that path.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::RouteNotFound`] if no route matches the method and path
    /// - [`DispatchError::Handler`] with the first error returned by a handler
    pub async fn dispatch(&self, req: &Request, res: &mut Response) -> Result<(), DispatchError> {
        if let Some(global) = self.middleware(WILDCARD) {
            trace!(handlers = global.chain.len(), "run global middleware");
            run_chain(&global.chain, req, res).await?;
        }

        // a request for `*` would run the global middleware twice
        if req.path() != WILDCARD
            && let Some(middleware) = self.middleware(req.path())
        {
            trace!(path = req.path(), handlers = middleware.chain.len(), "run path middleware");
            run_chain(&middleware.chain, req, res).await?;
        }

        let route = self
            .route(req.method(), req.path())
            .ok_or_else(|| DispatchError::route_not_found(req.method(), req.path()))?;

        trace!(method = %route.method, path = %route.path, handlers = route.chain.len(), "run route");
        run_chain(&route.chain, req, res).await
    }
}

async fn run_chain(chain: &[BoxHandler], req: &Request, res: &mut Response) -> Result<(), DispatchError> {
    Next::new(chain).run(req, res).await.map_err(DispatchError::handler)
}

#[async_trait::async_trait]
impl relay_http::handler::Handler for Router {
    type Error = DispatchError;

    async fn call(&self, req: &Request, res: &mut Response) -> Result<(), Self::Error> {
        self.dispatch(req, res).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes).field("middlewares", &self.middlewares).finish()
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("handlers", &self.chain.len())
            .finish()
    }
}

impl fmt::Debug for MiddlewareDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareDefinition").field("path", &self.path).field("handlers", &self.chain.len()).finish()
    }
}

impl RouteDefinition {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl MiddlewareDefinition {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Collects routes and middleware, then freezes them into a [`Router`].
///
/// ```
/// use futures::FutureExt;
/// use relay_web::{handler_fn, Router};
///
/// let router = Router::builder()
///     .use_global(handler_fn(|req, res, next| {
///         async move {
///             res.set_header("X-Served-By", "relay");
///             next.run(req, res).await
///         }
///         .boxed()
///     }))
///     .get("/", handler_fn(|_req, res, _next| {
///         async move {
///             res.set_text_body("hello world");
///             Ok(())
///         }
///         .boxed()
///     }))
///     .build();
///
/// assert!(router.route(relay_http::protocol::Method::Get, "/").is_some());
/// ```
#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<RouteDefinition>,
    middlewares: Vec<MiddlewareDefinition>,
}

macro_rules! method_route {
    ($name:ident, $method:expr, $token:literal) => {
        #[doc = concat!("Appends `handler` to the `", $token, "` route of `path`.")]
        #[must_use]
        pub fn $name<H: Handler + 'static>(self, path: impl Into<String>, handler: H) -> Self {
            self.route($method, path, handler)
        }
    };
}

impl RouterBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the chain of `method` and `path`, creating the route if
    /// needed.
    #[must_use]
    pub fn route<H: Handler + 'static>(self, method: Method, path: impl Into<String>, handler: H) -> Self {
        self.route_chain(method, path, [Box::new(handler) as BoxHandler])
    }

    /// Appends several handlers at once to the chain of `method` and `path`, in
    /// iteration order.
    #[must_use]
    pub fn route_chain<I>(mut self, method: Method, path: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = BoxHandler>,
    {
        let path = path.into();
        let index = match self.routes.iter().position(|route| route.method == method && route.path == path) {
            Some(index) => index,
            None => {
                self.routes.push(RouteDefinition { method, path, chain: Vec::new() });
                self.routes.len() - 1
            }
        };
        self.routes[index].chain.extend(handlers);
        self
    }

    method_route!(get, Method::Get, "GET");
    method_route!(post, Method::Post, "POST");
    method_route!(put, Method::Put, "PUT");
    method_route!(patch, Method::Patch, "PATCH");
    method_route!(delete, Method::Delete, "DELETE");

    /// Appends `handler` to the middleware that runs for every request.
    #[must_use]
    pub fn use_global<H: Handler + 'static>(self, handler: H) -> Self {
        self.use_path(WILDCARD, handler)
    }

    /// Appends `handler` to the middleware that runs for requests to `path`, before the
    /// route chain.
    #[must_use]
    pub fn use_path<H: Handler + 'static>(self, path: impl Into<String>, handler: H) -> Self {
        self.use_path_chain(path, [Box::new(handler) as BoxHandler])
    }

    /// Appends several handlers at once to the middleware of `path`, in iteration order.
    #[must_use]
    pub fn use_path_chain<I>(mut self, path: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = BoxHandler>,
    {
        let path = path.into();
        let index = match self.middlewares.iter().position(|middleware| middleware.path == path) {
            Some(index) => index,
            None => {
                self.middlewares.push(MiddlewareDefinition { path, chain: Vec::new() });
                self.middlewares.len() - 1
            }
        };
        self.middlewares[index].chain.extend(handlers);
        self
    }

    pub fn build(self) -> Router {
        Router { routes: self.routes, middlewares: self.middlewares }
    }
}
