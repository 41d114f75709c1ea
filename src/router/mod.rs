use self::shared::Shared;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{self, Middleware};
use crate::route::Route;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::iter;
use std::sync::Arc;
use tracing::debug;

pub use self::builder::{RouterBuilder, DEFAULT_MAX_BODY_SIZE};

mod builder;
mod shared;

/// A handle on a route table.
///
/// A handle is an immutable value: a path prefix and a middleware chain on top of a route tree
/// shared with every handle derived from the same root. [`with_prefix`](#method.with_prefix) and
/// [`with_middleware`](#method.with_middleware) return new handles and never change the one they
/// are called on; registering a route through any handle makes it visible to all of them.
///
/// Once the router starts serving requests the route table is frozen and registering a route
/// panics.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use hyper::{Method, Request, StatusCode};
/// use kami::prelude::*;
/// use kami::Router;
///
/// let router = Router::new();
/// let api = router.with_prefix("/api");
/// let users = api.with_prefix("/users");
///
/// users.get(|_: Request<Bytes>| "all users").unwrap();
/// users
///     .with_prefix("/:id")
///     .get(|req: Request<Bytes>| format!("user {}", req.param("id").unwrap()))
///     .unwrap();
///
/// assert_eq!(api.path(), "/api");
/// assert_eq!(users.path(), "/api/users");
///
/// let req = Request::builder()
///     .method(Method::GET)
///     .uri("/api/users/42")
///     .body(Bytes::new())
///     .unwrap();
/// assert_eq!(router.dispatch(req).status(), StatusCode::OK);
/// ```
#[derive(Clone)]
pub struct Router {
    shared: Arc<Shared>,
    prefix: String,
    middlewares: Vec<Middleware>,
}

impl Router {
    /// Creates a root router with the default not-found handler and no global middleware.
    pub fn new() -> Router {
        RouterBuilder::new().build()
    }

    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to configure the root router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Router {
        Router {
            shared,
            prefix: String::new(),
            middlewares: Vec::new(),
        }
    }

    /// Returns a handle whose path is this handle's path joined with `segment`.
    pub fn with_prefix(&self, segment: &str) -> Router {
        Router {
            shared: Arc::clone(&self.shared),
            prefix: join_path(&self.prefix, segment),
            middlewares: self.middlewares.clone(),
        }
    }

    /// Returns a handle whose middleware chain is this handle's chain followed by `middlewares`.
    pub fn with_middleware<I>(&self, middlewares: I) -> Router
    where
        I: IntoIterator<Item = Middleware>,
    {
        let mut chain = self.middlewares.clone();
        chain.extend(middlewares);

        Router {
            shared: Arc::clone(&self.shared),
            prefix: self.prefix.clone(),
            middlewares: chain,
        }
    }

    /// The path routes are registered at through this handle.
    pub fn path(&self) -> &str {
        if self.prefix.is_empty() {
            "/"
        } else {
            &self.prefix
        }
    }

    /// The middlewares accumulated on this handle, outermost first. Global middlewares set on the
    /// [RouterBuilder](./struct.RouterBuilder.html) are not included.
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    /// Registers `handler` for `method` at this handle's path.
    ///
    /// # Errors
    ///
    /// Fails if the path is malformed or binds a parameter name conflicting with an already
    /// registered route. The route table is left untouched in both cases.
    ///
    /// # Panics
    ///
    /// Panics if the router is already serving requests.
    pub fn handle<H: Handler>(&self, method: Method, handler: H) -> crate::Result<()> {
        self.handle_with(method, handler, iter::empty())
    }

    /// Same as [`handle`](#method.handle), with extra middlewares wrapping only this route.
    pub fn handle_with<H, I>(&self, method: Method, handler: H, middlewares: I) -> crate::Result<()>
    where
        H: Handler,
        I: IntoIterator<Item = Middleware>,
    {
        let route_middlewares: Vec<Middleware> = middlewares.into_iter().collect();
        self.register(method, self.path(), Arc::new(handler), &route_middlewares)
    }

    /// Registers every route at this handle's path joined with the route's own path, stopping at
    /// the first failure.
    pub fn add_routes<I>(&self, routes: I) -> crate::Result<()>
    where
        I: IntoIterator<Item = Route>,
    {
        for route in routes {
            let path = join_path(&self.prefix, &route.path);
            let path = if path.is_empty() { "/" } else { path.as_str() };
            self.register(route.method, path, route.handler, &route.middlewares)?;
        }
        Ok(())
    }

    /// Registers a `GET` handler at this handle's path.
    pub fn get<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::GET, handler)
    }

    /// Registers a `POST` handler at this handle's path.
    pub fn post<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::POST, handler)
    }

    /// Registers a `PUT` handler at this handle's path.
    pub fn put<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::PUT, handler)
    }

    /// Registers a `PATCH` handler at this handle's path.
    pub fn patch<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::PATCH, handler)
    }

    /// Registers a `DELETE` handler at this handle's path.
    pub fn delete<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::DELETE, handler)
    }

    /// Registers a `HEAD` handler at this handle's path.
    pub fn head<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::HEAD, handler)
    }

    /// Registers an `OPTIONS` handler at this handle's path.
    pub fn options<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::OPTIONS, handler)
    }

    /// Registers a `CONNECT` handler at this handle's path.
    pub fn connect<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::CONNECT, handler)
    }

    /// Registers a `TRACE` handler at this handle's path.
    pub fn trace<H: Handler>(&self, handler: H) -> crate::Result<()> {
        self.handle(Method::TRACE, handler)
    }

    fn register(
        &self,
        method: Method,
        path: &str,
        handler: BoxedHandler,
        route_middlewares: &[Middleware],
    ) -> crate::Result<()> {
        let chain = self
            .shared
            .global()
            .iter()
            .chain(self.middlewares.iter())
            .chain(route_middlewares.iter());
        let handler = middleware::compose(chain, handler);

        debug!(method = %method, path = %path, "registering route");
        self.shared.register(method, path, handler)
    }

    /// The request body limit set with
    /// [`RouterBuilder::max_body_size`](./struct.RouterBuilder.html#method.max_body_size).
    pub fn max_body_size(&self) -> usize {
        self.shared.max_body_size()
    }

    /// Closes the registration phase. Called implicitly by [`dispatch`](#method.dispatch) and by
    /// [`RouterService::new`](./struct.RouterService.html#method.new); calling it again is a no-op.
    pub fn start(&self) {
        self.shared.start();
    }

    /// Whether the router has started serving requests.
    pub fn is_serving(&self) -> bool {
        self.shared.is_serving()
    }

    /// Serves a single request whose body has already been read.
    ///
    /// The first call closes the registration phase. The response is `404 Not Found` (or whatever
    /// the custom not-found handler answers) when no route matches, and `500 Internal Server Error`
    /// when a handler or a middleware panics.
    pub fn dispatch(&self, req: Request<Bytes>) -> Response<Full<Bytes>> {
        self.shared.start().dispatch(req)
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::new()
    }
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ path: {:?}, middlewares: {:?}, serving: {} }}",
            self.path(),
            self.middlewares,
            self.is_serving()
        )
    }
}

fn join_path(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_matches('/');

    if segment.is_empty() {
        base.to_owned()
    } else {
        format!("{}/{}", base, segment)
    }
}
