use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;
use hyper::Method;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Represents a single route, ready to be registered in bulk with
/// [`Router::add_routes`](./struct.Router.html#method.add_routes).
///
/// The path of a route is relative to the path of the router handle it is added through.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use hyper::{Method, Request};
/// use kami::{Route, Router};
///
/// fn list_users(_: Request<Bytes>) -> &'static str {
///     "users"
/// }
///
/// fn create_user(_: Request<Bytes>) -> &'static str {
///     "created"
/// }
///
/// let router = Router::new();
/// router
///     .with_prefix("/api")
///     .add_routes([
///         Route::new(Method::GET, "/users", list_users),
///         Route::new(Method::POST, "/users", create_user),
///     ])
///     .unwrap();
/// ```
pub struct Route {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) handler: BoxedHandler,
    pub(crate) middlewares: Vec<Middleware>,
}

impl Route {
    pub fn new<P, H>(method: Method, path: P, handler: H) -> Route
    where
        P: Into<String>,
        H: Handler,
    {
        Route {
            method,
            path: path.into(),
            handler: Arc::new(handler),
            middlewares: Vec::new(),
        }
    }

    /// Appends route-specific middlewares. They run inside the middlewares of the router handle.
    pub fn with_middleware<I>(mut self, middlewares: I) -> Route
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middlewares.extend(middlewares);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ method: {:?}, path: {:?}, middlewares: {} }}",
            self.method,
            self.path,
            self.middlewares.len()
        )
    }
}
