use super::shared::Shared;
use super::Router;
use crate::handler::{self, BoxedHandler, Handler};
use crate::middleware::Middleware;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Builder for the root [`Router`](./struct.Router.html).
///
/// The builder holds what can only be decided once per router: the not-found handler and the
/// global middlewares, which wrap every route registered later as well as the not-found handler.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http_body_util::Full;
/// use hyper::header::HeaderValue;
/// use hyper::{Request, Response, StatusCode};
/// use kami::{Middleware, RequestInfo, Router};
///
/// let router = Router::builder()
///     .middleware(Middleware::post(|mut res: Response<Full<Bytes>>, _: &RequestInfo| {
///         res.headers_mut().insert("x-powered-by", HeaderValue::from_static("kami"));
///         res
///     }))
///     .not_found(|_: Request<Bytes>| (StatusCode::NOT_FOUND, "Nothing to see here"))
///     .build();
///
/// router.get(|_: Request<Bytes>| "Home page").unwrap();
/// ```
pub struct RouterBuilder {
    not_found: Option<BoxedHandler>,
    middlewares: Vec<Middleware>,
    max_body_size: usize,
}

/// Requests with a larger body are answered with `413 Payload Too Large`.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

impl RouterBuilder {
    /// Creates a new `RouterBuilder` with the default `404 Not Found` handler, no middleware and a
    /// [`DEFAULT_MAX_BODY_SIZE`] body limit.
    pub fn new() -> RouterBuilder {
        RouterBuilder {
            not_found: None,
            middlewares: Vec::new(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Replaces the handler used when no route matches the request.
    pub fn not_found<H: Handler>(mut self, handler: H) -> RouterBuilder {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// Adds a global middleware. Global middlewares run outermost, in the order they were added.
    pub fn middleware(mut self, middleware: Middleware) -> RouterBuilder {
        self.middlewares.push(middleware);
        self
    }

    /// Sets the largest request body, in bytes, the [RouterService](./struct.RouterService.html)
    /// reads before answering `413 Payload Too Large` without running any handler.
    pub fn max_body_size(mut self, limit: usize) -> RouterBuilder {
        self.max_body_size = limit;
        self
    }

    /// Creates the root router handle.
    pub fn build(self) -> Router {
        let not_found = self
            .not_found
            .unwrap_or_else(|| Arc::new(handler::default_not_found));

        Router::from_shared(Arc::new(Shared::new(self.middlewares, not_found, self.max_body_size)))
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        RouterBuilder::new()
    }
}

impl Debug for RouterBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ custom_not_found: {}, middlewares: {:?}, max_body_size: {} }}",
            self.not_found.is_some(),
            self.middlewares,
            self.max_body_size
        )
    }
}
