use crate::responders::Responder;
use bytes::Bytes;
use hyper::{Request, StatusCode};
use std::sync::Arc;

/// A route handler: takes the request and produces a [`Responder`].
///
/// It's implemented for every `Fn(Request<Bytes>) -> R` closure or function where `R` is a
/// [`Responder`], so plain functions can be registered directly:
///
/// ```
/// use bytes::Bytes;
/// use hyper::{Request, StatusCode};
///
/// fn about_handler(_: Request<Bytes>) -> (StatusCode, &'static str) {
///     (StatusCode::OK, "About page")
/// }
///
/// let router = kami::Router::new();
/// router.get(about_handler).unwrap();
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Bytes>) -> Box<dyn Responder>;
}

impl<F, R> Handler for F
where
    F: Fn(Request<Bytes>) -> R + Send + Sync + 'static,
    R: Responder + 'static,
{
    fn call(&self, req: Request<Bytes>) -> Box<dyn Responder> {
        Box::new(self(req))
    }
}

/// A type-erased, shareable [`Handler`]. Middlewares receive and return this type.
pub type BoxedHandler = Arc<dyn Handler>;

/// Used when no route matches the request and no custom not-found handler was configured.
pub(crate) fn default_not_found(_: Request<Bytes>) -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
