use crate::handler::BoxedHandler;
use crate::types::RequestInfo;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use self::post::PostMiddleware;
use self::pre::PreMiddleware;

mod post;
mod pre;

type Decorator = dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static;

/// A middleware is a decorator: it takes the next handler in the chain and returns a handler
/// wrapping it. Please refer to the [Middleware](./index.html#middleware) section for more info.
///
/// Middlewares are composed in the order they are listed: the first one is the outermost, so it
/// runs first on the way in and last on the way out.
#[derive(Clone)]
pub struct Middleware {
    decorator: Arc<Decorator>,
}

impl Middleware {
    /// Creates a middleware from a decorator function. The decorator may call the next handler
    /// any number of times, including not at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use hyper::{header, Request, StatusCode};
    /// use kami::{BoxedHandler, Middleware, Responder};
    /// use std::sync::Arc;
    ///
    /// let require_auth = Middleware::new(|next: BoxedHandler| -> BoxedHandler {
    ///     Arc::new(move |req: Request<Bytes>| -> Box<dyn Responder> {
    ///         if req.headers().contains_key(header::AUTHORIZATION) {
    ///             next.call(req)
    ///         } else {
    ///             Box::new(StatusCode::UNAUTHORIZED)
    ///         }
    ///     })
    /// });
    ///
    /// let router = kami::Router::new();
    /// let admin = router.with_prefix("/admin").with_middleware([require_auth]);
    /// admin.get(|_: Request<Bytes>| "Admin page").unwrap();
    /// ```
    pub fn new<F>(decorator: F) -> Middleware
    where
        F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
    {
        Middleware {
            decorator: Arc::new(decorator),
        }
    }

    /// Creates a middleware which transforms the request before the next handler sees it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use hyper::header::HeaderValue;
    /// use hyper::Request;
    /// use kami::Middleware;
    ///
    /// let tag_request = Middleware::pre(|mut req: Request<Bytes>| {
    ///     req.headers_mut().insert("x-tagged", HeaderValue::from_static("yes"));
    ///     req
    /// });
    /// # let _ = tag_request;
    /// ```
    pub fn pre<F>(transform: F) -> Middleware
    where
        F: Fn(Request<Bytes>) -> Request<Bytes> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        Middleware::new(move |next: BoxedHandler| -> BoxedHandler {
            Arc::new(PreMiddleware::new(Arc::clone(&transform), next))
        })
    }

    /// Creates a middleware which transforms the response rendered by the next handler. The
    /// [request info](./struct.RequestInfo.html) is passed along because the request itself has been consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use http_body_util::Full;
    /// use hyper::header::HeaderValue;
    /// use hyper::Response;
    /// use kami::{Middleware, RequestInfo};
    ///
    /// let add_header = Middleware::post(|mut res: Response<Full<Bytes>>, _: &RequestInfo| {
    ///     res.headers_mut().insert("x-custom-header", HeaderValue::from_static("some value"));
    ///     res
    /// });
    /// # let _ = add_header;
    /// ```
    pub fn post<F>(transform: F) -> Middleware
    where
        F: Fn(Response<Full<Bytes>>, &RequestInfo) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        Middleware::new(move |next: BoxedHandler| -> BoxedHandler {
            Arc::new(PostMiddleware::new(Arc::clone(&transform), next))
        })
    }

    pub(crate) fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self.decorator)(next)
    }
}

impl Debug for Middleware {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Middleware {{ decorator: {:p} }}", Arc::as_ptr(&self.decorator))
    }
}

/// Wraps `handler` with `chain`; the first middleware of the chain ends up outermost.
pub(crate) fn compose<'a, I>(chain: I, handler: BoxedHandler) -> BoxedHandler
where
    I: IntoIterator<Item = &'a Middleware>,
    I::IntoIter: DoubleEndedIterator,
{
    chain.into_iter().rev().fold(handler, |next, middleware| middleware.wrap(next))
}
