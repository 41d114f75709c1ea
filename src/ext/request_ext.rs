use crate::helpers;
use crate::types::RouteParams;
use hyper::Request;
use std::net::SocketAddr;

lazy_static::lazy_static! {
    static ref EMPTY_ROUTE_PARAMS: RouteParams = RouteParams::new();
}

/// A extension trait which extends the [`hyper::Request`](https://docs.rs/hyper/1/hyper/struct.Request.html) type with some helpful methods.
pub trait RequestExt {
    /// It returns the route parameters as [RouteParams](../struct.RouteParams.html) type with the name of the parameter specified in the path as their respective keys.
    ///
    /// A request which matched no route, or a route without parameters, has an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use hyper::Request;
    /// use kami::prelude::*;
    /// use kami::Router;
    ///
    /// let router = Router::new();
    /// router
    ///     .with_prefix("/users/:userName/books/:bookName")
    ///     .get(|req: Request<Bytes>| {
    ///         let params = req.params();
    ///         format!("User: {}, Book: {}", params.get("userName").unwrap(), params.get("bookName").unwrap())
    ///     })
    ///     .unwrap();
    /// ```
    fn params(&self) -> &RouteParams;

    /// It returns the route parameter value by the name of the parameter specified in the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use hyper::Request;
    /// use kami::prelude::*;
    /// use kami::Router;
    ///
    /// let router = Router::new();
    /// router
    ///     .with_prefix("/users/:userName")
    ///     .get(|req: Request<Bytes>| format!("Hello {}", req.param("userName").unwrap()))
    ///     .unwrap();
    /// ```
    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&String>;

    /// It returns the remote address of the incoming request, when it came through a
    /// [RouterService](../struct.RouterService.html).
    fn remote_addr(&self) -> Option<SocketAddr>;
}

impl<B> RequestExt for Request<B> {
    fn params(&self) -> &RouteParams {
        helpers::req_meta(self.extensions())
            .and_then(|meta| meta.route_params())
            .unwrap_or(&EMPTY_ROUTE_PARAMS)
    }

    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&String> {
        self.params().get(param_name.as_ref())
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        helpers::req_meta(self.extensions()).and_then(|meta| meta.remote_addr().copied())
    }
}
