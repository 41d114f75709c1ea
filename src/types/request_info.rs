use crate::helpers;
use crate::types::RouteParams;
use hyper::{HeaderMap, Method, Request, Uri, Version};
use std::net::SocketAddr;
use std::sync::Arc;

/// Represents some information for the incoming request.
///
/// It's handed to every [`Responder`](./trait.Responder.html) and to post middlewares, because the
/// request itself has already been consumed by the route handler when they run.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    inner: Arc<RequestInfoInner>,
}

#[derive(Debug)]
struct RequestInfoInner {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    remote_addr: Option<SocketAddr>,
    route_params: RouteParams,
}

impl RequestInfo {
    pub(crate) fn new_from_req<B>(req: &Request<B>) -> Self {
        let meta = helpers::req_meta(req.extensions());

        let inner = RequestInfoInner {
            method: req.method().clone(),
            uri: req.uri().clone(),
            version: req.version(),
            headers: req.headers().clone(),
            remote_addr: meta.and_then(|meta| meta.remote_addr().copied()),
            route_params: meta
                .and_then(|meta| meta.route_params().cloned())
                .unwrap_or_default(),
        };

        RequestInfo { inner: Arc::new(inner) }
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.inner.headers
    }

    /// Returns the request method.
    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    /// Returns the request uri.
    pub fn uri(&self) -> &Uri {
        &self.inner.uri
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version
    }

    /// Returns the remote address of the connection, when the request came through a
    /// [`RequestService`](./struct.RequestService.html).
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.inner.remote_addr
    }

    /// Returns the route parameters bound to the request. The map is empty for unmatched requests.
    pub fn params(&self) -> &RouteParams {
        &self.inner.route_params
    }

    /// Returns the route parameter value mapped with the specified key.
    pub fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&String> {
        self.params().get(param_name)
    }
}
