use crate::handler::{BoxedHandler, Handler};
use crate::responders::Responder;
use crate::types::RequestInfo;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use std::sync::Arc;

/// Decorator which renders the wrapped handler's responder and transforms the resulting response.
pub(crate) struct PostMiddleware<F> {
    transform: Arc<F>,
    next: BoxedHandler,
}

impl<F> PostMiddleware<F> {
    pub(crate) fn new(transform: Arc<F>, next: BoxedHandler) -> Self {
        PostMiddleware { transform, next }
    }
}

impl<F> Handler for PostMiddleware<F>
where
    F: Fn(Response<Full<Bytes>>, &RequestInfo) -> Response<Full<Bytes>> + Send + Sync + 'static,
{
    fn call(&self, req: Request<Bytes>) -> Box<dyn Responder> {
        let info = RequestInfo::new_from_req(&req);
        let res = self.next.call(req).respond(&info);
        Box::new((*self.transform)(res, &info))
    }
}
