use crate::handler::{BoxedHandler, Handler};
use crate::responders::Responder;
use bytes::Bytes;
use hyper::Request;
use std::sync::Arc;

/// Decorator which transforms the request before handing it to the wrapped handler.
pub(crate) struct PreMiddleware<F> {
    transform: Arc<F>,
    next: BoxedHandler,
}

impl<F> PreMiddleware<F> {
    pub(crate) fn new(transform: Arc<F>, next: BoxedHandler) -> Self {
        PreMiddleware { transform, next }
    }
}

impl<F> Handler for PreMiddleware<F>
where
    F: Fn(Request<Bytes>) -> Request<Bytes> + Send + Sync + 'static,
{
    fn call(&self, req: Request<Bytes>) -> Box<dyn Responder> {
        self.next.call((*self.transform)(req))
    }
}
