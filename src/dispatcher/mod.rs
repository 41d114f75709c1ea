use crate::handler::BoxedHandler;
use crate::helpers;
use crate::responders::internal_server_error;
use crate::tree::FrozenTree;
use crate::types::{RequestInfo, RequestMeta, RouteParams};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, trace};

/// The serving phase driver: owns the frozen route tree and turns requests into responses.
pub(crate) struct Dispatcher {
    tree: FrozenTree<BoxedHandler>,
    not_found: BoxedHandler,
}

impl Dispatcher {
    pub(crate) fn new(tree: FrozenTree<BoxedHandler>, not_found: BoxedHandler) -> Self {
        Dispatcher { tree, not_found }
    }

    pub(crate) fn routes(&self) -> usize {
        self.tree.len()
    }

    /// Looks the request up, binds the route parameters into its extensions and runs the matched
    /// (or the not-found) handler. The handlers stored in the tree already carry their middleware
    /// chains.
    ///
    /// A panic raised by a handler, a middleware or a responder is caught here and answered with
    /// `500 Internal Server Error`.
    pub(crate) fn dispatch(&self, mut req: Request<Bytes>) -> Response<Full<Bytes>> {
        let target_path = helpers::percent_decode_request_path(req.uri().path());

        let (handler, route_params) = match self.tree.lookup(req.method(), &target_path) {
            Some(found) => (Arc::clone(found.value), found.params),
            None => {
                trace!(method = %req.method(), path = %target_path, "no route matched");
                (Arc::clone(&self.not_found), RouteParams::new())
            }
        };

        helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_route_params(route_params));
        let req_info = RequestInfo::new_from_req(&req);

        match panic::catch_unwind(AssertUnwindSafe(|| handler.call(req).respond(&req_info))) {
            Ok(res) => res,
            Err(fault) => {
                error!(
                    method = %req_info.method(),
                    path = %req_info.uri().path(),
                    fault = panic_message(&*fault),
                    "handler panicked while serving the request"
                );
                internal_server_error()
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic payload"
    }
}
