//! The response side of the handler contract.
//!
//! A route handler returns anything that implements [`Responder`]; the dispatcher then asks it to
//! render itself into a hyper response once the whole middleware chain has run.

use crate::types::RequestInfo;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};

pub use self::json::{Json, JsonError};

mod json;

/// Writes the status and the body of a response for the request described by `info`.
pub trait Responder: Send {
    fn respond(self: Box<Self>, info: &RequestInfo) -> Response<Full<Bytes>>;
}

impl Responder for Box<dyn Responder> {
    fn respond(self: Box<Self>, info: &RequestInfo) -> Response<Full<Bytes>> {
        (*self).respond(info)
    }
}

impl Responder for Response<Full<Bytes>> {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        *self
    }
}

impl Responder for StatusCode {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        status_text(*self, self.canonical_reason().unwrap_or_default())
    }
}

impl Responder for &'static str {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        status_text(StatusCode::OK, *self)
    }
}

impl Responder for String {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        status_text(StatusCode::OK, *self)
    }
}

impl Responder for (StatusCode, &'static str) {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        status_text(self.0, self.1)
    }
}

impl Responder for (StatusCode, String) {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        let (status, body) = *self;
        status_text(status, body)
    }
}

fn status_text<B: Into<Bytes>>(status: StatusCode, body: B) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(body.into()));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
}

/// The generic response sent when a handler or a middleware panicked.
pub(crate) fn internal_server_error() -> Response<Full<Bytes>> {
    status_text(
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::INTERNAL_SERVER_ERROR
            .canonical_reason()
            .unwrap_or_default(),
    )
}

/// Sent when the request body exceeds the router's size limit.
pub(crate) fn payload_too_large() -> Response<Full<Bytes>> {
    status_text(
        StatusCode::PAYLOAD_TOO_LARGE,
        StatusCode::PAYLOAD_TOO_LARGE.canonical_reason().unwrap_or_default(),
    )
}
