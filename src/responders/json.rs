use super::{internal_server_error, Responder};
use crate::types::RequestInfo;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::warn;

/// Serializes `body` as JSON with the given status code.
///
/// ```
/// use bytes::Bytes;
/// use hyper::{Request, StatusCode};
/// use kami::prelude::*;
/// use kami::responders::Json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// fn get_user(req: Request<Bytes>) -> Json<User> {
///     let user = User {
///         id: req.param("id").cloned().unwrap_or_default(),
///         name: "John Doe".to_owned(),
///     };
///     Json::new(user, StatusCode::OK)
/// }
///
/// let router = kami::Router::new();
/// router.with_prefix("/user/:id").get(get_user).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Json<T> {
    body: T,
    status: StatusCode,
}

impl<T: Serialize> Json<T> {
    pub fn new(body: T, status: StatusCode) -> Self {
        Json { body, status }
    }
}

impl<T: Serialize + Send> Responder for Json<T> {
    fn respond(self: Box<Self>, info: &RequestInfo) -> Response<Full<Bytes>> {
        match serde_json::to_vec(&self.body) {
            Ok(data) => json_response(self.status, "application/json", data),
            Err(err) => {
                warn!(method = %info.method(), path = %info.uri().path(), error = %err, "failed to marshal response");
                let mut res = internal_server_error();
                *res.body_mut() = Full::new(Bytes::from_static(b"failed to marshal response"));
                res
            }
        }
    }
}

/// An error message rendered as `{"msg": "..."}` with the `application/problem+json` content type.
#[derive(Debug, Clone)]
pub struct JsonError {
    msg: String,
    status: StatusCode,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    msg: &'a str,
}

impl JsonError {
    pub fn new<M: Into<String>>(msg: M, status: StatusCode) -> Self {
        JsonError {
            msg: msg.into(),
            status,
        }
    }
}

impl Responder for JsonError {
    fn respond(self: Box<Self>, _: &RequestInfo) -> Response<Full<Bytes>> {
        // A struct holding a single &str always serializes.
        let data = serde_json::to_vec(&ErrorBody { msg: &self.msg }).unwrap_or_default();
        json_response(self.status, "application/problem+json", data)
    }
}

fn json_response(status: StatusCode, content_type: &'static str, data: Vec<u8>) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from(data)));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responders::tests::{info, into_text};
    use serde::ser::Error as _;
    use std::collections::BTreeMap;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("nope"))
        }
    }

    #[tokio::test]
    async fn should_render_json() {
        let body = BTreeMap::from([("message", "Hello, World!")]);
        let res = Box::new(Json::new(body, StatusCode::OK)).respond(&info());

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(into_text(res).await, r#"{"message":"Hello, World!"}"#);
    }

    #[tokio::test]
    async fn should_render_json_errors() {
        let res = Box::new(JsonError::new("user not found", StatusCode::NOT_FOUND)).respond(&info());

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/problem+json");
        assert_eq!(into_text(res).await, r#"{"msg":"user not found"}"#);
    }

    #[tokio::test]
    async fn should_fail_with_500_when_serialization_fails() {
        let res = Box::new(Json::new(Unserializable, StatusCode::OK)).respond(&info());

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(into_text(res).await, "failed to marshal response");
    }
}
