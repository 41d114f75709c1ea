use crate::helpers;
use crate::responders::{internal_server_error, payload_too_large};
use crate::router::Router;
use crate::types::RequestMeta;
use crate::Error;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::{service::Service, Request, Response};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{error, warn};

/// The per-connection [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) handed
/// to hyper. It reads the request body, then runs the router on the blocking thread pool.
///
/// A body larger than [`Router::max_body_size`](./struct.Router.html#method.max_body_size) is
/// answered with `413 Payload Too Large` and never reaches a handler.
///
/// Cancellation is not propagated into handlers. If the client goes away while the body is being
/// read, the request is dropped; once dispatch has started on the blocking pool it runs to
/// completion and its response is discarded.
#[derive(Debug, Clone)]
pub struct RequestService {
    pub(crate) router: Arc<Router>,
    pub(crate) remote_addr: SocketAddr,
}

impl<B> Service<Request<B>> for RequestService
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Response = Response<Full<Bytes>>;
    type Error = crate::Error;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let router = self.router.clone();
        let remote_addr = self.remote_addr;

        let fut = async move {
            let (parts, body) = req.into_parts();
            let body = match Limited::new(body, router.max_body_size()).collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) if err.is::<LengthLimitError>() => {
                    warn!(
                        method = %parts.method,
                        path = %parts.uri.path(),
                        limit = router.max_body_size(),
                        "request body exceeds the size limit"
                    );
                    return Ok(payload_too_large());
                }
                Err(err) => return Err(Error::Body(err)),
            };

            let mut req = Request::from_parts(parts, body);
            helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(remote_addr));

            // Handlers are synchronous and may block.
            let res = tokio::task::spawn_blocking(move || router.dispatch(req))
                .await
                .unwrap_or_else(|err| {
                    error!(error = %err, "request dispatch task failed");
                    internal_server_error()
                });

            Ok(res)
        };

        Box::pin(fut)
    }
}

/// Hands out a [`RequestService`] per connection, all sharing one router.
#[derive(Debug, Clone)]
pub struct RequestServiceBuilder {
    router: Arc<Router>,
}

impl RequestServiceBuilder {
    /// Closes the router's registration phase and wraps it for serving.
    pub fn new(router: Router) -> Self {
        router.start();
        Self {
            router: Arc::new(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{RequestServiceBuilder, Router};
    use bytes::Bytes;
    use http::Method;
    use http_body_util::{BodyExt, Empty, Full};
    use hyper::service::Service;
    use hyper::{Request, Response, StatusCode};
    use parking_lot::Mutex;
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    #[tokio::test]
    async fn should_route_request() {
        const RESPONSE_TEXT: &str = "Hello world!";
        let remote_addr = SocketAddr::from_str("0.0.0.0:8080").unwrap();
        let router = Router::new();
        router.get(|_: Request<Bytes>| RESPONSE_TEXT).unwrap();

        let req: Request<Empty<Bytes>> = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Empty::<Bytes>::new())
            .unwrap();

        let builder = RequestServiceBuilder::new(router);
        let service = builder.build(remote_addr);

        let resp: Response<Full<Bytes>> = service.call(req).await.unwrap();
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(RESPONSE_TEXT, String::from_utf8(body_bytes.to_vec()).unwrap());
    }

    #[tokio::test]
    async fn should_reject_bodies_over_the_limit() {
        let remote_addr = SocketAddr::from_str("127.0.0.1:9000").unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::builder().max_body_size(8).build();
        let counter = Arc::clone(&hits);
        router
            .with_prefix("/upload")
            .post(move |req: Request<Bytes>| {
                counter.fetch_add(1, Ordering::SeqCst);
                format!("{} bytes", req.body().len())
            })
            .unwrap();
        let service = RequestServiceBuilder::new(router).build(remote_addr);

        let upload = |body: &'static [u8]| {
            Request::builder()
                .method(Method::POST)
                .uri("/upload")
                .body(Full::new(Bytes::from_static(body)))
                .unwrap()
        };

        let resp = service.call(upload(b"too many bytes")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let resp = service.call(upload(b"8 bytes!")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body_bytes[..], b"8 bytes");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_finish_dispatch_after_the_caller_goes_away() {
        let remote_addr = SocketAddr::from_str("127.0.0.1:9000").unwrap();
        let (started_tx, started_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let started_tx = Mutex::new(started_tx);
        let release_rx = Mutex::new(release_rx);
        let done_tx = Mutex::new(done_tx);

        let router = Router::new();
        router
            .with_prefix("/slow")
            .get(move |_: Request<Bytes>| {
                started_tx.lock().send(()).unwrap();
                release_rx.lock().recv().unwrap();
                done_tx.lock().send(()).unwrap();
                "done"
            })
            .unwrap();
        let service = RequestServiceBuilder::new(router).build(remote_addr);

        let req = Request::builder()
            .method(Method::GET)
            .uri("/slow")
            .body(Empty::<Bytes>::new())
            .unwrap();
        let in_flight = tokio::spawn(service.call(req));

        tokio::task::spawn_blocking(move || started_rx.recv().unwrap())
            .await
            .unwrap();
        in_flight.abort();
        release_tx.send(()).unwrap();

        let finished = tokio::task::spawn_blocking(move || done_rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap();
        assert!(finished.is_ok());
    }

    #[tokio::test]
    async fn should_pass_body_and_remote_addr() {
        let remote_addr = SocketAddr::from_str("192.168.1.7:5555").unwrap();
        let router = Router::new();
        router
            .with_prefix("/echo")
            .post(|req: Request<Bytes>| {
                format!(
                    "{} from {}",
                    String::from_utf8_lossy(req.body()),
                    req.remote_addr().unwrap()
                )
            })
            .unwrap();

        let service = RequestServiceBuilder::new(router).build(remote_addr);
        let req = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .body(Full::new(Bytes::from_static(b"ping")))
            .unwrap();

        let resp = service.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body_bytes[..], b"ping from 192.168.1.7:5555");
    }
}
