#![allow(dead_code)]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use kami::{Router, RouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot::{self, Sender};

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn new_request(&self, method: &str, route: &str) -> http::request::Builder {
        Request::builder()
            .method(method.to_ascii_uppercase().as_str())
            .uri(format!("http://{}{}", self.addr(), route))
    }

    /// Sends `req` over a fresh HTTP/1 connection.
    pub async fn send(&self, req: Request<Full<Bytes>>) -> Response<Incoming> {
        let stream = TcpStream::connect(self.addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(conn);

        sender.send_request(req).await.unwrap()
    }

    pub async fn get(&self, route: &str) -> Response<Incoming> {
        let req = self.new_request("GET", route).body(Full::new(Bytes::new())).unwrap();
        self.send(req).await
    }

    pub fn shutdown(self) {
        let _ = self.tx.send(());
    }
}

pub async fn serve(router: Router) -> Serve {
    // Bind a TCP listener to an available port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router_service = Arc::new(RouterService::new(router));
    let (tx, mut rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            let (stream, _) = tokio::select! {
                accepted = listener.accept() => accepted.unwrap(),
                _ = &mut rx => break,
            };
            let router_service = router_service.clone();

            tokio::spawn(async move {
                let request_service = router_service.call(&stream).await.unwrap();
                let io = TokioIo::new(stream);
                let _ = Builder::new(TokioExecutor::new())
                    .serve_connection(io, request_service)
                    .await;
            });
        }
    });

    Serve { addr, tx }
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::fmt::Debug,
{
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
