use bytes::Bytes;
use hyper::service::Service;
use hyper::{Request, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
// Import the kami prelude traits.
use kami::prelude::*;
use kami::responders::Json;
use kami::{Router, RouterService};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
struct User {
    id: String,
    name: String,
}

// A handler for "/" page.
fn hello(_: Request<Bytes>) -> Json<HashMap<&'static str, &'static str>> {
    Json::new(HashMap::from([("message", "Hello, World!")]), StatusCode::OK)
}

// A handler for "/user/:id" page.
fn get_user(req: Request<Bytes>) -> Json<User> {
    let user = User {
        id: req.param("id").cloned().unwrap_or_default(),
        name: "John Doe".to_owned(),
    };
    Json::new(user, StatusCode::OK)
}

fn router() -> kami::Result<Router> {
    let router = Router::new();

    router.get(hello)?;
    router.with_prefix("/user/:id").get(get_user)?;

    Ok(router)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The address on which the server will be listening.
    let addr: SocketAddr = match std::env::args().nth(1) {
        Some(addr) => addr.parse()?,
        None => SocketAddr::from(([127, 0, 0, 1], 3000)),
    };

    // Create a Service from the router above to handle incoming requests.
    let service = Arc::new(RouterService::new(router()?));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "kami quickstart is listening");

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let service = Arc::clone(&service);

                tokio::task::spawn(async move {
                    let request_service = match service.call(&stream).await {
                        Ok(request_service) => request_service,
                        Err(never) => match never {},
                    };
                    let io = TokioIo::new(stream);

                    if let Err(err) = Builder::new(TokioExecutor::new())
                        .serve_connection(io, request_service)
                        .await
                    {
                        error!(error = %err, "error serving connection");
                    }
                });
            }
            Err(err) => {
                error!(error = %err, "error accepting connection");
            }
        }
    }
}
