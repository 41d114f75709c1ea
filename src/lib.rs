//! `kami` is a small, composable HTTP router with middleware support for the Rust HTTP library [hyper](https://hyper.rs/).
//!
//! Kami's core features:
//!
//! - 🌀 Routes are matched by a segment trie: literal segments, `:name` parameters and a trailing `*name` wildcard
//!
//! - 🚀 The route table is frozen and compressed when the first request arrives, so serving never takes a lock
//!
//! - 🍺 Route handlers may return anything implementing [`Responder`], including [JSON](./responders/struct.Json.html)
//!
//! - 🔥 Router handles are immutable values: derive one per path prefix and middleware chain and pass them around
//!
//! - ❗ A panicking handler answers `500 Internal Server Error` instead of tearing down the connection
//!
//! ## Basic Example
//!
//! A simple example using `kami` with `hyper` would look like the following:
//!
//! ```no_run
//! use bytes::Bytes;
//! use hyper::service::Service;
//! use hyper::{Request, StatusCode};
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! // Import the kami prelude traits.
//! use kami::prelude::*;
//! use kami::{Middleware, Router, RouterService};
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! // A handler for "/" page.
//! fn home_handler(_: Request<Bytes>) -> &'static str {
//!     "Home page"
//! }
//!
//! // A handler for "/users/:userId" page.
//! fn user_handler(req: Request<Bytes>) -> String {
//!     let user_id = req.param("userId").unwrap();
//!     format!("Hello {}", user_id)
//! }
//!
//! // A middleware which logs an http request.
//! fn logger(req: Request<Bytes>) -> Request<Bytes> {
//!     println!("{:?} {} {}", req.remote_addr(), req.method(), req.uri().path());
//!     req
//! }
//!
//! // Create a `Router` and register the routes through derived handles.
//! fn router() -> kami::Result<Router> {
//!     let router = Router::builder()
//!         .middleware(Middleware::pre(logger))
//!         .not_found(|_: Request<Bytes>| (StatusCode::NOT_FOUND, "Page not found"))
//!         .build();
//!
//!     router.get(home_handler)?;
//!     router.with_prefix("/users/:userId").get(user_handler)?;
//!
//!     Ok(router)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router = router()?;
//!
//!     // Create a Service from the router above to handle incoming requests.
//!     let service = Arc::new(RouterService::new(router));
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!     println!("App is running on: {}", addr);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = service.clone();
//!
//!         tokio::spawn(async move {
//!             // Get the request service for this connection
//!             let request_service = router_service.call(&stream).await.unwrap();
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!
//!             // Serve the connection
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Handlers
//!
//! A handler is any function or closure taking a `Request<Bytes>` and returning a [`Responder`].
//! Handlers are synchronous; the [`RouterService`] runs them on tokio's blocking thread pool.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::{Request, StatusCode};
//! use kami::Router;
//!
//! // A handler for "/about" page.
//! fn about_handler(_: Request<Bytes>) -> (StatusCode, &'static str) {
//!     (StatusCode::OK, "About page")
//! }
//!
//! let router = Router::new();
//! router.with_prefix("/about").get(about_handler).unwrap();
//! router.with_prefix("/contact").get(|_: Request<Bytes>| "Contact page").unwrap();
//! ```
//!
//! ### Route Paths
//!
//! A path is a list of `/` separated segments. A segment is either matched verbatim, or it is a
//! `:name` parameter matching exactly one non-empty segment, or a `*name` wildcard matching the
//! rest of the path. A wildcard is only allowed as the last segment. When several routes could
//! match, literal segments win over parameters, which win over wildcards.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::{Method, Request};
//! use kami::prelude::*;
//! use kami::Router;
//!
//! let router = Router::new();
//! let users = router.with_prefix("/users");
//!
//! users.with_prefix("/me").get(|_: Request<Bytes>| "It's you").unwrap();
//! users.with_prefix("/:id").get(|_: Request<Bytes>| "Some user").unwrap();
//! router
//!     .with_prefix("/files/*path")
//!     .get(|req: Request<Bytes>| format!("File {}", req.param("path").unwrap()))
//!     .unwrap();
//!
//! let get = |path: &str| Request::builder().method(Method::GET).uri(path).body(Bytes::new()).unwrap();
//! assert!(router.dispatch(get("/users/me")).status().is_success());
//! assert!(router.dispatch(get("/files/a/b/c.txt")).status().is_success());
//! ```
//!
//! #### Handle 404 Pages
//!
//! Requests matching no route are answered by the not-found handler, `404 Not Found` unless the
//! [RouterBuilder](./struct.RouterBuilder.html) configures another one.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::{Request, StatusCode};
//! use kami::Router;
//!
//! let router = Router::builder()
//!     .not_found(|_: Request<Bytes>| (StatusCode::NOT_FOUND, "NOT FOUND"))
//!     .build();
//! router.with_prefix("/users").get(|_: Request<Bytes>| "User List").unwrap();
//! ```
//!
//! ### Route Parameters
//!
//! The values captured by parameters and wildcards are bound to the request and read through the
//! [RequestExt](./prelude/trait.RequestExt.html) methods.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::Request;
//! use kami::prelude::*;
//! use kami::Router;
//!
//! let router = Router::new();
//! router
//!     .with_prefix("/users/:userName/books/:bookName")
//!     .get(|req: Request<Bytes>| {
//!         let user_name = req.param("userName").unwrap();
//!         let book_name = req.param("bookName").unwrap();
//!         format!("Username: {}, Book Name: {}", user_name, book_name)
//!     })
//!     .unwrap();
//! ```
//!
//! ### Prefixes
//!
//! [`Router::with_prefix`] returns a new handle whose routes live under the given path. The
//! original handle is left as it was, and every handle registers into the same route table.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::Request;
//! use kami::Router;
//!
//! let router = Router::new();
//! let api = router.with_prefix("/api");
//! let v1 = api.with_prefix("/v1");
//!
//! v1.with_prefix("/users").get(|_: Request<Bytes>| "v1 users").unwrap();
//! api.with_prefix("/health").get(|_: Request<Bytes>| "ok").unwrap();
//!
//! assert_eq!(router.path(), "/");
//! assert_eq!(v1.path(), "/api/v1");
//! ```
//!
//! ## Middleware
//!
//! A [`Middleware`] wraps a handler into another handler. It can run code before and after the
//! wrapped handler, or answer on its own without calling it.
//!
//! Middlewares come from three places and always compose in this order, the first being the
//! outermost: the global middlewares of the [RouterBuilder](./struct.RouterBuilder.html), the
//! middlewares accumulated on the handle with [`Router::with_middleware`], and the middlewares
//! given to a single route with [`Router::handle_with`].
//!
//! ### Pre Middleware
//!
//! ```
//! use bytes::Bytes;
//! use hyper::header::HeaderValue;
//! use hyper::Request;
//! use kami::{Middleware, Router};
//!
//! let router = Router::new();
//! let tagged = router.with_middleware([Middleware::pre(|mut req: Request<Bytes>| {
//!     req.headers_mut().insert("x-tagged", HeaderValue::from_static("yes"));
//!     req
//! })]);
//! tagged.with_prefix("/tagged").get(|_: Request<Bytes>| "tagged").unwrap();
//! ```
//!
//! ### Post Middleware
//!
//! ```
//! use bytes::Bytes;
//! use http_body_util::Full;
//! use hyper::header::HeaderValue;
//! use hyper::{Request, Response};
//! use kami::{Middleware, RequestInfo, Router};
//!
//! let router = Router::builder()
//!     .middleware(Middleware::post(|mut res: Response<Full<Bytes>>, info: &RequestInfo| {
//!         println!("{} {} -> {}", info.method(), info.uri().path(), res.status());
//!         res.headers_mut().insert("x-custom-header", HeaderValue::from_static("some value"));
//!         res
//!     }))
//!     .build();
//! router.get(|_: Request<Bytes>| "Home page").unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Registration reports malformed paths and conflicting parameter names as an [`Error`].
//! Registering a route after the router started serving is a programming error and panics.
//!
//! While serving, a panic raised by a handler or a middleware is caught, logged with `tracing`
//! and answered with `500 Internal Server Error`.
//!
//! ```
//! use bytes::Bytes;
//! use hyper::{Method, Request, StatusCode};
//! use kami::{Error, Router};
//!
//! let router = Router::new();
//! router.with_prefix("/users/:id").get(|_: Request<Bytes>| "user").unwrap();
//!
//! let err = router.with_prefix("/users/:name").post(|_: Request<Bytes>| "user").unwrap_err();
//! assert!(matches!(err, Error::Conflict { .. }));
//!
//! router
//!     .with_prefix("/boom")
//!     .get(|_: Request<Bytes>| -> &'static str { panic!("something went wrong") })
//!     .unwrap();
//!
//! let req = Request::builder().method(Method::GET).uri("/boom").body(Bytes::new()).unwrap();
//! assert_eq!(router.dispatch(req).status(), StatusCode::INTERNAL_SERVER_ERROR);
//! ```

pub use self::error::Error;
pub use self::handler::{BoxedHandler, Handler};
pub use self::middleware::Middleware;
pub use self::responders::Responder;
pub use self::route::Route;
pub use self::router::{Router, RouterBuilder, DEFAULT_MAX_BODY_SIZE};
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::types::{RequestInfo, RouteParams};

mod dispatcher;
mod error;
pub mod ext;
mod handler;
mod helpers;
mod middleware;
pub mod prelude;
pub mod responders;
mod route;
mod router;
mod service;
pub mod tree;
mod types;

/// A Result type often returned from methods that can have `kami` errors.
pub type Result<T> = std::result::Result<T, Error>;
