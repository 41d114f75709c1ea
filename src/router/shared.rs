use crate::dispatcher::Dispatcher;
use crate::handler::BoxedHandler;
use crate::middleware::{self, Middleware};
use crate::tree::Tree;
use hyper::Method;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// The state shared by every handle derived from one router.
///
/// Routes are collected into `pending` until the router starts serving. At that point the tree is
/// taken out, frozen and handed to the dispatcher, which is then read without any locking.
pub(crate) struct Shared {
    pending: Mutex<Option<Tree<BoxedHandler>>>,
    dispatcher: OnceLock<Dispatcher>,
    serving: AtomicBool,
    global: Vec<Middleware>,
    not_found: BoxedHandler,
    max_body_size: usize,
}

impl Shared {
    pub(crate) fn new(global: Vec<Middleware>, not_found: BoxedHandler, max_body_size: usize) -> Shared {
        let not_found = middleware::compose(&global, not_found);
        Shared {
            pending: Mutex::new(Some(Tree::new())),
            dispatcher: OnceLock::new(),
            serving: AtomicBool::new(false),
            global,
            not_found,
            max_body_size,
        }
    }

    pub(crate) fn global(&self) -> &[Middleware] {
        &self.global
    }

    pub(crate) fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Inserts an already wrapped handler.
    ///
    /// # Panics
    ///
    /// Panics once the router has started serving.
    pub(crate) fn register(&self, method: Method, path: &str, handler: BoxedHandler) -> crate::Result<()> {
        // `serving` is only ever set while `pending` is locked.
        let mut pending = self.pending.lock();
        match pending.as_mut() {
            Some(tree) if !self.serving.load(Ordering::Acquire) => tree.insert(method, path, handler),
            _ => panic!(
                "cannot register route {} {}: the router is already serving requests",
                method, path
            ),
        }
    }

    /// Switches to the serving phase on the first call and returns the dispatcher.
    pub(crate) fn start(&self) -> &Dispatcher {
        self.dispatcher.get_or_init(|| {
            let mut pending = self.pending.lock();
            self.serving.store(true, Ordering::Release);

            let tree = pending.take().unwrap_or_default().freeze();
            let dispatcher = Dispatcher::new(tree, Arc::clone(&self.not_found));
            info!(routes = dispatcher.routes(), "router started serving, registration is closed");
            dispatcher
        })
    }

    pub(crate) fn is_serving(&self) -> bool {
        self.serving.load(Ordering::Acquire)
    }
}
