use std::error::Error as StdError;

/// The error type returned by route registration and by the request services.
///
/// Faults raised inside route handlers or middlewares are never turned into this type: the
/// dispatcher converts them into a `500 Internal Server Error` response instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The route path can not be parsed, e.g. it doesn't start with `/` or a wildcard is not the
    /// final segment.
    #[error("invalid route path {path:?}: {reason}")]
    MalformedPattern { path: String, reason: &'static str },

    /// The route path binds a different parameter name at a position where another route already
    /// bound one.
    #[error("route path {path:?} conflicts with the existing route path {with:?}")]
    Conflict { path: String, with: String },

    /// The incoming request body could not be collected.
    #[error("couldn't read the request body: {0}")]
    Body(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn malformed<P: Into<String>>(path: P, reason: &'static str) -> Error {
        Error::MalformedPattern {
            path: path.into(),
            reason,
        }
    }
}
