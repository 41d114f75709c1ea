//! The prelude brings the request extension methods into scope.
//!
//! ```
//! use kami::prelude::*;
//! ```

pub use crate::ext::RequestExt;
