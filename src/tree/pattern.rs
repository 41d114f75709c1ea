use crate::Error;

/// One `/` delimited piece of a route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Static(&'a str),
    Param(&'a str),
    Wildcard(&'a str),
}

/// Splits a route path into its segments.
///
/// Empty segments are dropped, so `/users/` and `/users` describe the same route and `/` has no
/// segments at all.
pub(crate) fn parse(path: &str) -> crate::Result<Vec<Segment<'_>>> {
    if !path.starts_with('/') {
        return Err(Error::malformed(path, "path must start with '/'"));
    }

    let mut segments = Vec::new();
    let mut parts = path.split('/').filter(|part| !part.is_empty()).peekable();

    while let Some(part) = parts.next() {
        let segment = if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() {
                return Err(Error::malformed(path, "parameter name must not be empty"));
            }
            Segment::Param(name)
        } else if let Some(name) = part.strip_prefix('*') {
            if name.is_empty() {
                return Err(Error::malformed(path, "wildcard name must not be empty"));
            }
            if parts.peek().is_some() {
                return Err(Error::malformed(path, "wildcard must be the final segment"));
            }
            Segment::Wildcard(name)
        } else {
            Segment::Static(part)
        };

        segments.push(segment);
    }

    Ok(segments)
}
