use super::pattern::Segment;
use http::Method;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Static,
    Param,
    Wildcard,
}

/// A node of the segment trie.
///
/// For a static node `prefix` holds one or more literal segments joined by `/` (more than one
/// only after compression). For a parameter or wildcard node it holds the bound name without the
/// leading `:` or `*`.
pub(crate) struct Node<T> {
    pub(crate) prefix: String,
    pub(crate) kind: Kind,
    // The route path that created this node, reported when another route conflicts with it.
    pub(crate) origin: String,
    // Children in lookup precedence: statics, then the parameter, then the wildcard.
    pub(crate) statics: Vec<Node<T>>,
    pub(crate) param: Option<Box<Node<T>>>,
    pub(crate) wildcard: Option<Box<Node<T>>>,
    pub(crate) terminal: HashMap<Method, T>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Node<T> {
        Node::new(Kind::Static, "", "/")
    }

    fn new(kind: Kind, prefix: &str, origin: &str) -> Node<T> {
        Node {
            prefix: prefix.to_owned(),
            kind,
            origin: origin.to_owned(),
            statics: Vec::new(),
            param: None,
            wildcard: None,
            terminal: HashMap::new(),
        }
    }

    /// Walks the existing nodes along `segments` and returns the route path of the first node
    /// which binds a different parameter or wildcard name at the same position.
    pub(crate) fn find_conflict(&self, segments: &[Segment<'_>]) -> Option<&str> {
        let mut node = self;

        for segment in segments {
            let next = match *segment {
                Segment::Static(literal) => node.statics.iter().find(|child| child.prefix == literal),
                Segment::Param(name) => match node.param.as_deref() {
                    Some(child) if child.prefix != name => return Some(child.origin.as_str()),
                    child => child,
                },
                Segment::Wildcard(name) => match node.wildcard.as_deref() {
                    Some(child) if child.prefix != name => return Some(child.origin.as_str()),
                    child => child,
                },
            };

            match next {
                Some(child) => node = child,
                // Everything below this point would be freshly created.
                None => return None,
            }
        }

        None
    }

    /// Creates the missing nodes along `segments` and stores `value` under `method` at the last
    /// one, returning the value it replaced.
    pub(crate) fn insert(&mut self, segments: &[Segment<'_>], path: &str, method: Method, value: T) -> Option<T> {
        let mut node = self;

        for segment in segments {
            node = match *segment {
                Segment::Static(literal) => {
                    let idx = match node.statics.iter().position(|child| child.prefix == literal) {
                        Some(idx) => idx,
                        None => {
                            node.statics.push(Node::new(Kind::Static, literal, path));
                            node.statics.len() - 1
                        }
                    };
                    &mut node.statics[idx]
                }
                Segment::Param(name) => &mut **node
                    .param
                    .get_or_insert_with(|| Box::new(Node::new(Kind::Param, name, path))),
                Segment::Wildcard(name) => &mut **node
                    .wildcard
                    .get_or_insert_with(|| Box::new(Node::new(Kind::Wildcard, name, path))),
            };
        }

        node.terminal.insert(method, value)
    }

    /// Merges chains of single-child static nodes, children first.
    pub(crate) fn compress(&mut self) {
        for child in self.statics.iter_mut() {
            child.compress();
        }
        if let Some(child) = self.param.as_mut() {
            child.compress();
        }
        if let Some(child) = self.wildcard.as_mut() {
            child.compress();
        }

        // The root keeps its empty prefix.
        if self.kind != Kind::Static || self.prefix.is_empty() || !self.terminal.is_empty() {
            return;
        }
        if self.statics.len() != 1 || self.param.is_some() || self.wildcard.is_some() {
            return;
        }

        if let Some(child) = self.statics.pop() {
            self.prefix.push('/');
            self.prefix.push_str(&child.prefix);
            self.terminal = child.terminal;
            self.statics = child.statics;
            self.param = child.param;
            self.wildcard = child.wildcard;
        }
    }

    /// Finds the value registered for `method` at `path`, pushing the captured parameters onto
    /// `params`. Captures of abandoned branches are popped again before returning.
    pub(crate) fn find<'n, 'p>(
        &'n self,
        method: &Method,
        path: &'p str,
        params: &mut Vec<(&'n str, &'p str)>,
    ) -> Option<&'n T> {
        let path = path.strip_prefix('/').unwrap_or(path);

        if path.is_empty() {
            return self.terminal.get(method);
        }

        for child in self.statics.iter() {
            if let Some(rest) = strip_literal(&child.prefix, path) {
                if let Some(value) = child.find(method, rest, params) {
                    return Some(value);
                }
            }
        }

        if let Some(child) = self.param.as_deref() {
            let end = path.find('/').unwrap_or(path.len());
            if end > 0 {
                params.push((child.prefix.as_str(), &path[..end]));
                if let Some(value) = child.find(method, &path[end..], params) {
                    return Some(value);
                }
                params.pop();
            }
        }

        if let Some(child) = self.wildcard.as_deref() {
            if let Some(value) = child.terminal.get(method) {
                params.push((child.prefix.as_str(), path));
                return Some(value);
            }
        }

        None
    }

    pub(crate) fn len(&self) -> usize {
        self.terminal.len()
            + self.statics.iter().map(Node::len).sum::<usize>()
            + self.param.as_ref().map_or(0, |child| child.len())
            + self.wildcard.as_ref().map_or(0, |child| child.len())
    }
}

// Matches `prefix` against the start of `path` only when it ends on a segment boundary.
fn strip_literal<'p>(prefix: &str, path: &'p str) -> Option<&'p str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

impl<T> Debug for Node<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            Kind::Static => self.prefix.clone(),
            Kind::Param => format!(":{}", self.prefix),
            Kind::Wildcard => format!("*{}", self.prefix),
        };

        f.debug_struct("Node")
            .field("prefix", &label)
            .field("methods", &self.terminal.keys().collect::<Vec<_>>())
            .field("statics", &self.statics)
            .field("param", &self.param)
            .field("wildcard", &self.wildcard)
            .finish()
    }
}
