//! The segment trie which maps `(method, path)` pairs to route values.
//!
//! A [`Tree`] is filled during the registration phase and then frozen into a [`FrozenTree`],
//! which is compressed once and only ever read afterwards.
//!
//! ```
//! use http::Method;
//! use kami::tree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(Method::GET, "/user/list", "list").unwrap();
//! tree.insert(Method::GET, "/user/:id", "show").unwrap();
//!
//! let tree = tree.freeze();
//!
//! let found = tree.lookup(&Method::GET, "/user/bob").unwrap();
//! assert_eq!(*found.value, "show");
//! assert_eq!(found.params.get("id").map(String::as_str), Some("bob"));
//!
//! assert_eq!(*tree.lookup(&Method::GET, "/user/list").unwrap().value, "list");
//! assert!(tree.lookup(&Method::POST, "/user/list").is_none());
//! ```

use self::node::Node;
use crate::{Error, RouteParams};
use http::Method;
use std::fmt::{self, Debug, Formatter};

mod node;
mod pattern;

/// A successful lookup: the registered value and the parameters captured on the way to it.
#[derive(Debug)]
pub struct Match<'a, T> {
    pub value: &'a T,
    pub params: RouteParams,
}

/// The mutable, registration phase form of the trie.
///
/// Path syntax: segments are separated by `/`; `:name` matches exactly one non-empty segment,
/// `*name` matches the rest of the path and is only allowed as the final segment; everything
/// else is matched verbatim. Literal children are tried before the parameter child, which is
/// tried before the wildcard child.
pub struct Tree<T> {
    root: Node<T>,
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    pub fn new() -> Tree<T> {
        Tree { root: Node::root() }
    }

    /// Registers `value` for `method` at `path`.
    ///
    /// Registering the same method and path twice replaces the earlier value. A path that binds a
    /// different parameter (or wildcard) name where an existing route already binds one is
    /// rejected with [`Error::Conflict`], leaving the tree untouched.
    pub fn insert(&mut self, method: Method, path: &str, value: T) -> crate::Result<()> {
        let segments = pattern::parse(path)?;

        if let Some(with) = self.root.find_conflict(&segments) {
            return Err(Error::Conflict {
                path: path.to_owned(),
                with: with.to_owned(),
            });
        }

        self.root.insert(&segments, path, method, value);
        Ok(())
    }

    /// Finds the value registered for `method` at `path`.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Match<'_, T>> {
        lookup(&self.root, method, path)
    }

    /// Returns the number of registered `(method, path)` pairs.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Merged nodes hold several segments, which `insert` can't walk: only `freeze` may call this.
    fn compress(&mut self) {
        self.root.compress();
    }

    /// Ends the registration phase: compresses the tree and returns its read-only form.
    pub fn freeze(mut self) -> FrozenTree<T> {
        self.compress();
        let len = self.root.len();
        FrozenTree { root: self.root, len }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T> Debug for Tree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

/// The compressed, serving phase form of the trie. It can only be read.
pub struct FrozenTree<T> {
    root: Node<T>,
    len: usize,
}

impl<T> FrozenTree<T> {
    /// Finds the value registered for `method` at `path`.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Match<'_, T>> {
        lookup(&self.root, method, path)
    }

    /// Returns the number of registered `(method, path)` pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Debug for FrozenTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrozenTree").field("root", &self.root).finish()
    }
}

fn lookup<'a, T>(root: &'a Node<T>, method: &Method, path: &str) -> Option<Match<'a, T>> {
    let mut captured = Vec::new();
    let value = root.find(method, path, &mut captured)?;

    let mut params = RouteParams::with_capacity(captured.len());
    for (name, val) in captured {
        params.set(name, val);
    }

    Some(Match { value, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree(routes: &[(Method, &'static str)]) -> Tree<&'static str> {
        let mut tree = Tree::new();
        for (method, path) in routes {
            tree.insert(method.clone(), path, *path).unwrap();
        }
        tree
    }

    fn found(tree: &FrozenTree<&'static str>, method: Method, path: &str) -> Option<(&'static str, Vec<(String, String)>)> {
        tree.lookup(&method, path).map(|m| {
            let mut params = m
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Vec<_>>();
            params.sort();
            (*m.value, params)
        })
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut params = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        params.sort();
        params
    }

    #[test]
    fn should_prefer_static_over_param() {
        let tree = tree(&[(Method::GET, "/user/list"), (Method::GET, "/user/:id")]).freeze();

        assert_eq!(found(&tree, Method::GET, "/user/list"), Some(("/user/list", vec![])));
        assert_eq!(
            found(&tree, Method::GET, "/user/bob"),
            Some(("/user/:id", params(&[("id", "bob")])))
        );
    }

    #[test]
    fn should_capture_wildcard_remainder() {
        let tree = tree(&[
            (Method::GET, "/static/*path"),
            (Method::GET, "/static/favicon.ico"),
            (Method::GET, "/static/:file"),
        ])
        .freeze();

        assert_eq!(
            found(&tree, Method::GET, "/static/js/app.js"),
            Some(("/static/*path", params(&[("path", "js/app.js")])))
        );
        assert_eq!(found(&tree, Method::GET, "/static/favicon.ico"), Some(("/static/favicon.ico", vec![])));
        assert_eq!(
            found(&tree, Method::GET, "/static/app.css"),
            Some(("/static/:file", params(&[("file", "app.css")])))
        );
        assert_eq!(found(&tree, Method::GET, "/static"), None);
    }

    #[test]
    fn should_extract_multiple_params() {
        let tree = tree(&[(Method::GET, "/user/:userId/post/:postId")]).freeze();

        assert_eq!(
            found(&tree, Method::GET, "/user/alice/post/42"),
            Some(("/user/:userId/post/:postId", params(&[("userId", "alice"), ("postId", "42")])))
        );
        assert_eq!(found(&tree, Method::GET, "/user/alice/post"), None);
        assert_eq!(found(&tree, Method::GET, "/user/alice/post/42/extra"), None);
    }

    #[test]
    fn should_isolate_methods() {
        let tree = tree(&[(Method::GET, "/about")]).freeze();

        assert!(found(&tree, Method::GET, "/about").is_some());
        assert_eq!(found(&tree, Method::POST, "/about"), None);
    }

    #[test]
    fn should_match_root_and_trailing_slash() {
        let tree = tree(&[(Method::GET, "/"), (Method::GET, "/about")]).freeze();

        assert_eq!(found(&tree, Method::GET, "/"), Some(("/", vec![])));
        assert_eq!(found(&tree, Method::GET, ""), Some(("/", vec![])));
        assert_eq!(found(&tree, Method::GET, "/about/"), Some(("/about", vec![])));
        assert_eq!(found(&tree, Method::GET, "/abouts"), None);
    }

    #[test]
    fn should_fall_back_when_static_branch_fails() {
        let tree = tree(&[(Method::GET, "/user/list"), (Method::GET, "/user/:id/posts")]).freeze();

        assert_eq!(
            found(&tree, Method::GET, "/user/list/posts"),
            Some(("/user/:id/posts", params(&[("id", "list")])))
        );
    }

    #[test]
    fn should_not_capture_empty_params() {
        let tree = tree(&[(Method::GET, "/user/:id/posts")]).freeze();

        assert_eq!(found(&tree, Method::GET, "/user//posts"), None);
    }

    #[test]
    fn should_return_empty_params_without_captures() {
        let tree = tree(&[(Method::GET, "/health")]).freeze();

        let m = tree.lookup(&Method::GET, "/health").unwrap();
        assert!(m.params.is_empty());
    }

    #[test]
    fn should_overwrite_duplicate_routes() {
        let mut tree = Tree::new();
        tree.insert(Method::GET, "/about", "first").unwrap();
        tree.insert(Method::GET, "/about", "second").unwrap();
        let tree = tree.freeze();

        assert_eq!(tree.len(), 1);
        assert_eq!(*tree.lookup(&Method::GET, "/about").unwrap().value, "second");
    }

    #[test]
    fn should_reject_conflicting_param_names() {
        let mut tree = Tree::new();
        tree.insert(Method::GET, "/foo/bar/:buzz", 1).unwrap();
        tree.insert(Method::POST, "/foo/bar/:buzz", 2).unwrap();

        match tree.insert(Method::GET, "/foo/bar/:bazz", 3) {
            Err(Error::Conflict { path, with }) => {
                assert_eq!(path, "/foo/bar/:bazz");
                assert_eq!(with, "/foo/bar/:buzz");
            }
            res => panic!("expected a conflict, got {:?}", res),
        }

        assert!(matches!(
            tree.insert(Method::GET, "/files/*path", 4).and(tree.insert(Method::GET, "/files/*rest", 5)),
            Err(Error::Conflict { .. })
        ));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn should_reject_malformed_paths_without_side_effects() {
        let mut tree: Tree<u8> = Tree::new();

        assert!(matches!(tree.insert(Method::GET, "about", 1), Err(Error::MalformedPattern { .. })));
        assert!(matches!(
            tree.insert(Method::GET, "/files/*path/more", 1),
            Err(Error::MalformedPattern { .. })
        ));
        assert!(tree.is_empty());
        assert!(tree.root.statics.is_empty());
    }

    #[test]
    fn should_collapse_single_child_chains() {
        let mut tree = tree(&[(Method::GET, "/api/v1/users/list"), (Method::GET, "/api/v1/users/:id")]);
        tree.compress();

        assert_eq!(tree.root.statics.len(), 1);
        assert_eq!(tree.root.statics[0].prefix, "api/v1/users");
        assert_eq!(tree.root.statics[0].statics[0].prefix, "list");
        assert!(tree.root.statics[0].param.is_some());
    }

    #[test]
    fn should_not_merge_into_terminal_nodes() {
        let mut tree = tree(&[(Method::GET, "/a"), (Method::GET, "/a/b/c")]);
        tree.compress();

        assert_eq!(tree.root.statics[0].prefix, "a");
        assert_eq!(tree.root.statics[0].statics[0].prefix, "b/c");
    }

    #[test]
    fn should_detect_conflicts_and_overwrite_until_frozen() {
        let mut tree = Tree::new();
        tree.insert(Method::GET, "/api/v1/users/:id", "first").unwrap();

        assert!(matches!(
            tree.insert(Method::GET, "/api/v1/users/:name", "other"),
            Err(Error::Conflict { .. })
        ));
        tree.insert(Method::GET, "/api/v1/users/:id", "second").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root.statics.len(), 1);
        assert_eq!(tree.root.statics[0].prefix, "api");

        let tree = tree.freeze();
        assert_eq!(tree.len(), 1);
        assert_eq!(
            found(&tree, Method::GET, "/api/v1/users/7"),
            Some(("second", params(&[("id", "7")])))
        );
    }

    const LITERALS: &[&str] = &["a", "b", "user", "list"];
    const REQUEST_SEGMENTS: &[&str] = &["a", "b", "user", "list", "x"];

    fn route_strategy() -> impl Strategy<Value = String> {
        let segment = prop_oneof![
            4 => prop::sample::select(LITERALS).prop_map(str::to_owned),
            1 => Just(":id".to_owned()),
        ];
        (prop::collection::vec(segment, 0..4), any::<bool>()).prop_map(|(segments, wildcard)| {
            let mut path = String::new();
            for segment in segments {
                path.push('/');
                path.push_str(&segment);
            }
            if wildcard {
                path.push_str("/*rest");
            }
            if path.is_empty() {
                path.push('/');
            }
            path
        })
    }

    fn request_strategy() -> impl Strategy<Value = String> {
        let segment = prop::sample::select(REQUEST_SEGMENTS);
        prop::collection::vec(segment, 0..5).prop_map(|segments| format!("/{}", segments.join("/")))
    }

    proptest! {
        #[test]
        fn compression_is_observably_inert(
            routes in prop::collection::vec(route_strategy(), 1..12),
            requests in prop::collection::vec(request_strategy(), 1..24),
        ) {
            let mut plain = Tree::new();
            let mut compressed = Tree::new();
            for (idx, route) in routes.iter().enumerate() {
                let _ = plain.insert(Method::GET, route, idx);
                let _ = compressed.insert(Method::GET, route, idx);
            }
            compressed.compress();

            for request in &requests {
                let expected = plain.lookup(&Method::GET, request).map(|m| (*m.value, m.params));
                let got = compressed.lookup(&Method::GET, request).map(|m| (*m.value, m.params));
                prop_assert_eq!(got, expected, "request {}", request);
            }
        }
    }
}
