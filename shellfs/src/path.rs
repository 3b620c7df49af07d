//! Textual path handling.
//!
//! Paths are resolved segment by segment against a [`Tree`]: a leading `/`
//! starts at the root, anything else at the caller's current directory.
//! Empty segments and `.` stay put, `..` moves to the parent (the root is its
//! own parent) and every other segment must name an existing child.

use crate::node::NodeId;
use crate::tree::Tree;

pub const SEPARATOR: char = '/';

/// Resolve `path` starting from `cwd`. With `want_parent` the last segment is
/// dropped, so the result is the directory that would contain the target.
///
/// Returns `None` as soon as a segment cannot be found.
pub fn resolve(tree: &Tree, cwd: NodeId, path: &str, want_parent: bool) -> Option<NodeId> {
    let mut current = if path.starts_with(SEPARATOR) {
        tree.root()
    } else {
        cwd
    };

    let mut segments: Vec<&str> = path.trim_matches(SEPARATOR).split(SEPARATOR).collect();
    if want_parent {
        segments.pop();
    }

    for segment in segments {
        current = match segment {
            "" | "." => current,
            ".." => tree.find_parent(current).unwrap_or_else(|| tree.root()),
            name => tree.child(current, name)?,
        };
    }
    Some(current)
}

/// Final component of `path`; empty when the path ends with a separator.
pub fn basename(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Append `name` to a relative display path.
pub fn join(base: &str, name: &str) -> String {
    if base.ends_with(SEPARATOR) {
        format!("{base}{name}")
    } else {
        format!("{base}{SEPARATOR}{name}")
    }
}
