//! Name search below a directory.
//!
//! The search yields one [`FindEntry`] per reported path so callers can format
//! or inspect results uniformly. Descending into a directory needs its
//! execute bit; reporting a path needs the entry's read bit. A directory
//! whose name matches is reported together with everything beneath it.
use std::fmt;

use crate::node::{NodeId, Permission};
use crate::path;
use crate::tree::Tree;

/// Display path of the directory a search starts from.
pub const START: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindOutcome {
    Found,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindEntry {
    pub path: String,
    pub outcome: FindOutcome,
}

impl FindEntry {
    fn found(path: impl Into<String>) -> FindEntry {
        FindEntry {
            path: path.into(),
            outcome: FindOutcome::Found,
        }
    }

    fn denied(path: impl Into<String>) -> FindEntry {
        FindEntry {
            path: path.into(),
            outcome: FindOutcome::Denied,
        }
    }
}

impl fmt::Display for FindEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            FindOutcome::Found => write!(f, "{}", self.path),
            FindOutcome::Denied => write!(f, "find: cannot access '{}': Permission denied", self.path),
        }
    }
}

/// Search the directory `start` for entries called `term`.
pub fn search(tree: &Tree, start: NodeId, term: &str) -> Vec<FindEntry> {
    let mut entries = Vec::new();
    search_directory(tree, start, term, START, &mut entries);
    entries
}

fn search_directory(tree: &Tree, dir: NodeId, term: &str, dir_path: &str, entries: &mut Vec<FindEntry>) {
    if !tree.has_permission(dir, Permission::Execute) {
        entries.push(FindEntry::denied(dir_path));
        return;
    }

    for &child in tree.children(dir) {
        let node = tree.node(child);
        let child_path = path::join(dir_path, node.name());
        if node.name() == term {
            if node.has_permission(Permission::Read) {
                entries.push(FindEntry::found(child_path.as_str()));
                if node.is_directory() {
                    list_directory(tree, child, &child_path, entries);
                }
            } else {
                entries.push(FindEntry::denied(child_path));
            }
        } else if node.is_directory() {
            search_directory(tree, child, term, &child_path, entries);
        }
    }
}

fn list_directory(tree: &Tree, dir: NodeId, dir_path: &str, entries: &mut Vec<FindEntry>) {
    if !tree.has_permission(dir, Permission::Execute) {
        entries.push(FindEntry::denied(dir_path));
        return;
    }

    for &child in tree.children(dir) {
        let node = tree.node(child);
        let child_path = path::join(dir_path, node.name());
        if node.has_permission(Permission::Read) {
            entries.push(FindEntry::found(child_path.as_str()));
        } else {
            entries.push(FindEntry::denied(child_path.as_str()));
        }
        if node.is_directory() {
            list_directory(tree, child, &child_path, entries);
        }
    }
}
