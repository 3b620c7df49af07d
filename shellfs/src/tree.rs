//! The filesystem tree
//! -------------------
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Every node keeps
//! the id of its parent, so walking upwards (for `..` or to print the
//! absolute path of the current directory) never searches the tree.
//!
//! The tree is built once from the ordered entries of an archive. Each entry
//! creates the node it names plus any missing directories on the way; nodes
//! that already exist are reused untouched, so a later entry never changes an
//! earlier one.
use log::{debug, warn};

use crate::archive::ArchiveRecord;
use crate::node::{effective_mode, Node, NodeId, Permission, DEFAULT_MODE};
use crate::path::SEPARATOR;

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only the root directory.
    pub fn new() -> Tree {
        Tree {
            nodes: vec![Node::new(SEPARATOR.to_string(), true, DEFAULT_MODE, None)],
        }
    }

    /// Build a tree from archive entries, processed in the given order.
    pub fn from_records<I>(records: I) -> Tree
    where
        I: IntoIterator<Item = ArchiveRecord>,
    {
        let mut tree = Tree::new();
        for record in records {
            tree.insert(&record);
        }
        debug!("built tree with {} nodes", tree.node_count());
        tree
    }

    /// Add the node a record names, creating missing parent directories.
    ///
    /// Returns the id of the named node, or `None` when the record was
    /// skipped: its path is empty, or it runs through an existing file.
    pub fn insert(&mut self, record: &ArchiveRecord) -> Option<NodeId> {
        let segments = record.segments();
        let Some((last, intermediate)) = segments.split_last() else {
            warn!("skipping archive entry with empty path {:?}", record.path);
            return None;
        };

        let mut current = ROOT;
        for segment in intermediate {
            current = match self.child(current, segment) {
                Some(existing) if self.node(existing).is_directory() => existing,
                Some(_) => {
                    warn!(
                        "skipping archive entry {:?}: {:?} is not a directory",
                        record.path, segment
                    );
                    return None;
                }
                None => self.attach(current, segment, true, DEFAULT_MODE),
            };
        }

        if let Some(existing) = self.child(current, last) {
            debug!("{:?} already present, keeping existing node", record.path);
            return Some(existing);
        }
        Some(self.attach(
            current,
            last,
            record.is_directory,
            effective_mode(record.raw_mode),
        ))
    }

    fn attach(&mut self, parent: NodeId, name: &str, is_directory: bool, permissions: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(name, is_directory, permissions, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Look up a direct child by name.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.node(child).name() == name)
    }

    pub fn has_permission(&self, id: NodeId, permission: Permission) -> bool {
        self.node(id).has_permission(permission)
    }

    /// Parent of `id`; `None` for the root and for detached nodes.
    pub fn find_parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    /// Whether `id` can still be reached from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.find_parent(current) {
            current = parent;
        }
        current == ROOT
    }

    /// `/`-joined path from the root to `id`. The root itself is `/`.
    pub fn absolute_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.find_parent(current) {
            names.push(self.node(current).name());
            current = parent;
        }
        if names.is_empty() {
            return SEPARATOR.to_string();
        }
        names.reverse();
        format!("{SEPARATOR}{}", names.join("/"))
    }

    /// Replace the mode of `id` wholesale.
    pub fn set_permissions(&mut self, id: NodeId, mode: u32) {
        debug!(
            "{}: mode {:o} -> {:o}",
            self.absolute_path(id),
            self.node(id).permissions(),
            mode
        );
        self.nodes[id.0].permissions = mode;
    }

    /// Remove the child called `name` from `parent`, detaching its subtree.
    pub fn detach(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let position = self
            .children(parent)
            .iter()
            .position(|&child| self.node(child).name() == name)?;
        debug!("detaching {:?} from {}", name, self.absolute_path(parent));
        let id = self.nodes[parent.0].children.remove(position);
        self.nodes[id.0].parent = None;
        Some(id)
    }

    /// Depth-first walk over the descendants of `id`, in child order.
    pub fn walk(&self, id: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Number of nodes reachable from the root, the root included.
    pub fn node_count(&self) -> usize {
        1 + self.walk(ROOT).count()
    }
}

pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
