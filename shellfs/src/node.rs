//! Filesystem entries stored in a [`Tree`](crate::tree::Tree).

/// Mode given to entries whose archive record carries no permission bits, and
/// to directories created implicitly along a record's path.
pub const DEFAULT_MODE: u32 = 0o755;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The three permission flags. A single mode applies to every actor, so
/// there are no owner, group or other classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
    Execute,
}

impl Permission {
    pub fn bit(self) -> u32 {
        match self {
            Permission::Read => 0o400,
            Permission::Write => 0o200,
            Permission::Execute => 0o100,
        }
    }
}

/// Mode a record's raw bits translate to once stored in the tree.
pub fn effective_mode(raw_mode: u32) -> u32 {
    if raw_mode == 0 {
        DEFAULT_MODE
    } else {
        raw_mode
    }
}

/// A file or directory. `name` and `is_directory` never change after
/// creation; only the permissions and the child list do.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) is_directory: bool,
    pub(crate) permissions: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(
        name: impl Into<String>,
        is_directory: bool,
        permissions: u32,
        parent: Option<NodeId>,
    ) -> Node {
        Node {
            name: name.into(),
            is_directory,
            permissions,
            parent,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn permissions(&self) -> u32 {
        self.permissions
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order. Always empty for plain files.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions & permission.bit() != 0
    }
}
