//! A shell session: the tree plus the current directory.
//!
//! Each command method checks exactly one permission bit on exactly one node:
//!
//! - `ls` needs read on the listed directory,
//! - `cd` needs execute on the target directory,
//! - `chmod` needs write on the target itself,
//! - `rm` needs write on the directory that holds the target,
//! - `find` needs execute to descend and read to report (see [`crate::find`]).
use log::debug;

use crate::command::{Command, CommandError};
use crate::find::{self, FindEntry};
use crate::node::{NodeId, Permission};
use crate::path;
use crate::tree::Tree;

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Lines(Vec<String>),
    Exit,
}

#[derive(Debug, Clone)]
pub struct Session {
    tree: Tree,
    cwd: NodeId,
}

impl Session {
    pub fn new(tree: Tree) -> Session {
        let cwd = tree.root();
        Session { tree, cwd }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn cwd_path(&self) -> String {
        self.tree.absolute_path(self.cwd)
    }

    pub fn resolve(&self, path: &str, want_parent: bool) -> Option<NodeId> {
        path::resolve(&self.tree, self.cwd, path, want_parent)
    }

    fn resolve_directory(&self, path: &str) -> Option<NodeId> {
        self.resolve(path, false)
            .filter(|&id| self.tree.node(id).is_directory())
    }

    /// Names of the entries in `path` (or the current directory).
    pub fn ls(&self, path: Option<&str>) -> Result<Vec<String>, CommandError> {
        let target = match path {
            None => self.cwd,
            Some(path) => self
                .resolve_directory(path)
                .ok_or_else(|| CommandError::LsNotFound(path.to_string()))?,
        };

        let dir = self.tree.node(target);
        if !dir.has_permission(Permission::Read) {
            return Err(CommandError::LsDenied(dir.name().to_string()));
        }
        Ok(self
            .tree
            .children(target)
            .iter()
            .map(|&child| self.tree.node(child).name().to_string())
            .collect())
    }

    /// Move the current directory; without a path, go back to the root.
    pub fn cd(&mut self, path: Option<&str>) -> Result<(), CommandError> {
        let Some(path) = path else {
            self.cwd = self.tree.root();
            return Ok(());
        };

        let target = self
            .resolve_directory(path)
            .ok_or_else(|| CommandError::CdNotFound(path.to_string()))?;
        if !self.tree.has_permission(target, Permission::Execute) {
            return Err(CommandError::CdDenied(path.to_string()));
        }
        self.cwd = target;
        debug!("cwd is now {}", self.cwd_path());
        Ok(())
    }

    pub fn chmod(&mut self, mode: u32, path: &str) -> Result<(), CommandError> {
        let target = self
            .resolve(path, false)
            .ok_or_else(|| CommandError::ChmodNotFound(path.to_string()))?;
        if !self.tree.has_permission(target, Permission::Write) {
            return Err(CommandError::ChmodDenied(path.to_string()));
        }
        self.tree.set_permissions(target, mode);
        Ok(())
    }

    pub fn rm(&mut self, path: &str) -> Result<(), CommandError> {
        let not_found = || CommandError::RmNotFound(path.to_string());
        let parent = self.resolve(path, true).ok_or_else(not_found)?;
        let name = path::basename(path);
        if self.tree.child(parent, name).is_none() {
            return Err(not_found());
        }
        if !self.tree.has_permission(parent, Permission::Write) {
            return Err(CommandError::RmDenied(path.to_string()));
        }

        self.tree.detach(parent, name);
        if !self.tree.is_attached(self.cwd) {
            debug!("current directory was removed, returning to /");
            self.cwd = self.tree.root();
        }
        Ok(())
    }

    pub fn find(&self, term: &str) -> Vec<FindEntry> {
        find::search(&self.tree, self.cwd, term)
    }

    pub fn execute(&mut self, command: &Command) -> Result<Outcome, CommandError> {
        let lines = match command {
            Command::Ls(path) => self.ls(path.as_deref())?,
            Command::Cd(path) => {
                self.cd(path.as_deref())?;
                Vec::new()
            }
            Command::Chmod { mode, path } => {
                self.chmod(*mode, path)?;
                Vec::new()
            }
            Command::Rm(path) => {
                self.rm(path)?;
                Vec::new()
            }
            Command::Find(term) => self
                .find(term)
                .iter()
                .map(|entry| entry.to_string())
                .collect(),
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Lines(lines))
    }
}
