//! shellfs
//! -------
//!
//! An in-memory filesystem tree materialised from the central directory of a
//! ZIP archive, together with the path resolution and permission rules a small
//! Unix-like shell needs to navigate and modify it.
//!
//! The tree only models metadata (names, directory flags and a single set of
//! `rwx` mode bits). File contents are never read.
extern crate byteorder;
extern crate log;

pub mod archive;
pub mod command;
pub mod error;
pub mod find;
pub mod node;
pub mod path;
pub mod session;
pub mod tree;
