//! In-memory model of the generated directory tree.
//!
//! The model tracks which directories, empty directories and files are
//! believed to exist under the tree root, hands out collision-free names for
//! new entries and picks random targets for changes.

mod tree;

pub use tree::{SelectionError, TreeModel};
