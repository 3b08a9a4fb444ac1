//! Mutations of the generated tree.
//!
//! Each change picks its targets from the [`TreeModel`](crate::filesystem::TreeModel),
//! performs a single disk operation and records the outcome in the model
//! through the will/was hooks around that operation.

mod change;
mod directory_creation;
mod directory_deletion;
mod directory_rename;
mod file_creation;
mod file_deletion;
mod file_modification;
mod file_rename;

pub use change::{ChangeEffect, ChangeError, ChangeKind, ChangeTrait};
pub use directory_creation::DirectoryCreationChange;
pub use directory_deletion::DirectoryDeletionChange;
pub use directory_rename::DirectoryRenameChange;
pub use file_creation::FileCreationChange;
pub use file_deletion::FileDeletionChange;
pub use file_modification::FileModificationChange;
pub use file_rename::FileRenameChange;
