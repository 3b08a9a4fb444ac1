use std::fmt;
use std::path::PathBuf;

use snafu::Snafu;

use crate::changes::{
    DirectoryCreationChange, DirectoryDeletionChange, DirectoryRenameChange, FileCreationChange,
    FileDeletionChange, FileModificationChange, FileRenameChange,
};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{SelectionError, TreeModel};

pub trait ChangeTrait {
    /// Performs the disk operation and records its outcome in the tree model.
    async fn enact(self) -> Result<ChangeEffect, ChangeError>;
}

/// What a change did to the tree once it completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEffect {
    DirectoryCreated(PathBuf),
    FileCreated(PathBuf),
    DirectoryDeleted(PathBuf),
    FileDeleted(PathBuf),
    FileModified(PathBuf),
    DirectoryRenamed { from: PathBuf, to: PathBuf },
    FileRenamed { from: PathBuf, to: PathBuf },
}

impl fmt::Display for ChangeEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeEffect::DirectoryCreated(path) => write!(f, "created directory {}", path.display()),
            ChangeEffect::FileCreated(path) => write!(f, "created file {}", path.display()),
            ChangeEffect::DirectoryDeleted(path) => write!(f, "deleted directory {}", path.display()),
            ChangeEffect::FileDeleted(path) => write!(f, "deleted file {}", path.display()),
            ChangeEffect::FileModified(path) => write!(f, "modified file {}", path.display()),
            ChangeEffect::DirectoryRenamed { from, to } => {
                write!(f, "renamed directory {} to {}", from.display(), to.display())
            }
            ChangeEffect::FileRenamed { from, to } => {
                write!(f, "renamed file {} to {}", from.display(), to.display())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    DirectoryCreation,
    FileCreation,
    DirectoryDeletion,
    FileDeletion,
    FileModification,
    DirectoryRename,
    FileRename,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 7] = [
        ChangeKind::DirectoryCreation,
        ChangeKind::FileCreation,
        ChangeKind::DirectoryDeletion,
        ChangeKind::FileDeletion,
        ChangeKind::FileModification,
        ChangeKind::DirectoryRename,
        ChangeKind::FileRename,
    ];

    /// Whether the tree currently holds a legal target for this kind of change.
    pub fn is_available(&self, tree: &TreeModel) -> bool {
        match self {
            ChangeKind::DirectoryCreation | ChangeKind::FileCreation => tree.has_directory(),
            ChangeKind::DirectoryDeletion => tree.has_empty_directory(),
            ChangeKind::FileDeletion | ChangeKind::FileModification | ChangeKind::FileRename => {
                tree.has_file()
            }
            ChangeKind::DirectoryRename => tree.has_non_root_directory(),
        }
    }

    pub fn create(self, tree: &mut TreeModel) -> Change<'_> {
        match self {
            ChangeKind::DirectoryCreation => {
                Change::DirectoryCreation(DirectoryCreationChange::new(tree))
            }
            ChangeKind::FileCreation => Change::FileCreation(FileCreationChange::new(tree)),
            ChangeKind::DirectoryDeletion => {
                Change::DirectoryDeletion(DirectoryDeletionChange::new(tree))
            }
            ChangeKind::FileDeletion => Change::FileDeletion(FileDeletionChange::new(tree)),
            ChangeKind::FileModification => {
                Change::FileModification(FileModificationChange::new(tree))
            }
            ChangeKind::DirectoryRename => Change::DirectoryRename(DirectoryRenameChange::new(tree)),
            ChangeKind::FileRename => Change::FileRename(FileRenameChange::new(tree)),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::DirectoryCreation => "directory creation",
            ChangeKind::FileCreation => "file creation",
            ChangeKind::DirectoryDeletion => "directory deletion",
            ChangeKind::FileDeletion => "file deletion",
            ChangeKind::FileModification => "file modification",
            ChangeKind::DirectoryRename => "directory rename",
            ChangeKind::FileRename => "file rename",
        };
        f.write_str(name)
    }
}

pub enum Change<'a> {
    DirectoryCreation(DirectoryCreationChange<'a>),
    FileCreation(FileCreationChange<'a>),
    DirectoryDeletion(DirectoryDeletionChange<'a>),
    FileDeletion(FileDeletionChange<'a>),
    FileModification(FileModificationChange<'a>),
    DirectoryRename(DirectoryRenameChange<'a>),
    FileRename(FileRenameChange<'a>),
}

impl ChangeTrait for Change<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        match self {
            Change::DirectoryCreation(change) => change.enact().await,
            Change::FileCreation(change) => change.enact().await,
            Change::DirectoryDeletion(change) => change.enact().await,
            Change::FileDeletion(change) => change.enact().await,
            Change::FileModification(change) => change.enact().await,
            Change::DirectoryRename(change) => change.enact().await,
            Change::FileRename(change) => change.enact().await,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ChangeError {
    #[snafu(display("No target available for the change"))]
    SelectionError { source: SelectionError },
    #[snafu(display("Failed to create directory {}", path.best_effort_path_display()))]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write file {}", path.best_effort_path_display()))]
    WriteFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read file {}", path.best_effort_path_display()))]
    ReadFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to remove directory {}", path.best_effort_path_display()))]
    RemoveDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to remove file {}", path.best_effort_path_display()))]
    RemoveFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Failed to rename {} to {}",
        from.best_effort_path_display(),
        to.best_effort_path_display()
    ))]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}
