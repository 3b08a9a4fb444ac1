use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{RemoveDirectorySnafu, SelectionSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

/// Removes a directory the model believes to be empty.
pub struct DirectoryDeletionChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> DirectoryDeletionChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for DirectoryDeletionChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let path = self.tree.random_empty_directory().context(SelectionSnafu)?;

        fs::remove_dir(&path)
            .await
            .context(RemoveDirectorySnafu { path: &path })?;
        self.tree.directory_was_deleted(&path);

        debug!("Deleted directory {}", path.display());
        Ok(ChangeEffect::DirectoryDeleted(path))
    }
}
