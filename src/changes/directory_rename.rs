use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{RenameSnafu, SelectionSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

/// Moves a non-root directory, with everything inside it, to a new name
/// somewhere outside its own subtree.
pub struct DirectoryRenameChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> DirectoryRenameChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for DirectoryRenameChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let from = self
            .tree
            .random_non_root_directory()
            .context(SelectionSnafu)?;
        let to = self
            .tree
            .new_directory_name(Some(from.as_path()))
            .context(SelectionSnafu)?;

        self.tree.directory_will_be_added(&to);
        fs::rename(&from, &to)
            .await
            .context(RenameSnafu { from: &from, to: &to })?;
        self.tree.directory_was_renamed(&from, &to);

        debug!("Renamed directory {} to {}", from.display(), to.display());
        Ok(ChangeEffect::DirectoryRenamed { from, to })
    }
}
