use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{RenameSnafu, SelectionSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

/// Moves a tracked file to a freshly named path in a random directory.
pub struct FileRenameChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> FileRenameChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for FileRenameChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let from = self.tree.random_file().context(SelectionSnafu)?;
        let to = self.tree.new_file_name().context(SelectionSnafu)?;

        self.tree.file_will_be_added(&to);
        fs::rename(&from, &to)
            .await
            .context(RenameSnafu { from: &from, to: &to })?;
        self.tree.file_was_renamed(&from, to.clone());

        debug!("Renamed file {} to {}", from.display(), to.display());
        Ok(ChangeEffect::FileRenamed { from, to })
    }
}
