use compio::fs;
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::changes::change::{RemoveFileSnafu, SelectionSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

pub struct FileDeletionChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> FileDeletionChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for FileDeletionChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let path = self.tree.random_file().context(SelectionSnafu)?;

        fs::remove_file(&path)
            .await
            .context(RemoveFileSnafu { path: &path })?;
        if !self.tree.file_was_deleted(&path) {
            warn!("Deleted file {} was not tracked", path.display());
        }

        debug!("Deleted file {}", path.display());
        Ok(ChangeEffect::FileDeleted(path))
    }
}
