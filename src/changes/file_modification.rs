use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{ReadFileSnafu, SelectionSnafu, WriteFileSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

const APPENDED_LINE: &[u8] = b"modified\n";

/// Rewrites a tracked file with an extra line at the end. The model is left
/// untouched since no entry appears or disappears.
pub struct FileModificationChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> FileModificationChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for FileModificationChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let path = self.tree.random_file().context(SelectionSnafu)?;

        let mut content = fs::read(&path)
            .await
            .context(ReadFileSnafu { path: &path })?;
        content.extend_from_slice(APPENDED_LINE);
        let res = fs::write(&path, content).await;
        res.0.context(WriteFileSnafu { path: &path })?;

        debug!("Modified file {}", path.display());
        Ok(ChangeEffect::FileModified(path))
    }
}
