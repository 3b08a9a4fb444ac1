use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{CreateDirectorySnafu, SelectionSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

pub struct DirectoryCreationChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> DirectoryCreationChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for DirectoryCreationChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let path = self.tree.new_directory_name(None).context(SelectionSnafu)?;

        self.tree.directory_will_be_added(&path);
        fs::create_dir(&path)
            .await
            .context(CreateDirectorySnafu { path: &path })?;
        self.tree.directory_was_added(path.clone(), true);

        debug!("Created directory {}", path.display());
        Ok(ChangeEffect::DirectoryCreated(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[compio::test]
    async fn failed_creation_does_not_record_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("missing-root");
        let mut tree = TreeModel::new();
        tree.seed_root(root.clone());

        let result = DirectoryCreationChange::new(&mut tree).enact().await;

        assert!(matches!(
            result,
            Err(ChangeError::CreateDirectoryError { .. })
        ));
        assert_eq!(tree.directory_count(), 1);
        assert!(tree.contains_directory(&root));
        assert!(!tree.has_empty_directory());
    }
}
