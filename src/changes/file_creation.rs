use compio::fs;
use snafu::ResultExt;
use tracing::debug;

use crate::changes::change::{SelectionSnafu, WriteFileSnafu};
use crate::filesystem::TreeModel;

use super::{ChangeEffect, ChangeError, ChangeTrait};

pub struct FileCreationChange<'a> {
    tree: &'a mut TreeModel,
}

impl<'a> FileCreationChange<'a> {
    pub fn new(tree: &'a mut TreeModel) -> Self {
        Self { tree }
    }
}

impl ChangeTrait for FileCreationChange<'_> {
    async fn enact(self) -> Result<ChangeEffect, ChangeError> {
        let path = self.tree.new_file_name().context(SelectionSnafu)?;
        let content = match path.file_name() {
            Some(name) => format!("{}\n", name.to_string_lossy()),
            None => String::new(),
        };

        self.tree.file_will_be_added(&path);
        let res = fs::write(&path, content).await;
        res.0.context(WriteFileSnafu { path: &path })?;
        self.tree.file_was_added(path.clone());

        debug!("Created file {}", path.display());
        Ok(ChangeEffect::FileCreated(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[compio::test]
    async fn created_file_contains_its_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut tree = TreeModel::new();
        tree.seed_root(temp_dir.path().to_path_buf());

        let effect = FileCreationChange::new(&mut tree)
            .enact()
            .await
            .expect("Failed to create file");

        let ChangeEffect::FileCreated(path) = effect else {
            panic!("Unexpected effect {effect:?}");
        };
        let content = std::fs::read_to_string(&path).expect("Failed to read created file");
        assert_eq!(content, "file-0.txt\n");
    }

    #[compio::test]
    async fn failed_write_does_not_record_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut tree = TreeModel::new();
        tree.seed_root(temp_dir.path().join("missing-root"));

        let result = FileCreationChange::new(&mut tree).enact().await;

        assert!(matches!(result, Err(ChangeError::WriteFileError { .. })));
        assert!(!tree.has_file());
    }
}
