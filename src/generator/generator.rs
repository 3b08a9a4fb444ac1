use std::path::{Path, PathBuf};

use compio::fs;
use rand::Rng;
use rand::seq::IteratorRandom;
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::{debug, info};

use crate::changes::{ChangeEffect, ChangeError, ChangeKind, ChangeTrait};
use crate::ext::BestEffortPathExt;
use crate::filesystem::TreeModel;
use crate::generator::GenerationOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub root: PathBuf,
    pub directories_created: usize,
    pub files_created: usize,
    pub changes_applied: usize,
}

/// Drives changes against a single [`TreeModel`], one at a time.
///
/// Every change is awaited to completion before the next one is picked, as
/// target selection relies on the model reflecting all previous changes.
pub struct Generator {
    options: GenerationOptions,
    tree: TreeModel,
}

impl Generator {
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            options,
            tree: TreeModel::new(),
        }
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    /// Prepares the root, runs the creation phase until the requested number
    /// of directories and files exist, then applies the requested number of
    /// random changes. The first failing change aborts the run.
    pub async fn generate(&mut self) -> Result<GenerationSummary, GenerationError> {
        let root = self.prepare_root().await?;
        self.tree.seed_root(root.clone());
        info!("Generating tree under {}", root.display());

        let (directories_created, files_created) = self.create_entries().await?;
        info!(
            "Created {} directories and {} files",
            directories_created, files_created
        );

        let changes_applied = self.churn().await?;
        if changes_applied > 0 {
            info!("Applied {} additional changes", changes_applied);
        }

        Ok(GenerationSummary {
            root,
            directories_created,
            files_created,
            changes_applied,
        })
    }

    async fn prepare_root(&self) -> Result<PathBuf, GenerationError> {
        match &self.options.root {
            Some(root) => Self::ensure_root(root).await,
            None => self.provision_root(),
        }
    }

    async fn ensure_root(root: &Path) -> Result<PathBuf, GenerationError> {
        debug!("Ensuring root {} exists", root.best_effort_path_display());
        fs::create_dir_all(root)
            .await
            .context(EnsureRootSnafu { path: root })?;
        std::path::absolute(root).context(EnsureRootSnafu { path: root })
    }

    fn provision_root(&self) -> Result<PathBuf, GenerationError> {
        debug!(
            "Provisioning temporary root with prefix '{}'",
            self.options.prefix
        );
        let temp_dir = tempfile::Builder::new()
            .prefix(&self.options.prefix)
            .tempdir()
            .context(ProvisionRootSnafu {
                prefix: &self.options.prefix,
            })?;
        // The tree outlives the run so the watcher under test can observe it.
        Ok(temp_dir.keep())
    }

    async fn create_entries(&mut self) -> Result<(usize, usize), GenerationError> {
        let mut directories_remaining = self.options.directory_count;
        let mut files_remaining = self.options.file_count;

        while directories_remaining > 0 || files_remaining > 0 {
            let wants_directory = files_remaining == 0
                || rand::thread_rng().r#gen::<f64>() < self.options.directory_chance;

            if directories_remaining > 0 && wants_directory {
                self.apply(ChangeKind::DirectoryCreation).await?;
                directories_remaining -= 1;
            } else {
                self.apply(ChangeKind::FileCreation).await?;
                files_remaining -= 1;
            }
        }

        Ok((self.options.directory_count, self.options.file_count))
    }

    async fn churn(&mut self) -> Result<usize, GenerationError> {
        for _ in 0..self.options.change_count {
            let kind = ChangeKind::ALL
                .into_iter()
                .filter(|kind| kind.is_available(&self.tree))
                .choose(&mut rand::thread_rng())
                .context(NoChangeAvailableSnafu)?;
            self.apply(kind).await?;
        }

        Ok(self.options.change_count)
    }

    async fn apply(&mut self, kind: ChangeKind) -> Result<ChangeEffect, GenerationError> {
        let effect = kind
            .create(&mut self.tree)
            .enact()
            .await
            .context(ChangeSnafu { kind })?;
        debug!("Applied {}: {}", kind, effect);
        Ok(effect)
    }
}

#[derive(Debug, Snafu)]
pub enum GenerationError {
    #[snafu(display("Failed to provision a temporary root with prefix '{}'", prefix))]
    ProvisionRootError {
        prefix: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to prepare root {}", path.best_effort_path_display()))]
    EnsureRootError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to apply {}", kind))]
    ChangeError { kind: ChangeKind, source: ChangeError },
    #[snafu(display("No change has a legal target in the current tree"))]
    NoChangeAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn options_in(temp_dir: &TempDir) -> GenerationOptions {
        GenerationOptions {
            root: Some(temp_dir.path().to_path_buf()),
            ..GenerationOptions::default()
        }
    }

    /// Collects every directory (root included) and file present on disk.
    fn walk(root: &Path) -> (HashSet<PathBuf>, HashSet<PathBuf>) {
        let mut directories = HashSet::from([root.to_path_buf()]);
        let mut files = HashSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir).expect("Failed to read directory") {
                let path = entry.expect("Failed to read directory entry").path();
                if path.is_dir() {
                    directories.insert(path.clone());
                    pending.push(path);
                } else {
                    files.insert(path);
                }
            }
        }

        (directories, files)
    }

    fn assert_model_matches_disk(tree: &TreeModel) {
        let root = tree.root().expect("root should be seeded");
        let (directories, files) = walk(root);

        let modeled_directories: HashSet<PathBuf> =
            tree.directories().map(Path::to_path_buf).collect();
        let modeled_files: HashSet<PathBuf> = tree.files().map(Path::to_path_buf).collect();
        assert_eq!(modeled_directories, directories);
        assert_eq!(modeled_files, files);

        for dir in tree.empty_directories() {
            let mut entries = std::fs::read_dir(dir).expect("Failed to read empty directory");
            assert!(entries.next().is_none(), "{} is not empty", dir.display());
        }
    }

    #[compio::test]
    async fn creates_requested_directories_when_always_chosen() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 5,
            file_count: 5,
            directory_chance: 1.0,
            ..options_in(&temp_dir)
        });

        let summary = generator.generate().await.expect("Generation failed");

        let tree = generator.tree();
        assert_eq!(tree.directory_count(), 6);
        assert_eq!(tree.file_count(), 5);
        for file in tree.files() {
            let parent = file.parent().expect("file has a parent");
            assert!(tree.contains_directory(parent));
        }
        assert_eq!(summary.directories_created, 5);
        assert_eq!(summary.files_created, 5);
        assert_model_matches_disk(tree);
    }

    #[compio::test]
    async fn files_only_land_directly_under_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 0,
            file_count: 3,
            ..options_in(&temp_dir)
        });

        generator.generate().await.expect("Generation failed");

        let tree = generator.tree();
        let root = tree.root().expect("root should be seeded");
        assert_eq!(tree.directory_count(), 1);
        assert_eq!(tree.file_count(), 3);
        for file in tree.files() {
            assert_eq!(file.parent(), Some(root));
        }
        assert_model_matches_disk(tree);
    }

    #[rstest]
    #[case(0, 0, 0.5)]
    #[case(3, 2, 0.0)]
    #[case(10, 40, 0.05)]
    #[case(25, 25, 0.5)]
    #[compio::test]
    async fn creation_phase_hits_exact_counts(
        #[case] directory_count: usize,
        #[case] file_count: usize,
        #[case] directory_chance: f64,
    ) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut generator = Generator::new(GenerationOptions {
            directory_count,
            file_count,
            directory_chance,
            ..options_in(&temp_dir)
        });

        generator.generate().await.expect("Generation failed");

        assert_eq!(generator.tree().directory_count(), directory_count + 1);
        assert_eq!(generator.tree().file_count(), file_count);
        assert_model_matches_disk(generator.tree());
    }

    #[compio::test]
    async fn churn_keeps_model_in_sync_with_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 10,
            file_count: 30,
            directory_chance: 0.3,
            change_count: 300,
            ..options_in(&temp_dir)
        });

        let summary = generator.generate().await.expect("Generation failed");

        assert_eq!(summary.changes_applied, 300);
        assert_model_matches_disk(generator.tree());
    }

    #[compio::test]
    async fn missing_root_is_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("nested").join("root");
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 1,
            file_count: 1,
            root: Some(root.clone()),
            ..GenerationOptions::default()
        });

        let summary = generator.generate().await.expect("Generation failed");

        assert!(root.is_dir());
        assert_eq!(summary.root, root);
    }

    #[compio::test]
    async fn provisions_root_with_prefix() {
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 2,
            file_count: 2,
            prefix: "watcher-stress-test-".to_string(),
            ..GenerationOptions::default()
        });

        let summary = generator.generate().await.expect("Generation failed");

        let name = summary
            .root
            .file_name()
            .expect("root has a name")
            .to_string_lossy()
            .to_string();
        let persisted = summary.root.is_dir();
        std::fs::remove_dir_all(&summary.root).expect("Failed to clean up provisioned root");
        assert!(name.starts_with("watcher-stress-test-"));
        assert!(persisted);
    }

    #[compio::test]
    async fn root_that_is_a_file_aborts_generation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("not-a-directory");
        std::fs::write(&root, b"occupied").expect("Failed to write blocking file");
        let mut generator = Generator::new(GenerationOptions {
            root: Some(root),
            ..GenerationOptions::default()
        });

        let result = generator.generate().await;

        assert!(matches!(result, Err(GenerationError::EnsureRootError { .. })));
        assert!(generator.tree().root().is_none());
    }

    #[compio::test]
    async fn disk_failure_aborts_generation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut generator = Generator::new(GenerationOptions {
            directory_count: 0,
            file_count: 2,
            ..options_in(&temp_dir)
        });
        generator.generate().await.expect("Generation failed");
        std::fs::remove_dir_all(temp_dir.path()).expect("Failed to remove root");

        let result = generator.create_entries().await;

        assert!(matches!(
            result,
            Err(GenerationError::ChangeError {
                kind: ChangeKind::FileCreation,
                ..
            })
        ));
        assert_eq!(generator.tree().file_count(), 2);
    }
}
