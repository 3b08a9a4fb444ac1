use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::seq::IteratorRandom;
use snafu::{OptionExt, Snafu};
use tracing::{debug, error};

use crate::ext::BestEffortPathExt;

const DIRECTORY_PREFIX: &str = "directory-";
const FILE_PREFIX: &str = "file-";
const FILE_SUFFIX: &str = ".txt";

/// Authoritative view of the entries that exist (or are believed to exist)
/// under the generated tree root.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    root: Option<PathBuf>,
    directories: HashSet<PathBuf>,
    empty_directories: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    next_id: u64,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the tree root. Only the first call has an effect.
    pub fn seed_root(&mut self, root: PathBuf) {
        if let Some(existing) = &self.root {
            debug!(
                "Root already seeded as {}, ignoring {}",
                existing.display(),
                root.display()
            );
            return;
        }
        self.directories.insert(root.clone());
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().map(PathBuf::as_path)
    }

    pub fn empty_directories(&self) -> impl Iterator<Item = &Path> {
        self.empty_directories.iter().map(PathBuf::as_path)
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn empty_directory_count(&self) -> usize {
        self.empty_directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn contains_directory(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    pub fn contains_empty_directory(&self, path: &Path) -> bool {
        self.empty_directories.contains(path)
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn has_file(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn has_directory(&self) -> bool {
        !self.directories.is_empty()
    }

    pub fn has_empty_directory(&self) -> bool {
        !self.empty_directories.is_empty()
    }

    pub fn has_non_root_directory(&self) -> bool {
        self.directories.iter().any(|dir| !self.is_root(dir))
    }

    fn namegen(&mut self, prefix: &str, suffix: &str) -> String {
        let name = format!("{prefix}{}{suffix}", self.next_id);
        self.next_id += 1;
        name
    }

    /// Synthesizes a path for a new directory inside a random known directory,
    /// keeping clear of `exclude_subtree_of` when it is given.
    pub fn new_directory_name(
        &mut self,
        exclude_subtree_of: Option<&Path>,
    ) -> Result<PathBuf, SelectionError> {
        let parent = self.random_directory(exclude_subtree_of)?;
        Ok(parent.join(self.namegen(DIRECTORY_PREFIX, "")))
    }

    pub fn new_file_name(&mut self) -> Result<PathBuf, SelectionError> {
        let parent = self.random_directory(None)?;
        Ok(parent.join(self.namegen(FILE_PREFIX, FILE_SUFFIX)))
    }

    /// Picks a known directory uniformly at random.
    ///
    /// With `exclude_subtree_of` set, the excluded directory and everything
    /// nested below it are never picked. When nothing else is left, the
    /// parent of the excluded directory is returned instead.
    pub fn random_directory(
        &self,
        exclude_subtree_of: Option<&Path>,
    ) -> Result<PathBuf, SelectionError> {
        if self.directories.is_empty() {
            error!("Random directory requested before the tree root was seeded");
            return NothingToSelectSnafu {
                collection: "directories",
            }
            .fail();
        }

        let mut rng = rand::thread_rng();
        match exclude_subtree_of {
            None => Self::pick(&self.directories, "directories"),
            Some(excluded) => match self
                .directories
                .iter()
                .filter(|dir| !dir.starts_with(excluded))
                .choose(&mut rng)
            {
                Some(dir) => Ok(dir.clone()),
                None => {
                    debug!(
                        "No directory outside {}, falling back to its parent",
                        excluded.best_effort_path_display()
                    );
                    excluded
                        .parent()
                        .map(Path::to_path_buf)
                        .context(NoParentSnafu {
                            excluded: excluded.to_path_buf(),
                        })
                }
            },
        }
    }

    pub fn random_non_root_directory(&self) -> Result<PathBuf, SelectionError> {
        self.directories
            .iter()
            .filter(|dir| !self.is_root(dir))
            .choose(&mut rand::thread_rng())
            .cloned()
            .context(NothingToSelectSnafu {
                collection: "non-root directories",
            })
    }

    pub fn random_empty_directory(&self) -> Result<PathBuf, SelectionError> {
        Self::pick(&self.empty_directories, "empty directories")
    }

    pub fn random_file(&self) -> Result<PathBuf, SelectionError> {
        Self::pick(&self.files, "files")
    }

    fn pick(set: &HashSet<PathBuf>, collection: &'static str) -> Result<PathBuf, SelectionError> {
        set.iter()
            .choose(&mut rand::thread_rng())
            .cloned()
            .context(NothingToSelectSnafu { collection })
    }

    // The parent is about to gain a child, so it stops being empty before the
    // disk call. The new entry itself is only recorded once the call succeeded.

    pub fn directory_will_be_added(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.empty_directories.remove(parent);
        }
    }

    pub fn directory_was_added(&mut self, path: PathBuf, is_empty: bool) {
        if is_empty {
            self.empty_directories.insert(path.clone());
        }
        self.directories.insert(path);
    }

    pub fn file_will_be_added(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.empty_directories.remove(parent);
        }
    }

    pub fn file_was_added(&mut self, path: PathBuf) {
        self.files.insert(path);
    }

    /// Forgets a directory along with anything still recorded below it.
    pub fn directory_was_deleted(&mut self, path: &Path) {
        self.directories.retain(|dir| !dir.starts_with(path));
        self.empty_directories.retain(|dir| !dir.starts_with(path));
        self.files.retain(|file| !file.starts_with(path));
        self.refresh_parent_emptiness(path);
    }

    /// Returns whether the file was known to the model.
    pub fn file_was_deleted(&mut self, path: &Path) -> bool {
        let removed = self.files.remove(path);
        if removed {
            self.refresh_parent_emptiness(path);
        }
        removed
    }

    pub fn file_was_renamed(&mut self, from: &Path, to: PathBuf) {
        self.files.remove(from);
        self.files.insert(to);
        self.refresh_parent_emptiness(from);
    }

    /// Moves every tracked entry under `from` so it lives under `to`.
    pub fn directory_was_renamed(&mut self, from: &Path, to: &Path) {
        self.directories = Self::rebase_all(std::mem::take(&mut self.directories), from, to);
        self.empty_directories =
            Self::rebase_all(std::mem::take(&mut self.empty_directories), from, to);
        self.files = Self::rebase_all(std::mem::take(&mut self.files), from, to);
        self.refresh_parent_emptiness(from);
    }

    fn rebase_all(set: HashSet<PathBuf>, from: &Path, to: &Path) -> HashSet<PathBuf> {
        set.into_iter()
            .map(|path| match path.strip_prefix(from) {
                Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
                Ok(rest) => to.join(rest),
                Err(_) => path,
            })
            .collect()
    }

    /// Marks the parent of a removed entry as empty when nothing else is
    /// recorded directly inside it. The root is never tracked as empty.
    fn refresh_parent_emptiness(&mut self, removed: &Path) {
        let Some(parent) = removed.parent() else {
            return;
        };
        if self.is_root(parent) || !self.directories.contains(parent) {
            return;
        }
        if !self.has_children(parent) {
            debug!("{} became empty", parent.display());
            self.empty_directories.insert(parent.to_path_buf());
        }
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.directories
            .iter()
            .chain(self.files.iter())
            .any(|entry| entry.parent() == Some(dir))
    }

    fn is_root(&self, path: &Path) -> bool {
        self.root.as_deref() == Some(path)
    }
}

#[derive(Debug, Snafu)]
pub enum SelectionError {
    #[snafu(display("Cannot select from {collection}: the collection is empty"))]
    NothingToSelect { collection: &'static str },
    #[snafu(display(
        "No directory outside {} and it has no parent to fall back to",
        excluded.best_effort_path_display()
    ))]
    NoParent { excluded: PathBuf },
}
