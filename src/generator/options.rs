use std::path::PathBuf;

pub const DEFAULT_DIRECTORY_COUNT: usize = 100;
pub const DEFAULT_FILE_COUNT: usize = 1000;
pub const DEFAULT_DIRECTORY_CHANCE: f64 = 0.05;
pub const DEFAULT_CHANGE_COUNT: usize = 0;
pub const DEFAULT_PREFIX: &str = "watcher-stress-";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Directories created by the creation phase.
    pub directory_count: usize,
    /// Files created by the creation phase.
    pub file_count: usize,
    /// Probability in `0..=1` that a creation step makes a directory.
    pub directory_chance: f64,
    /// Random changes applied after the creation phase.
    pub change_count: usize,
    /// Name prefix of a provisioned temporary root.
    pub prefix: String,
    /// Existing (or to be created) root. A temporary one is provisioned when unset.
    pub root: Option<PathBuf>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            directory_count: DEFAULT_DIRECTORY_COUNT,
            file_count: DEFAULT_FILE_COUNT,
            directory_chance: DEFAULT_DIRECTORY_CHANCE,
            change_count: DEFAULT_CHANGE_COUNT,
            prefix: DEFAULT_PREFIX.to_string(),
            root: None,
        }
    }
}
