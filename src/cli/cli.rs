use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Generates a randomized directory tree for stress-testing file-system watchers
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file with generation options; command line flags take precedence
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Root of the generated tree, created if missing [default: a fresh temporary directory]
    #[clap(long, short)]
    pub root: Option<PathBuf>,

    /// Name prefix of the temporary root [default: watcher-stress-]
    #[clap(long)]
    pub prefix: Option<String>,

    /// Number of directories to create [default: 100]
    #[clap(long, short = 'd')]
    pub directory_count: Option<usize>,

    /// Number of files to create [default: 1000]
    #[clap(long, short = 'f')]
    pub file_count: Option<usize>,

    /// Probability (0 to 1) that a creation step makes a directory [default: 0.05]
    #[clap(long)]
    pub directory_chance: Option<f64>,

    /// Random changes (creations, deletions, modifications, renames) applied
    /// after the tree is built [default: 0]
    #[clap(long)]
    pub change_count: Option<usize>,
}
