use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::{RuntimeConfig, RuntimeConfigError};
use crate::cli::Cli;
use crate::config::{StressConfig, StressConfigError};
use crate::generator::{GenerationError, GenerationSummary, Generator};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<GenerationSummary, ApplicationError> {
        let file_config = match &cli.config {
            Some(path) => StressConfig::read(path).await.context(StressConfigSnafu)?,
            None => StressConfig::default(),
        };
        debug!("Loaded config file options: {:?}", file_config);

        let runtime_config =
            RuntimeConfig::resolve(cli, file_config).context(RuntimeConfigSnafu)?;
        debug!("Resolved runtime config: {:?}", runtime_config);

        let mut generator = Generator::new(runtime_config.into());
        let summary = generator.generate().await.context(GenerationSnafu)?;
        let tree = generator.tree();
        debug!(
            "Final tree: {} directories ({} empty), {} files",
            tree.directory_count(),
            tree.empty_directory_count(),
            tree.file_count()
        );

        print_summary(&summary);
        Ok(summary)
    }
}

fn print_summary(summary: &GenerationSummary) {
    println!(
        "{} {}",
        "Generated tree at".green().bold(),
        summary.root.display()
    );
    println!(
        "  {} directories, {} files, {} additional changes",
        summary.directories_created.to_string().bold(),
        summary.files_created.to_string().bold(),
        summary.changes_applied.to_string().bold()
    );
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading the config file"))]
    StressConfigError { source: StressConfigError },
    #[snafu(display("Critical failure encountered while resolving options"))]
    RuntimeConfigError { source: RuntimeConfigError },
    #[snafu(display("Critical failure encountered during tree generation"))]
    GenerationError { source: GenerationError },
}
