use std::path::PathBuf;

use snafu::prelude::*;

use crate::cli::Cli;
use crate::config::StressConfig;
use crate::generator::GenerationOptions;

/// Generation settings after layering command line flags over the optional
/// config file over the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub directory_count: usize,
    pub file_count: usize,
    pub directory_chance: f64,
    pub change_count: usize,
    pub prefix: String,
    pub root: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli, file: StressConfig) -> Result<Self, RuntimeConfigError> {
        let defaults = GenerationOptions::default();

        let config = Self {
            directory_count: cli
                .directory_count
                .or(file.directory_count)
                .unwrap_or(defaults.directory_count),
            file_count: cli
                .file_count
                .or(file.file_count)
                .unwrap_or(defaults.file_count),
            directory_chance: cli
                .directory_chance
                .or(file.directory_chance)
                .unwrap_or(defaults.directory_chance),
            change_count: cli
                .change_count
                .or(file.change_count)
                .unwrap_or(defaults.change_count),
            prefix: cli.prefix.or(file.prefix).unwrap_or(defaults.prefix),
            root: cli.root.or(file.root),
        };

        ensure!(
            (0.0..=1.0).contains(&config.directory_chance),
            DirectoryChanceOutOfRangeSnafu {
                value: config.directory_chance
            }
        );

        Ok(config)
    }
}

impl From<RuntimeConfig> for GenerationOptions {
    fn from(config: RuntimeConfig) -> Self {
        Self {
            directory_count: config.directory_count,
            file_count: config.file_count,
            directory_chance: config.directory_chance,
            change_count: config.change_count,
            prefix: config.prefix,
            root: config.root,
        }
    }
}

#[derive(Debug, Snafu)]
pub enum RuntimeConfigError {
    #[snafu(display("Directory chance must be between 0 and 1, got {}", value))]
    DirectoryChanceOutOfRange { value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("watcher-stress").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = RuntimeConfig::resolve(cli(&[]), StressConfig::default())
            .expect("Defaults should be valid");

        assert_eq!(
            GenerationOptions::from(config),
            GenerationOptions::default()
        );
    }

    #[test]
    fn file_overrides_defaults_and_cli_overrides_file() {
        let file = StressConfig {
            directory_count: Some(10),
            file_count: Some(20),
            prefix: Some("from-file-".to_string()),
            root: Some(PathBuf::from("/tmp/from-file")),
            ..StressConfig::default()
        };

        let config = RuntimeConfig::resolve(cli(&["--file-count", "3", "--root", "/tmp/cli"]), file)
            .expect("Config should be valid");

        assert_eq!(config.directory_count, 10);
        assert_eq!(config.file_count, 3);
        assert_eq!(config.prefix, "from-file-");
        assert_eq!(config.root, Some(PathBuf::from("/tmp/cli")));
        assert_eq!(config.change_count, 0);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn out_of_range_chance_is_rejected(#[case] chance: f64) {
        let file = StressConfig {
            directory_chance: Some(chance),
            ..StressConfig::default()
        };

        let result = RuntimeConfig::resolve(cli(&[]), file);

        assert!(matches!(
            result,
            Err(RuntimeConfigError::DirectoryChanceOutOfRange { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    fn boundary_chances_are_accepted(#[case] chance: f64) {
        let file = StressConfig {
            directory_chance: Some(chance),
            ..StressConfig::default()
        };

        assert!(RuntimeConfig::resolve(cli(&[]), file).is_ok());
    }
}
