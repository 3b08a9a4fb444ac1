use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;

/// Generation options read from a YAML file. Every key is optional; unset
/// keys fall through to the command line defaults.
///
/// ```yaml
/// directoryCount: 100
/// fileCount: 1000
/// directoryChance: 0.05
/// changeCount: 0
/// prefix: watcher-stress-
/// root: /tmp/stress-tree
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StressConfig {
    pub directory_count: Option<usize>,
    pub file_count: Option<usize>,
    pub directory_chance: Option<f64>,
    pub change_count: Option<usize>,
    pub prefix: Option<String>,
    pub root: Option<PathBuf>,
}

impl StressConfig {
    pub async fn read(path: &Path) -> Result<Self, StressConfigError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn apply_options(
        &mut self,
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<(), StressConfigError> {
        for (key, value) in top_level {
            let Some(key) = key.as_str() else {
                warn!("Ignoring non-string config key: {:?}", key);
                continue;
            };

            match key {
                "directoryCount" => self.directory_count = Some(count(key, value)?),
                "fileCount" => self.file_count = Some(count(key, value)?),
                "changeCount" => self.change_count = Some(count(key, value)?),
                "directoryChance" => self.directory_chance = Some(probability(key, value)?),
                "prefix" => self.prefix = Some(string(key, value)?),
                "root" => self.root = Some(PathBuf::from(string(key, value)?)),
                _ => warn!("Ignoring unknown config key '{}'", key),
            }
        }

        Ok(())
    }
}

fn count(key: &str, value: &Yaml) -> Result<usize, StressConfigError> {
    let parsed = match value {
        Yaml::Value(Scalar::Integer(n)) => usize::try_from(*n).ok(),
        _ => None,
    };
    parsed.context(InvalidValueSnafu {
        key,
        expected: "a non-negative integer",
    })
}

fn probability(key: &str, value: &Yaml) -> Result<f64, StressConfigError> {
    let parsed = match value {
        Yaml::Value(Scalar::FloatingPoint(f)) => Some(f.0),
        Yaml::Value(Scalar::Integer(n)) => Some(*n as f64),
        _ => None,
    };
    parsed.context(InvalidValueSnafu {
        key,
        expected: "a number",
    })
}

fn string(key: &str, value: &Yaml) -> Result<String, StressConfigError> {
    value.as_str().map(str::to_string).context(InvalidValueSnafu {
        key,
        expected: "a string",
    })
}

impl TryFrom<&str> for StressConfig {
    type Error = StressConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let mut config = StressConfig::default();
        config.apply_options(top_level)?;
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum StressConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Option '{}' should be {}", key, expected))]
    InvalidValue { key: String, expected: &'static str },
}
