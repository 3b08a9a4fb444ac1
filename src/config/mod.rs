mod stress_config;

pub use stress_config::{StressConfig, StressConfigError};
