mod generator;
mod options;

pub use generator::{GenerationError, GenerationSummary, Generator};
pub use options::GenerationOptions;
