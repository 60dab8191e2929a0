//! Domain error types.

use std::path::PathBuf;

/// Top-level error type for crossover.
#[derive(Debug, thiserror::Error)]
pub enum CrossoverError {
    #[error("cannot read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data format error: {reason}")]
    DataFormat { reason: String },

    #[error("parse error on data row {row}: {value:?} is not a number")]
    Parse { row: usize, value: String },

    #[error("price series is empty")]
    EmptySeries,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CrossoverError> for std::process::ExitCode {
    fn from(err: &CrossoverError) -> Self {
        let code: u8 = match err {
            CrossoverError::Open { .. } | CrossoverError::Io(_) => 1,
            CrossoverError::ConfigParse { .. } | CrossoverError::ConfigInvalid { .. } => 2,
            CrossoverError::DataFormat { .. } => 3,
            CrossoverError::Parse { .. } => 4,
            CrossoverError::EmptySeries => 5,
        };
        std::process::ExitCode::from(code)
    }
}
